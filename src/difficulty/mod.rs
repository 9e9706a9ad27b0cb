use crate::{
    model::hit_object::HitObject,
    util::difficulty_range,
};

use self::{object::DifficultyHitObject, scaling_factor::ScalingFactor};

pub mod object;
pub mod scaling_factor;
pub mod slider;

pub const HD_FADE_IN_DURATION_MULTIPLIER: f64 = 0.4;
pub const HD_FADE_OUT_DURATION_MULTIPLIER: f64 = 0.3;

/// Preempt time at approach rate 0.
const PREEMPT_MAX: f64 = 1800.0;
/// Preempt time at approach rate 5.
const PREEMPT_MID: f64 = 1200.0;

/// Parameters of an annotation pass over a beatmap's hit objects.
///
/// All parameters are optional; by default objects are processed at their
/// original playback speed with approach rate and circle size 5.
#[derive(Clone, Debug, PartialEq)]
#[must_use]
pub struct Difficulty {
    clock_rate: f64,
    time_preempt: f64,
    force_ar: bool,
    scaling_factor: ScalingFactor,
}

impl Difficulty {
    /// Create a new annotation pass.
    pub fn new() -> Self {
        Self {
            clock_rate: 1.0,
            time_preempt: PREEMPT_MID,
            force_ar: false,
            scaling_factor: ScalingFactor::new(5.0),
        }
    }

    /// Adjust the playback speed used in the calculation, e.g. `1.5` for DT
    /// and `0.75` for HT.
    ///
    /// Must be positive and finite; this is not validated.
    pub const fn clock_rate(self, clock_rate: f64) -> Self {
        Self { clock_rate, ..self }
    }

    /// Specify the preempt time through an approach rate value.
    ///
    /// Values above 10 keep shortening the preempt time below 450 ms.
    pub fn ar(self, ar: f64) -> Self {
        Self {
            time_preempt: difficulty_range(ar, PREEMPT_MAX, PREEMPT_MID, HitObject::PREEMPT_MIN),
            ..self
        }
    }

    /// Specify the preempt time in milliseconds directly.
    pub const fn time_preempt(self, time_preempt: f64) -> Self {
        Self {
            time_preempt,
            ..self
        }
    }

    /// Whether the preempt time is meant as-is, i.e. it will not be divided
    /// by the clock rate.
    pub const fn force_ar(self, force_ar: bool) -> Self {
        Self { force_ar, ..self }
    }

    /// Specify the circle size the objects' radius is derived from.
    pub fn cs(self, cs: f64) -> Self {
        Self {
            scaling_factor: ScalingFactor::new(cs),
            ..self
        }
    }

    /// Specify the objects' radius directly.
    pub fn radius(self, radius: f64) -> Self {
        Self {
            scaling_factor: ScalingFactor::from_radius(radius),
            ..self
        }
    }

    pub const fn get_clock_rate(&self) -> f64 {
        self.clock_rate
    }

    pub const fn get_time_preempt(&self) -> f64 {
        self.time_preempt
    }

    pub const fn get_scaling_factor(&self) -> &ScalingFactor {
        &self.scaling_factor
    }

    /// Annotate the given hit objects in a single chronological pass.
    ///
    /// The first object has no predecessor and thus no difficulty object;
    /// the returned collection holds one entry for each following object, in
    /// order, with matching [`DifficultyHitObject::idx`] values.
    pub fn difficulty_objects<'a>(
        &self,
        hit_objects: &'a [HitObject],
    ) -> Vec<DifficultyHitObject<'a>> {
        let mut hit_objects_iter = hit_objects.iter();

        let Some(mut last) = hit_objects_iter.next() else {
            return Vec::new();
        };

        let mut last_last = None;

        hit_objects_iter
            .enumerate()
            .map(|(idx, hit_object)| {
                #[cfg(feature = "tracing")]
                if hit_object.start_time < last.start_time {
                    tracing::warn!(idx, "hit object starts before its predecessor");
                }

                let diff_object = DifficultyHitObject::new(
                    hit_object,
                    last,
                    last_last,
                    self.clock_rate,
                    idx,
                    self.time_preempt,
                    self.force_ar,
                    &self.scaling_factor,
                );

                last_last = Some(last);
                last = hit_object;

                diff_object
            })
            .collect()
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use crate::util::float_ext::FloatExt;

    use super::*;

    #[test]
    fn preempt_from_ar() {
        for (ar, expected) in [(0.0, 1800.0), (5.0, 1200.0), (10.0, 450.0)] {
            let time_preempt = Difficulty::new().ar(ar).get_time_preempt();

            assert!(
                time_preempt.eq(expected),
                "AR{ar}: {time_preempt} != {expected}"
            );
        }
    }

    #[test]
    fn preempt_extends_past_ar10() {
        let time_preempt = Difficulty::new().ar(11.0).get_time_preempt();

        let expected = 300.0;

        assert!(time_preempt.eq(expected), "{time_preempt} != {expected}");
    }
}
