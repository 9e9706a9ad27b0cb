use crate::{model::hit_object::HitObject, util::pos::Pos};

use super::object::DifficultyHitObject;

const BROKEN_GAMEFIELD_ROUNDING_ALLOWANCE: f32 = 1.00041;

/// Fields around the scaling of hit objects.
///
/// All objects of a beatmap share the same circle size so these are stored
/// once per annotation pass rather than per object.
#[derive(Clone, Debug, PartialEq)]
pub struct ScalingFactor {
    /// `NORMALIZED_RADIUS / radius` and then adjusted if `radius < 30`.
    pub factor: f32,
    pub radius: f64,
    pub scale: f32,
}

impl ScalingFactor {
    /// Derive the hit object radius from a circle size value.
    pub fn new(cs: f64) -> Self {
        let scale = (f64::from(1.0_f32) - f64::from(0.7_f32) * ((cs - 5.0) / 5.0)) as f32 / 2.0
            * BROKEN_GAMEFIELD_ROUNDING_ALLOWANCE;

        Self::with_scale(f64::from(HitObject::OBJECT_RADIUS * scale), scale)
    }

    /// Use an already known hit object radius.
    pub fn from_radius(radius: f64) -> Self {
        Self::with_scale(radius, (radius / f64::from(HitObject::OBJECT_RADIUS)) as f32)
    }

    fn with_scale(radius: f64, scale: f32) -> Self {
        let factor = DifficultyHitObject::NORMALIZED_RADIUS as f32 / radius as f32;

        // * High circle size (small CS) bonus
        let factor_with_small_circle_bonus = if radius < 30.0 {
            factor * (1.0 + (30.0 - radius as f32).min(5.0) / 50.0)
        } else {
            factor
        };

        Self {
            factor: factor_with_small_circle_bonus,
            radius,
            scale,
        }
    }

    /// The stack offset for an object of the given stack height.
    pub fn stack_offset(&self, stack_height: i32) -> Pos {
        let stack_offset = stack_height as f32 * self.scale * -6.4;

        Pos::new(stack_offset, stack_offset)
    }
}

#[cfg(test)]
mod tests {
    use crate::util::float_ext::FloatExt;

    use super::*;

    #[test]
    fn small_circle_bonus() {
        let scaling_factor = ScalingFactor::from_radius(20.0);

        let expected = 50.0 / 20.0 * (1.0 + (30.0_f32 - 20.0).min(5.0) / 50.0);

        assert!(
            scaling_factor.factor.eq(expected),
            "{} != {expected}",
            scaling_factor.factor
        );
    }

    #[test]
    fn no_bonus_for_regular_radius() {
        let scaling_factor = ScalingFactor::from_radius(32.0);

        let expected = 50.0 / 32.0;

        assert!(
            scaling_factor.factor.eq(expected),
            "{} != {expected}",
            scaling_factor.factor
        );
    }

    #[test]
    fn bonus_capped_below_radius_25() {
        let tiny = ScalingFactor::from_radius(10.0);

        // The bonus saturates at a 5 unit deficit.
        let expected = 50.0 / 10.0 * (1.0 + (30.0_f32 - 10.0).min(5.0) / 50.0);

        assert!(tiny.factor.eq(expected), "{} != {expected}", tiny.factor);
    }
}
