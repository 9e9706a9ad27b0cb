use crate::{
    model::hit_object::{HitObject, HitObjectKind},
    util::pos::Pos,
};

use super::{
    scaling_factor::ScalingFactor, slider::SliderLazyTravel, HD_FADE_IN_DURATION_MULTIPLIER,
    HD_FADE_OUT_DURATION_MULTIPLIER,
};

/// A [`HitObject`] with additional information for difficulty calculation.
///
/// All fields are in the speed-adjusted time domain unless noted otherwise;
/// distances are normalized to a uniform circle size.
pub struct DifficultyHitObject<'a> {
    /// Position in the owning collection. This is one less than the index
    /// of the underlying hit object in the beatmap since the first object
    /// has no predecessor and thus no difficulty object.
    pub idx: usize,
    pub base: &'a HitObject,
    /// Preempt time without speed adjustment.
    pub base_time_preempt: f64,
    pub time_preempt: f64,
    pub time_fade_in: f64,
    pub start_time: f64,
    pub end_time: f64,
    pub delta_time: f64,
    pub strain_time: f64,
    /// Speed-adjusted velocity of the object's slider body; `0` otherwise.
    pub velocity: f64,
    /// Distance from the predecessor's lazy end position to this object's
    /// position.
    pub lazy_jump_dist: f64,
    /// The shortest distance to consider for a jump from the predecessor.
    ///
    /// Bounded from above by [`lazy_jump_dist`] and smaller whenever a more
    /// natural path exists through a preceding slider, either by cutting it
    /// short or by flowing through its tail.
    ///
    /// [`lazy_jump_dist`]: Self::lazy_jump_dist
    pub min_jump_dist: f64,
    /// The time taken to travel through [`min_jump_dist`], at least 25 ms.
    ///
    /// [`min_jump_dist`]: Self::min_jump_dist
    pub min_jump_time: f64,
    pub travel_dist: f64,
    pub travel_time: f64,
    /// Angle formed with the two predecessors, in `[0, π]`; `None` when a
    /// predecessor is missing or non-positional.
    pub angle: Option<f64>,
}

impl<'a> DifficultyHitObject<'a> {
    /// A distance by which all distances are scaled in order to assume a
    /// uniform circle size.
    pub const NORMALIZED_RADIUS: i32 = 50;

    /// Floor for all time deltas to prevent the calculation breaking on
    /// simultaneous objects.
    pub const MIN_DELTA_TIME: f64 = 25.0;

    const MAX_SLIDER_RADIUS: f32 = Self::NORMALIZED_RADIUS as f32 * 2.4;
    pub(crate) const ASSUMED_SLIDER_RADIUS: f32 = Self::NORMALIZED_RADIUS as f32 * 1.8;

    const BASE_TIME_FADE_IN: f64 = 400.0;

    #[allow(clippy::too_many_arguments)]
    pub fn new(
        hit_object: &'a HitObject,
        last_object: &'a HitObject,
        last_last_object: Option<&HitObject>,
        clock_rate: f64,
        idx: usize,
        time_preempt: f64,
        force_ar: bool,
        scaling_factor: &ScalingFactor,
    ) -> Self {
        // * Preempt time can go below 450ms. Normally, this is achieved via the DT mod
        // * which uniformly speeds up all animations game wide regardless of AR.
        // * This uniform speedup is hard to match 1:1, however we can at least make
        // * AR>10 (via mods) feel good by extending the upper linear function above.
        // * Note that this doesn't exactly match the AR>10 visuals as they're
        // * classically known, but it feels good.
        // * This adjustment is necessary for AR>10, otherwise TimePreempt can
        // * become smaller leading to hitcircles not fully fading in.
        let time_fade_in =
            Self::BASE_TIME_FADE_IN * (time_preempt / HitObject::PREEMPT_MIN).min(1.0);

        let adjusted_preempt = if force_ar {
            time_preempt
        } else {
            time_preempt / clock_rate
        };

        let delta_time = (hit_object.start_time - last_object.start_time) / clock_rate;
        let start_time = hit_object.start_time / clock_rate;
        let end_time = hit_object.end_time() / clock_rate;

        // * Capped to 25ms to prevent difficulty calculation breaking from simultaneous objects.
        let strain_time = delta_time.max(Self::MIN_DELTA_TIME);

        let mut this = Self {
            idx,
            base: hit_object,
            base_time_preempt: time_preempt,
            time_preempt: adjusted_preempt,
            time_fade_in,
            start_time,
            end_time,
            delta_time,
            strain_time,
            velocity: 0.0,
            lazy_jump_dist: 0.0,
            min_jump_dist: 0.0,
            min_jump_time: 0.0,
            travel_dist: 0.0,
            travel_time: 0.0,
            angle: None,
        };

        this.set_distances(last_object, last_last_object, clock_rate, scaling_factor);

        this
    }

    /// The difficulty object `backwards_idx + 1` positions before this one,
    /// or `None` past the start of the collection.
    pub fn previous<'b>(&self, backwards_idx: usize, diff_objects: &'b [Self]) -> Option<&'b Self> {
        self.idx
            .checked_sub(backwards_idx + 1)
            .and_then(|idx| diff_objects.get(idx))
    }

    /// The difficulty object `forwards_idx + 1` positions after this one, or
    /// `None` past the end of the collection.
    pub fn next<'b>(&self, forwards_idx: usize, diff_objects: &'b [Self]) -> Option<&'b Self> {
        diff_objects.get(self.idx + forwards_idx + 1)
    }

    /// How visible the object is at the given time, in `[0, 1]`.
    ///
    /// The time is expected in the speed-unadjusted domain, matching
    /// [`HitObject::start_time`]. With the Hidden mod the fade-in window is
    /// 40% of the preempt time and objects fade back out over the following
    /// 30%.
    pub fn opacity_at(&self, time: f64, hidden: bool) -> f64 {
        if time >= self.base.start_time {
            // * Consider a hitobject as being invisible when its start time is passed.
            // * In reality the hitobject will be visible beyond its start time up until its hittable window has passed,
            // * but this is an approximation and such a case is unlikely to be hit where this function is used.
            return 0.0;
        }

        let fade_in_start_time = self.base.start_time - self.base_time_preempt;

        let fade_in_duration = if hidden {
            self.base_time_preempt * HD_FADE_IN_DURATION_MULTIPLIER
        } else {
            self.time_fade_in
        };

        let non_hidden_opacity = ((time - fade_in_start_time) / fade_in_duration).clamp(0.0, 1.0);

        if hidden {
            // * Taken from OsuModHidden.
            let fade_out_start_time = fade_in_start_time + fade_in_duration;
            let fade_out_duration = self.base_time_preempt * HD_FADE_OUT_DURATION_MULTIPLIER;

            return non_hidden_opacity
                .min(1.0 - ((time - fade_out_start_time) / fade_out_duration).clamp(0.0, 1.0));
        }

        non_hidden_opacity
    }

    fn set_distances(
        &mut self,
        last_object: &HitObject,
        last_last_object: Option<&HitObject>,
        clock_rate: f64,
        scaling_factor: &ScalingFactor,
    ) {
        if let HitObjectKind::Slider(ref slider) = self.base.kind {
            self.velocity = slider.velocity * clock_rate;

            let lazy_travel =
                SliderLazyTravel::get_or_compute(self.base, slider, scaling_factor.radius);

            // * Bonus for repeat sliders until a better per nested object strain system can be achieved.
            let repeat_bonus =
                (1.0 + slider.repeat_count.saturating_sub(1) as f64 / 2.5).powf(1.0 / 2.5);

            self.travel_dist = f64::from(lazy_travel.dist * repeat_bonus as f32);
            self.travel_time = (lazy_travel.time / clock_rate).max(Self::MIN_DELTA_TIME);
        }

        // * We don't need to calculate either angle or distance when one of the last->curr objects
        // * is a spinner
        if self.base.is_spinner() || last_object.is_spinner() {
            return;
        }

        let factor = scaling_factor.factor;

        let last_cursor_pos = Self::end_cursor_pos(last_object, scaling_factor.radius);

        self.lazy_jump_dist =
            f64::from((self.base.stacked_pos() * factor - last_cursor_pos * factor).length());
        self.min_jump_time = self.strain_time;
        self.min_jump_dist = self.lazy_jump_dist;

        if let HitObjectKind::Slider(ref last_slider) = last_object.kind {
            let last_lazy_travel =
                SliderLazyTravel::get_or_compute(last_object, last_slider, scaling_factor.radius);

            self.min_jump_time =
                (self.strain_time - last_lazy_travel.time / clock_rate).max(Self::MIN_DELTA_TIME);

            // * There are two types of slider-to-object patterns to consider in order to better approximate the real movement a player will take to jump between the hit objects.
            // *
            // * 1. The anti-flow pattern, where players cut the slider short in order to move to the next hit object.
            // *
            // *      <======o==>  ← slider
            // *             |     ← most natural jump path
            // *             o     ← a follow-up hit circle
            // *
            // * In this case the most natural jump path is approximated by LazyJumpDistance.
            // *
            // * 2. The flow pattern, where players follow through the slider to its visual extent into the next hit object.
            // *
            // *      <======o==>---o
            // *                  ↑
            // *        most natural jump path
            // *
            // * In this case the most natural jump path is better approximated by a new distance called "tailJumpDistance" - the distance between the slider's tail and the next hit object.
            // *
            // * Thus, the player is assumed to jump the minimum of these two distances in all cases.
            let tail_pos = last_slider
                .tail()
                .map_or(last_object.stacked_pos(), |tail| tail.pos);

            let tail_jump_dist = (tail_pos - self.base.stacked_pos()).length() * factor;

            let diff = f64::from(Self::MAX_SLIDER_RADIUS - Self::ASSUMED_SLIDER_RADIUS);
            let min = f64::from(tail_jump_dist - Self::MAX_SLIDER_RADIUS);

            self.min_jump_dist = ((self.lazy_jump_dist - diff).min(min)).max(0.0);
        }

        if let Some(last_last_object) = last_last_object.filter(|h| !h.is_spinner()) {
            let last_last_cursor_pos =
                Self::end_cursor_pos(last_last_object, scaling_factor.radius);

            let v1 = last_last_cursor_pos - last_object.stacked_pos();
            let v2 = self.base.stacked_pos() - last_cursor_pos;

            let dot = v1.dot(v2);
            let det = v1.x * v2.y - v1.y * v2.x;

            self.angle = Some(f64::from(det).atan2(f64::from(dot)).abs());
        }
    }

    /// The position the cursor rests at once the given object is hit,
    /// i.e. a slider's lazy end position.
    fn end_cursor_pos(hit_object: &HitObject, radius: f64) -> Pos {
        hit_object
            .lazy_travel(radius)
            .map_or_else(|| hit_object.stacked_pos(), |lazy_travel| lazy_travel.end_pos)
    }
}
