use crate::{
    model::hit_object::{HitObject, Slider},
    util::pos::Pos,
};

use super::object::DifficultyHitObject;

/// The minimal cursor movement through a slider's body.
///
/// Models a player that keeps the cursor inside the follow circle wherever
/// possible and only moves once an event would otherwise be missed.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SliderLazyTravel {
    /// Position of the cursor at the moment the slider is considered
    /// complete.
    pub end_pos: Pos,
    /// Cumulative distance of the minimal path, normalized and non-negative.
    pub dist: f32,
    /// Duration from the slider's start to its last nested object.
    pub time: f64,
}

impl SliderLazyTravel {
    /// Returns the slider's cached lazy travel, simulating it on the first
    /// call.
    ///
    /// `slider` must be the slider of `h`. Redundant calls are cheap; the
    /// walk below runs at most once per slider.
    pub(crate) fn get_or_compute<'a>(
        h: &'a HitObject,
        slider: &'a Slider,
        radius: f64,
    ) -> &'a Self {
        slider
            .lazy
            .get_or_init(|| Self::compute(slider, h.stacked_pos(), h.start_time, radius))
    }

    fn compute(slider: &Slider, stacked_pos: Pos, start_time: f64, radius: f64) -> Self {
        let time = slider
            .nested_objects
            .last()
            .map_or(0.0, |nested| nested.start_time - start_time);

        // The span progress at that time, folded back onto [0, 1] for
        // odd-numbered spans which run the path in reverse.
        let mut end_time_min = time / slider.span_duration;

        if end_time_min % 2.0 >= 1.0 {
            end_time_min = 1.0 - end_time_min % 1.0;
        } else {
            end_time_min %= 1.0;
        }

        // * Temporary lazy end position until a real result can be derived.
        let mut end_pos = stacked_pos + slider.position_at(end_time_min);

        let mut curr_cursor_pos = stacked_pos;
        let scaling_factor = f64::from(DifficultyHitObject::NORMALIZED_RADIUS) / radius;
        let mut dist = 0.0_f32;

        let last_idx = slider.nested_objects.len().saturating_sub(1);

        for (i, curr_movement_obj) in slider.nested_objects.iter().enumerate().skip(1) {
            let mut curr_movement = curr_movement_obj.pos - curr_cursor_pos;
            let mut curr_movement_len = scaling_factor * f64::from(curr_movement.length());

            // The amount of movement required for the cursor position to be
            // updated.
            let mut required_movement = f64::from(DifficultyHitObject::ASSUMED_SLIDER_RADIUS);

            if i == last_idx {
                // * The end of a slider has special aim rules due to the relaxed time constraint on position.
                // * There is both a lazy end position and the actual end slider position. We assume the player takes the simpler movement.
                // * For sliders that are circular, the lazy end position may actually be farther away than the sliders' true end.
                // * This code is designed to prevent buffing situations where lazy end is actually a less efficient movement.
                let lazy_movement = end_pos - curr_cursor_pos;

                if lazy_movement.length() < curr_movement.length() {
                    curr_movement = lazy_movement;
                }

                curr_movement_len = scaling_factor * f64::from(curr_movement.length());
            } else if curr_movement_obj.is_repeat() {
                // * For a slider repeat, assume a tighter movement threshold to better assess repeat sliders.
                required_movement = f64::from(DifficultyHitObject::NORMALIZED_RADIUS);
            }

            if curr_movement_len > required_movement {
                // * This finds the positional delta from the required radius and the current position,
                // * and updates the currentCursorPosition accordingly, as well as rewarding distance.
                curr_cursor_pos += curr_movement
                    * (((curr_movement_len - required_movement) / curr_movement_len) as f32);
                curr_movement_len *= (curr_movement_len - required_movement) / curr_movement_len;
                dist += curr_movement_len as f32;
            }

            if i == last_idx {
                end_pos = curr_cursor_pos;
            }
        }

        Self {
            end_pos,
            dist,
            time,
        }
    }
}
