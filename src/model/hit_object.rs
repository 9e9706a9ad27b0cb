use crate::{
    difficulty::slider::SliderLazyTravel,
    util::{pos::Pos, sync::OnceCell},
};

#[cfg(not(feature = "sync"))]
type PathFn = Box<dyn Fn(f64) -> Pos>;

#[cfg(feature = "sync")]
type PathFn = Box<dyn Fn(f64) -> Pos + Send + Sync>;

/// A hit target of a beatmap.
///
/// Positions are in playfield coordinates; `stack_offset` is expected to
/// already account for stacked patterns so that [`stacked_pos`] is the
/// position the object is actually displayed at.
///
/// [`stacked_pos`]: Self::stacked_pos
pub struct HitObject {
    pub pos: Pos,
    pub start_time: f64,
    pub stack_offset: Pos,
    pub kind: HitObjectKind,
}

impl HitObject {
    /// Radius of a hit object at circle size 0.
    pub const OBJECT_RADIUS: f32 = 64.0;

    /// Preempt time at approach rate 10.
    pub const PREEMPT_MIN: f64 = 450.0;

    /// The time at which the object is fully hit or passed.
    pub const fn end_time(&self) -> f64 {
        match self.kind {
            HitObjectKind::Circle => self.start_time,
            HitObjectKind::Slider(ref slider) => slider.end_time,
            HitObjectKind::Spinner(ref spinner) => spinner.end_time,
        }
    }

    /// The position including the stack offset.
    pub fn stacked_pos(&self) -> Pos {
        self.pos + self.stack_offset
    }

    /// The minimal-movement path through the object's slider body, or `None`
    /// if the object is not a slider.
    ///
    /// The result is computed on the first call and cached on the slider;
    /// later calls return the same values no matter the given radius.
    pub fn lazy_travel(&self, radius: f64) -> Option<&SliderLazyTravel> {
        match self.kind {
            HitObjectKind::Slider(ref slider) => {
                Some(SliderLazyTravel::get_or_compute(self, slider, radius))
            }
            HitObjectKind::Circle | HitObjectKind::Spinner(_) => None,
        }
    }

    pub const fn is_circle(&self) -> bool {
        matches!(self.kind, HitObjectKind::Circle)
    }

    pub const fn is_slider(&self) -> bool {
        matches!(self.kind, HitObjectKind::Slider(_))
    }

    pub const fn is_spinner(&self) -> bool {
        matches!(self.kind, HitObjectKind::Spinner(_))
    }
}

/// Additional data for a [`HitObject`] depending on its type.
pub enum HitObjectKind {
    Circle,
    Slider(Slider),
    Spinner(Spinner),
}

/// A spinner. The only non-positional hit target.
pub struct Spinner {
    pub end_time: f64,
}

/// A slider.
pub struct Slider {
    pub end_time: f64,
    /// Raw velocity of the slider in playfield units per millisecond,
    /// not adjusted for playback speed.
    pub velocity: f64,
    /// Duration of a single span.
    pub span_duration: f64,
    /// The amount of times the slider's path is traversed; `1` for a slider
    /// without repeat points.
    pub repeat_count: usize,
    /// All events along the slider's body ordered by start time: the head
    /// first, then ticks and repeat points, the tail last.
    pub nested_objects: Vec<NestedSliderObject>,
    path: SliderPath,
    pub(crate) lazy: OnceCell<SliderLazyTravel>,
}

impl Slider {
    pub fn new(
        end_time: f64,
        velocity: f64,
        span_duration: f64,
        repeat_count: usize,
        nested_objects: Vec<NestedSliderObject>,
        path: SliderPath,
    ) -> Self {
        Self {
            end_time,
            velocity,
            span_duration,
            repeat_count,
            nested_objects,
            path,
            lazy: OnceCell::new(),
        }
    }

    /// Sample the slider's path, mapping progress in `[0, 1]` to an offset
    /// from the slider's start position.
    pub fn position_at(&self, progress: f64) -> Pos {
        self.path.position_at(progress)
    }

    /// The tail nested object.
    ///
    /// Searched from the back since very short buzz sliders may order their
    /// events unexpectedly.
    pub fn tail(&self) -> Option<&NestedSliderObject> {
        self.nested_objects
            .iter()
            .rfind(|nested| matches!(nested.kind, NestedSliderObjectKind::Tail))
    }
}

/// An event along a slider's body.
pub struct NestedSliderObject {
    /// Position including the owning slider's stack offset.
    pub pos: Pos,
    pub start_time: f64,
    pub kind: NestedSliderObjectKind,
}

impl NestedSliderObject {
    pub const fn is_repeat(&self) -> bool {
        matches!(self.kind, NestedSliderObjectKind::Repeat)
    }
}

pub enum NestedSliderObjectKind {
    Head,
    Tick,
    Repeat,
    Tail,
}

/// Samples positions along a slider's body.
///
/// The curve itself is built by the beatmap layer; this type only wraps the
/// finished sampler function.
pub struct SliderPath(PathFn);

impl SliderPath {
    #[cfg(not(feature = "sync"))]
    pub fn new(f: impl Fn(f64) -> Pos + 'static) -> Self {
        Self(Box::new(f))
    }

    #[cfg(feature = "sync")]
    pub fn new(f: impl Fn(f64) -> Pos + Send + Sync + 'static) -> Self {
        Self(Box::new(f))
    }

    /// A straight path from the slider's start to `end`, given as an offset
    /// from the start position.
    pub fn linear(end: Pos) -> Self {
        Self::new(move |progress| end * progress as f32)
    }

    /// The offset from the slider's start position after traversing
    /// `progress` of a single span.
    pub fn position_at(&self, progress: f64) -> Pos {
        (self.0)(progress)
    }
}

#[cfg(all(test, feature = "sync"))]
mod tests {
    use super::HitObject;

    const fn assert_shareable<T: Send + Sync>() {}

    #[test]
    fn hit_objects_are_shareable() {
        assert_shareable::<HitObject>();
    }
}
