//! Library to annotate the hit objects of an osu!standard beatmap with the
//! per-object attributes that difficulty and performance calculation is
//! built on.
//!
//! ## Description
//!
//! Given a beatmap's hit objects in chronological order, a single pass
//! produces one [`DifficultyHitObject`] per object, holding jump and travel
//! distances, timings, the angle formed with its predecessors, and a
//! visibility query. Skill implementations (aim, speed, flashlight, ...)
//! iterate that collection to accumulate strain values; producing those
//! final values is not part of this crate.
//!
//! Sliders are approximated by the minimal movement a player performs to
//! complete them, keeping the cursor inside the follow circle wherever
//! possible. That lazy path is simulated at most once per slider and cached
//! on the object, no matter how many annotations refer to it.
//!
//! ## Usage
//!
//! ```
//! use osu_diffobj::{Difficulty, HitObject, HitObjectKind, Pos};
//!
//! let circle = |x: f32, y: f32, start_time: f64| HitObject {
//!     pos: Pos::new(x, y),
//!     start_time,
//!     stack_offset: Pos::zero(),
//!     kind: HitObjectKind::Circle,
//! };
//!
//! let hit_objects = vec![
//!     circle(64.0, 96.0, 1_000.0),
//!     circle(128.0, 96.0, 1_250.0),
//!     circle(128.0, 160.0, 1_500.0),
//! ];
//!
//! let diff_objects = Difficulty::new()
//!     .clock_rate(1.5)
//!     .ar(9.0)
//!     .cs(4.0)
//!     .difficulty_objects(&hit_objects);
//!
//! // The first object only serves as predecessor.
//! assert_eq!(diff_objects.len(), 2);
//!
//! let last = &diff_objects[1];
//! assert!(last.angle.is_some());
//! assert!(last.previous(0, &diff_objects).is_some());
//! assert!(last.next(0, &diff_objects).is_none());
//! ```
//!
//! ## Features
//!
//! | Flag | Description | Dependencies
//! | - | - | -
//! | `default` | No features |
//! | `sync` | Annotated beatmaps are `Send + Sync` by backing the slider lazy-path cache with a synchronized cell. |
//! | `tracing` | Anomalies in the input object sequence will be logged through `tracing::warn`. If this feature is not enabled, they will be ignored. | [`tracing`]
//!
//! [`tracing`]: https://docs.rs/tracing

#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::missing_const_for_fn, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::similar_names
)]

#[doc(inline)]
pub use self::{
    difficulty::{object::DifficultyHitObject, scaling_factor::ScalingFactor, Difficulty},
    model::hit_object::{
        HitObject, HitObjectKind, NestedSliderObject, NestedSliderObjectKind, Slider, SliderPath,
        Spinner,
    },
    util::pos::Pos,
};

/// Types around the annotation pass itself.
pub mod difficulty;

/// The input hit object model.
pub mod model;

/// Types used in and around this crate.
pub mod util;
