#![warn(clippy::pedantic)]
// Pixel coordinates are converted between integer and float types all over
// the place.
#![allow(
    clippy::cast_possible_wrap,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::module_name_repetitions,
    clippy::must_use_candidate
)]
#![deny(missing_debug_implementations, nonstandard_style)]
#![warn(missing_copy_implementations, unused_qualifications)]

pub mod clock;
pub mod description;
pub mod format;
pub mod geometry;
pub mod render;
pub mod segment;
pub mod settings;
pub mod style;
pub mod timeline;
pub mod view;

pub use clock::{Clock, ManualClock, SystemClock};
pub use description::ViewDescription;
pub use segment::ExtraSegment;
pub use style::{LineCap, Orientation};
pub use view::ArcProgressView;
