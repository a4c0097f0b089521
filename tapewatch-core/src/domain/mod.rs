//! Domain types for Tapewatch

pub mod labels;
pub mod record;
pub mod sample;

pub use labels::{Behavior, Trend};
pub use record::{combination_label, AnnotatedRecord};
pub use sample::Sample;
