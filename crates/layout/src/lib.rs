//! In-memory rendering host.
//!
//! Lays out a [`markup::Fragment`] as inline text inside a fixed-size box so
//! that truncation can be driven and tested without a browser. Measurement
//! goes through [`TextMeasurer`]; the container itself is exposed through the
//! [`Surface`] seam that the truncation engine consumes.

mod inline;
mod surface;
mod text;

pub use hit_test::{HitResult, hit_test};
pub use inline::{InlineContext, InlineLayoutOptions, LineBox, LineFragment, layout_fragment};
pub use surface::{LayoutSurface, Surface};
pub use text::{FixedAdvanceMeasurer, TextMeasurer, TextStyle};

/// A rectangle in CSS px units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rectangle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rectangle {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}
