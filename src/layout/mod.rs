//! # Layout Module
//!
//! Convert chord progressions into a piano-roll draw plan.
//!
//! ## Purpose
//! The renderer only paints. Every coordinate it needs (note rectangles,
//! colors, chord labels and the canvas size) is computed here from either
//! input shape:
//! 1. **Slots** - a flat chord list from the text path; chord `i` fills
//!    `[i * width, (i + 1) * width)` and its tones are voiced from the tonic
//! 2. **Track** - a [`TrackProgression`](crate::TrackProgression) from the
//!    file path; every note keeps its own position and length
//!
//! ## Sub-modules
//! - `types` - DrawPlan, Rect, Label, LayoutOptions, TextMeasure
//! - `engine` - the layout itself
//!
//! ## Entry Point
//! [`layout()`] - pure function of its inputs; same input, same plan

mod engine;
mod types;


pub use engine::{layout, Timeline};
pub use types::{
    DrawPlan, GlyphAdvance, Label, LabelCentering, LayoutOptions, PixelScale, Rect, TextMeasure,
};
