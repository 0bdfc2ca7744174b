//! Layout type definitions

use serde::{Deserialize, Serialize};

/// Size of one time unit (width) and one pitch row (height) in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelScale {
    pub width: f64,
    pub height: f64,
}

impl Default for PixelScale {
    fn default() -> Self {
        Self {
            width: 150.0,
            height: 10.0,
        }
    }
}

/// Where a segment label is centred on a timed track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelCentering {
    /// On a one-unit slot starting at the segment
    #[default]
    Slot,
    /// On the segment's longest note
    Note,
}

/// Layout parameters
///
/// # Fields
/// - `scale`: pixels per time unit and per pitch row
/// - `label_centering`: label placement for timed tracks
/// - `hue_step`: hue advance after each segment that drew something
/// - `placeholder`: label for segments whose chord is empty
/// - `chord_octave`: octave of the tonic when voicing untimed chords
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    pub scale: PixelScale,
    pub label_centering: LabelCentering,
    pub hue_step: u32,
    pub placeholder: String,
    pub chord_octave: i8,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            scale: PixelScale::default(),
            label_centering: LabelCentering::Slot,
            hue_step: 30,
            placeholder: "?".to_string(),
            chord_octave: 4,
        }
    }
}

/// Width of a label string in pixels
pub trait TextMeasure {
    fn text_width(&self, text: &str) -> f64;
}

/// Fixed advance per character
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphAdvance(pub f64);

impl TextMeasure for GlyphAdvance {
    fn text_width(&self, text: &str) -> f64 {
        text.chars().count() as f64 * self.0
    }
}

impl<F: Fn(&str) -> f64> TextMeasure for F {
    fn text_width(&self, text: &str) -> f64 {
        self(text)
    }
}

/// A filled note rectangle
///
/// `hue` is the raw accumulated hue; [`Rect::color`] folds it into 0..360.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub hue: u32,
    pub segment: usize,
}

impl Rect {
    /// CSS color for this rectangle
    pub fn color(&self) -> String {
        format!("hsl({}, 100%, 50%)", self.hue % 360)
    }
}

/// A chord label; `y` is the text baseline
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub segment: usize,
}

/// Everything a renderer needs to paint one timeline
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawPlan {
    pub rectangles: Vec<Rect>,
    pub labels: Vec<Label>,
    pub canvas_width: f64,
    pub canvas_height: f64,
}

impl DrawPlan {
    /// No note was placed
    pub fn is_blank(&self) -> bool {
        self.rectangles.is_empty()
    }
}
