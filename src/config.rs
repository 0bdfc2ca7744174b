//! # Configuration
//!
//! Optional YAML file tuning segmentation, layout and rendering. Every key is
//! optional; missing keys keep their defaults.
//!
//! ```yaml
//! reference-tonic: C
//! max-units: 20
//! max-tracks: 2
//! text-empty-chords: drop
//! track-empty-chords: label
//! placeholder-label: "?"
//! slot-width: 150
//! row-height: 10
//! hue-step: 30
//! label-centering: slot
//! glyph-width: 17
//! font-size: 30
//! background: "#000000"
//! soundfont-dir: assets/soundfont
//! soundfont: sgmv2
//! gain: 2
//! ```

use crate::error::ChordrollError;
use crate::layout::{GlyphAdvance, LabelCentering, LayoutOptions, PixelScale};
use crate::render::{Soundfont, SvgStyle};
use crate::segment::{EmptyChordPolicy, SegmentOptions};
use crate::theory::{Letter, PitchClass};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Raw configuration for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RawConfig {
    pub reference_tonic: Option<String>,
    pub max_units: Option<f64>,
    pub max_tracks: Option<usize>,
    pub text_empty_chords: Option<EmptyChordPolicy>,
    pub track_empty_chords: Option<EmptyChordPolicy>,
    pub placeholder_label: Option<String>,
    pub slot_width: Option<f64>,
    pub row_height: Option<f64>,
    pub hue_step: Option<u32>,
    pub label_centering: Option<LabelCentering>,
    pub glyph_width: Option<f64>,
    pub font_size: Option<f64>,
    pub background: Option<String>,
    pub soundfont_dir: Option<PathBuf>,
    pub soundfont: Option<Soundfont>,
    pub gain: Option<f64>,
}

/// Validated settings for every stage
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Major tonic roman numerals are read against
    pub reference_tonic: PitchClass,
    /// Empty-chord policy for chord text input
    pub text_empty_chords: EmptyChordPolicy,
    pub segment: SegmentOptions,
    pub layout: LayoutOptions,
    pub glyph_width: f64,
    pub svg: SvgStyle,
    pub soundfont_dir: PathBuf,
    pub soundfont: Soundfont,
    pub gain: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reference_tonic: PitchClass::natural(Letter::C),
            text_empty_chords: EmptyChordPolicy::Drop,
            segment: SegmentOptions::default(),
            layout: LayoutOptions::default(),
            glyph_width: 17.0,
            svg: SvgStyle::default(),
            soundfont_dir: PathBuf::from("assets/soundfont"),
            soundfont: Soundfont::default(),
            gain: 2.0,
        }
    }
}

fn positive(name: &str, value: f64) -> Result<f64, ChordrollError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ChordrollError::Config(format!("{} must be positive, got {}", name, value)))
    }
}

impl Config {
    /// Parse YAML text. An empty document gives the defaults.
    pub fn from_yaml(content: &str) -> Result<Self, ChordrollError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let raw: RawConfig =
            serde_yaml::from_str(content).map_err(|e| ChordrollError::Config(e.to_string()))?;
        Self::from_raw(raw)
    }

    /// Read and parse a YAML file
    pub fn load(path: &Path) -> Result<Self, ChordrollError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ChordrollError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml(&content)
    }

    fn from_raw(raw: RawConfig) -> Result<Self, ChordrollError> {
        let defaults = Self::default();

        let reference_tonic = match &raw.reference_tonic {
            Some(tonic) => PitchClass::parse(tonic).ok_or_else(|| {
                ChordrollError::Config(format!("Invalid reference tonic: {}", tonic))
            })?,
            None => defaults.reference_tonic,
        };

        let segment = SegmentOptions {
            max_units: positive("max-units", raw.max_units.unwrap_or(defaults.segment.max_units))?,
            max_tracks: raw.max_tracks.unwrap_or(defaults.segment.max_tracks),
            empty_chords: raw.track_empty_chords.unwrap_or(defaults.segment.empty_chords),
        };

        let layout = LayoutOptions {
            scale: PixelScale {
                width: positive("slot-width", raw.slot_width.unwrap_or(defaults.layout.scale.width))?,
                height: positive("row-height", raw.row_height.unwrap_or(defaults.layout.scale.height))?,
            },
            label_centering: raw.label_centering.unwrap_or(defaults.layout.label_centering),
            hue_step: raw.hue_step.unwrap_or(defaults.layout.hue_step),
            placeholder: raw.placeholder_label.unwrap_or(defaults.layout.placeholder),
            chord_octave: defaults.layout.chord_octave,
        };

        let glyph_width = raw.glyph_width.unwrap_or(defaults.glyph_width);
        if !(glyph_width.is_finite() && glyph_width >= 0.0) {
            return Err(ChordrollError::Config(format!(
                "glyph-width must not be negative, got {}",
                glyph_width
            )));
        }

        let svg = SvgStyle {
            font_size: positive("font-size", raw.font_size.unwrap_or(defaults.svg.font_size))?,
            background: match raw.background {
                Some(bg) if bg.trim().is_empty() || bg == "none" => None,
                Some(bg) => Some(bg),
                None => defaults.svg.background,
            },
            ..defaults.svg
        };

        Ok(Self {
            reference_tonic,
            text_empty_chords: raw.text_empty_chords.unwrap_or(defaults.text_empty_chords),
            segment,
            layout,
            glyph_width,
            svg,
            soundfont_dir: raw.soundfont_dir.unwrap_or(defaults.soundfont_dir),
            soundfont: raw.soundfont.unwrap_or(defaults.soundfont),
            gain: positive("gain", raw.gain.unwrap_or(defaults.gain))?,
        })
    }

    /// Label measurement matching the configured glyph width
    pub fn text_metrics(&self) -> GlyphAdvance {
        GlyphAdvance(self.glyph_width)
    }

    /// Path of the configured soundfont, or of `override_font` when given
    pub fn soundfont_path(&self, override_font: Option<Soundfont>) -> PathBuf {
        override_font
            .unwrap_or(self.soundfont)
            .path_in(&self.soundfont_dir)
    }
}
