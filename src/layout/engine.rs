//! Draw plan generation
//!
//! Pure geometry: no drawing surface is involved, so coordinates can be
//! checked directly.

use super::types::{DrawPlan, Label, LabelCentering, LayoutOptions, Rect, TextMeasure};
use crate::segment::TrackProgression;
use crate::theory::ResolvedChord;

/// Rows left under the lowest note for the label line
const HEADROOM_ROWS: f64 = 7.0;

/// Label baseline, in rows below the top of the lowest note row
const LABEL_ROW: f64 = 5.0;

/// The two input shapes the layout accepts
#[derive(Debug, Clone, Copy)]
pub enum Timeline<'a> {
    /// Chords without timing, one equal-width slot each
    Slots(&'a [ResolvedChord]),
    /// A segmented track with per-note timing
    Track(&'a TrackProgression),
}

/// Lay out a timeline.
///
/// # Coordinates
/// - one time unit is `scale.width` pixels, one semitone row is `scale.height`
/// - the highest pitch sits in row 0
/// - labels share one baseline five rows below the lowest note row
/// - canvas height leaves seven rows beyond the pitch range
///
/// # Colors
/// Hue starts at 0 and advances by `hue_step` after every segment that placed
/// at least one rectangle.
///
/// # Example
/// ```rust
/// use chordroll::{layout, ChordDictionary, ChordOracle, GlyphAdvance, LayoutOptions, Timeline};
///
/// let chords = vec![ChordDictionary.chord("C"), ChordDictionary.chord("G")];
/// let plan = layout(Timeline::Slots(&chords), &LayoutOptions::default(), &GlyphAdvance(10.0));
///
/// assert_eq!(plan.canvas_width, 300.0);
/// assert_eq!(plan.labels[1].text, "G");
/// assert_eq!(plan.labels[1].x, 150.0 + 75.0 - 5.0);
/// ```
pub fn layout(timeline: Timeline<'_>, options: &LayoutOptions, metrics: &impl TextMeasure) -> DrawPlan {
    match timeline {
        Timeline::Slots(chords) => layout_slots(chords, options, metrics),
        Timeline::Track(progression) => layout_track(progression, options, metrics),
    }
}

fn label_text<'a>(chord: &'a ResolvedChord, options: &'a LayoutOptions) -> &'a str {
    if chord.is_empty() {
        &options.placeholder
    } else {
        &chord.symbol
    }
}

fn layout_slots(chords: &[ResolvedChord], options: &LayoutOptions, metrics: &impl TextMeasure) -> DrawPlan {
    let (w, h) = (options.scale.width, options.scale.height);
    let voicings: Vec<Vec<u8>> = chords
        .iter()
        .map(|chord| chord.midi_notes(options.chord_octave))
        .collect();

    let (min_pitch, max_pitch) = voicings
        .iter()
        .flatten()
        .fold(None, |range: Option<(u8, u8)>, &midi| match range {
            Some((min, max)) => Some((min.min(midi), max.max(midi))),
            None => Some((midi, midi)),
        })
        .unwrap_or((0, 0));
    let rows = (max_pitch - min_pitch) as f64;

    let mut plan = DrawPlan {
        canvas_width: chords.len() as f64 * w,
        canvas_height: (rows + HEADROOM_ROWS) * h,
        ..DrawPlan::default()
    };

    let mut hue = 0;
    for (segment, (chord, notes)) in chords.iter().zip(&voicings).enumerate() {
        let x = segment as f64 * w;
        for &midi in notes {
            plan.rectangles.push(Rect {
                x,
                y: (max_pitch - midi) as f64 * h,
                width: w,
                height: h,
                hue,
                segment,
            });
        }

        let text = label_text(chord, options);
        plan.labels.push(Label {
            text: text.to_string(),
            x: x + w / 2.0 - metrics.text_width(text) / 2.0,
            y: (rows + LABEL_ROW) * h,
            segment,
        });

        if !notes.is_empty() {
            hue += options.hue_step;
        }
    }

    plan
}

fn layout_track(progression: &TrackProgression, options: &LayoutOptions, metrics: &impl TextMeasure) -> DrawPlan {
    let (w, h) = (options.scale.width, options.scale.height);
    let max_pitch = progression.max_pitch;
    let rows = max_pitch.saturating_sub(progression.min_pitch) as f64;

    let mut plan = DrawPlan {
        canvas_width: progression.duration * w,
        canvas_height: (rows + HEADROOM_ROWS) * h,
        ..DrawPlan::default()
    };

    let mut hue = 0;
    for (index, segment) in progression.segments.iter().enumerate() {
        if segment.members.is_empty() {
            continue;
        }
        for note in &segment.members {
            plan.rectangles.push(Rect {
                x: note.position * w,
                y: max_pitch.saturating_sub(note.pitch) as f64 * h,
                width: note.length * w,
                height: h,
                hue,
                segment: index,
            });
        }

        let start = segment.position() * w;
        let span = match options.label_centering {
            LabelCentering::Slot => w,
            LabelCentering::Note => segment.span() * w,
        };
        let text = label_text(&segment.chord, options);
        plan.labels.push(Label {
            text: text.to_string(),
            x: start + span / 2.0 - metrics.text_width(text) / 2.0,
            y: (rows + LABEL_ROW) * h,
            segment: index,
        });

        hue += options.hue_step;
    }

    plan
}
