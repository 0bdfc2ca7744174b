pub mod config;
pub mod error;
pub mod layout;
pub mod midi;
pub mod render;
pub mod resolver;
pub mod segment;
pub mod theory;

pub use config::Config;
pub use error::*;
pub use layout::{
    layout, DrawPlan, GlyphAdvance, Label, LabelCentering, LayoutOptions, PixelScale, Rect,
    TextMeasure, Timeline,
};
pub use midi::{read_midi, MidiFile};
pub use render::{render_audio, to_svg, Soundfont, SvgStyle};
pub use resolver::{minor_to_major_numeral, ChordResolver, ResolveMode, PROGRESSION_DELIMITER};
pub use segment::{
    segment_track, segment_tracks, EmptyChordPolicy, NoteData, NoteEvent, Segment, SegmentOptions,
    TrackProgression,
};
pub use theory::{ChordDictionary, ChordOracle, Interval, Letter, PitchClass, ResolvedChord};

/// Resolve a `-` separated chord or roman numeral string with the bundled
/// dictionary, applying the configured empty-chord policy for text input.
pub fn chords_from_text(input: &str, mode: ResolveMode, config: &Config) -> Vec<ResolvedChord> {
    ChordResolver::with_tonic(&ChordDictionary, config.reference_tonic)
        .resolve_progression(input, mode)
        .into_iter()
        .filter(|chord| config.text_empty_chords.keeps(chord))
        .collect()
}

/// Lay out an untimed chord list, one slot per chord
pub fn plan_chords(chords: &[ResolvedChord], config: &Config) -> DrawPlan {
    layout(Timeline::Slots(chords), &config.layout, &config.text_metrics())
}

/// Read a MIDI file and segment its tracks into chord progressions.
/// One time unit is one quarter note.
pub fn tracks_from_midi(bytes: &[u8], config: &Config) -> Result<Vec<TrackProgression>, ChordrollError> {
    let file = read_midi(bytes)?;
    segment_tracks(&ChordDictionary, &file.tracks, file.ticks_per_quarter, &config.segment)
}

/// Lay out one segmented track
pub fn plan_track(progression: &TrackProgression, config: &Config) -> DrawPlan {
    layout(Timeline::Track(progression), &config.layout, &config.text_metrics())
}
