//! Segmentation type definitions

use crate::theory::ResolvedChord;
use serde::{Deserialize, Serialize};

/// One note as delivered by the note-event source
///
/// # Fields
/// - `pitch`: MIDI note number, 0..=127
/// - `onset_tick`: tick at which the note starts sounding
/// - `duration_tick`: length in ticks
///
/// Within one track events arrive with non-decreasing `onset_tick`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteEvent {
    pub pitch: u8,
    pub onset_tick: u64,
    pub duration_tick: u64,
}

impl NoteEvent {
    pub fn new(pitch: u8, onset_tick: u64, duration_tick: u64) -> Self {
        Self {
            pitch,
            onset_tick,
            duration_tick,
        }
    }

    pub fn end_tick(&self) -> u64 {
        self.onset_tick + self.duration_tick
    }
}

/// A render-ready note in musical time units (quarter notes for MIDI files)
///
/// `position` is measured from the first onset of the track; `length` is
/// capped at the segmentation window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteData {
    pub pitch: u8,
    pub position: f64,
    pub length: f64,
}

/// One onset-aligned cluster and the chord it resolved to
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub members: Vec<NoteData>,
    pub chord: ResolvedChord,
}

impl Segment {
    /// Start of the segment in time units
    pub fn position(&self) -> f64 {
        self.members.first().map_or(0.0, |note| note.position)
    }

    /// Length of the longest member note
    pub fn span(&self) -> f64 {
        self.members.iter().map(|note| note.length).fold(0.0, f64::max)
    }
}

/// The chord progression found in one track
///
/// # Fields
/// - `track`: index of the source track in the file
/// - `segments`: clusters in discovery order
/// - `min_pitch` / `max_pitch`: pitch range over every note walked, including
///   the one that ended the walk at the window
/// - `duration`: length in time units, capped at the segmentation window
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackProgression {
    pub track: usize,
    pub segments: Vec<Segment>,
    pub min_pitch: u8,
    pub max_pitch: u8,
    pub duration: f64,
}

impl TrackProgression {
    /// At least one segment carries a chord name
    pub fn names_a_chord(&self) -> bool {
        self.segments.iter().any(|segment| !segment.chord.is_empty())
    }
}

/// What to do with clusters the oracle could not name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyChordPolicy {
    /// Leave them out of the result
    Drop,
    /// Keep them; the layout labels them with a placeholder
    Label,
}

impl EmptyChordPolicy {
    pub fn keeps(self, chord: &ResolvedChord) -> bool {
        !chord.is_empty() || self == EmptyChordPolicy::Label
    }
}

/// Segmentation parameters
///
/// # Fields
/// - `max_units`: time window in units; notes starting at or after it are ignored
/// - `max_tracks`: stop after this many tracks produced segments
/// - `empty_chords`: drop or keep clusters without a chord name
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentOptions {
    pub max_units: f64,
    pub max_tracks: usize,
    pub empty_chords: EmptyChordPolicy,
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self {
            max_units: 20.0,
            max_tracks: 2,
            empty_chords: EmptyChordPolicy::Label,
        }
    }
}
