//! Resolved chord value returned by the oracle

use super::interval::Interval;
use super::pitch::PitchClass;
use serde::Serialize;

/// A named chord, or the empty chord when nothing matched.
///
/// Immutable once the oracle hands it out. For the empty chord `tonic` is
/// `None`, `symbol` is `""` and `intervals` is empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedChord {
    pub tonic: Option<PitchClass>,
    pub symbol: String,
    pub intervals: Vec<Interval>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bass: Option<PitchClass>,
    #[serde(rename = "isEmpty")]
    pub empty: bool,
}

impl ResolvedChord {
    /// The "no chord" value
    pub fn none() -> Self {
        Self {
            tonic: None,
            symbol: String::new(),
            intervals: Vec::new(),
            bass: None,
            empty: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    /// MIDI numbers of the chord tones, tonic placed in `octave` (C4 = 60).
    ///
    /// Tones falling outside 0..=127 are skipped. The empty chord has no tones.
    ///
    /// # Examples
    /// ```
    /// use chordroll::{ChordDictionary, ChordOracle};
    ///
    /// let am = ChordDictionary.chord("Am");
    /// assert_eq!(am.midi_notes(4), vec![69, 72, 76]);
    /// ```
    pub fn midi_notes(&self, octave: i8) -> Vec<u8> {
        let Some(tonic) = self.tonic else {
            return Vec::new();
        };
        let root = (octave as i16 + 1) * 12
            + tonic.letter.semitone() as i16
            + tonic.alteration as i16;

        self.intervals
            .iter()
            .map(|interval| root + interval.semitones())
            .filter(|midi| (0..=127).contains(midi))
            .map(|midi| midi as u8)
            .collect()
    }
}
