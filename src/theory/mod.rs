//! # Theory Module
//!
//! The chord oracle: everything that names, parses or spells chords.
//!
//! ## Purpose
//! The resolver and the segmentation engine never compute chord names
//! themselves. They go through [`ChordOracle`], so a different music-theory
//! backend can be swapped in without touching segmentation or layout.
//!
//! ## Sub-modules
//! - `pitch` - Letter and PitchClass (enharmonic-aware note names)
//! - `interval` - Interval in `3M` / `5P` shorthand with semitone sizes
//! - `chord` - ResolvedChord, the value every oracle call returns
//! - `dictionary` - CHORD_TYPES table and the bundled [`ChordDictionary`]
//! - `roman` - roman numeral parsing and key-relative spelling
//!
//! ## Example
//! ```rust
//! use chordroll::{ChordDictionary, ChordOracle, PitchClass};
//!
//! let oracle = ChordDictionary;
//! let symbol = oracle
//!     .roman_to_chord_symbol(PitchClass::parse("C").unwrap(), "V7")
//!     .unwrap();
//! assert_eq!(symbol, "G7");
//! assert_eq!(oracle.chord(&symbol).intervals.len(), 4);
//! ```

mod chord;
mod dictionary;
mod interval;
mod pitch;
mod roman;

pub use chord::ResolvedChord;
pub use dictionary::{ChordDictionary, ChordType, CHORD_TYPES};
pub use interval::{Interval, Quality};
pub use pitch::{Letter, PitchClass};
pub use roman::RomanNumeral;

/// Chord naming service consumed by the resolver and the segmentation engine.
///
/// Implementations must be deterministic: the same input always gives the
/// same chord.
pub trait ChordOracle {
    /// Spell a MIDI note number as a pitch class
    fn pitch_class(&self, midi: u8) -> PitchClass;

    /// Parse a chord symbol such as `"Am7"` or `"C/E"`.
    ///
    /// Unknown symbols give [`ResolvedChord::none()`].
    fn chord(&self, symbol: &str) -> ResolvedChord;

    /// Best-fit named chord for a set of pitch classes, lowest note first.
    ///
    /// Returns [`ResolvedChord::none()`] when nothing matches.
    fn detect_chord(&self, pitch_classes: &[PitchClass]) -> ResolvedChord;

    /// Expand a key-relative roman numeral into a letter chord symbol.
    fn roman_to_chord_symbol(&self, tonic: PitchClass, numeral: &str) -> Option<String>;
}
