//! Built-in chord dictionary
//!
//! A table of named chord types and the [`ChordDictionary`] oracle built on it.

use super::chord::ResolvedChord;
use super::interval::{Interval, Quality};
use super::pitch::PitchClass;
use super::roman::RomanNumeral;
use super::ChordOracle;

const P1: Interval = Interval::new(1, Quality::Perfect);
const MAJ2: Interval = Interval::new(2, Quality::Major);
const MIN3: Interval = Interval::new(3, Quality::Minor);
const MAJ3: Interval = Interval::new(3, Quality::Major);
const P4: Interval = Interval::new(4, Quality::Perfect);
const DIM5: Interval = Interval::new(5, Quality::Diminished);
const P5: Interval = Interval::new(5, Quality::Perfect);
const AUG5: Interval = Interval::new(5, Quality::Augmented);
const MAJ6: Interval = Interval::new(6, Quality::Major);
const DIM7: Interval = Interval::new(7, Quality::Diminished);
const MIN7: Interval = Interval::new(7, Quality::Minor);
const MAJ7: Interval = Interval::new(7, Quality::Major);
const MAJ9: Interval = Interval::new(9, Quality::Major);

/// A named chord quality
///
/// The first alias is the canonical suffix used when a chord is detected.
#[derive(Debug)]
pub struct ChordType {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub intervals: &'static [Interval],
}

/// Chord types in detection priority order
pub const CHORD_TYPES: &[ChordType] = &[
    ChordType { name: "major", aliases: &["", "M", "maj", "^"], intervals: &[P1, MAJ3, P5] },
    ChordType { name: "minor", aliases: &["m", "min", "-"], intervals: &[P1, MIN3, P5] },
    ChordType { name: "dominant seventh", aliases: &["7", "dom"], intervals: &[P1, MAJ3, P5, MIN7] },
    ChordType { name: "major seventh", aliases: &["maj7", "M7", "Δ", "^7"], intervals: &[P1, MAJ3, P5, MAJ7] },
    ChordType { name: "minor seventh", aliases: &["m7", "min7", "-7"], intervals: &[P1, MIN3, P5, MIN7] },
    ChordType { name: "diminished", aliases: &["dim", "°", "o"], intervals: &[P1, MIN3, DIM5] },
    ChordType { name: "augmented", aliases: &["aug", "+"], intervals: &[P1, MAJ3, AUG5] },
    ChordType { name: "suspended fourth", aliases: &["sus4", "sus"], intervals: &[P1, P4, P5] },
    ChordType { name: "suspended second", aliases: &["sus2"], intervals: &[P1, MAJ2, P5] },
    ChordType { name: "half-diminished", aliases: &["m7b5", "ø", "ø7"], intervals: &[P1, MIN3, DIM5, MIN7] },
    ChordType { name: "diminished seventh", aliases: &["dim7", "°7", "o7"], intervals: &[P1, MIN3, DIM5, DIM7] },
    ChordType { name: "minor/major seventh", aliases: &["mMaj7", "mM7"], intervals: &[P1, MIN3, P5, MAJ7] },
    ChordType { name: "sixth", aliases: &["6"], intervals: &[P1, MAJ3, P5, MAJ6] },
    ChordType { name: "minor sixth", aliases: &["m6"], intervals: &[P1, MIN3, P5, MAJ6] },
    ChordType { name: "suspended fourth seventh", aliases: &["7sus4", "7sus"], intervals: &[P1, P4, P5, MIN7] },
    ChordType { name: "augmented seventh", aliases: &["aug7", "7#5", "+7"], intervals: &[P1, MAJ3, AUG5, MIN7] },
    ChordType { name: "added ninth", aliases: &["add9"], intervals: &[P1, MAJ3, P5, MAJ9] },
    ChordType { name: "minor added ninth", aliases: &["madd9"], intervals: &[P1, MIN3, P5, MAJ9] },
    ChordType { name: "dominant ninth", aliases: &["9"], intervals: &[P1, MAJ3, P5, MIN7, MAJ9] },
    ChordType { name: "major ninth", aliases: &["maj9", "M9"], intervals: &[P1, MAJ3, P5, MAJ7, MAJ9] },
    ChordType { name: "minor ninth", aliases: &["m9"], intervals: &[P1, MIN3, P5, MIN7, MAJ9] },
    ChordType { name: "fifth", aliases: &["5"], intervals: &[P1, P5] },
];

impl ChordType {
    /// Look up a chord type by any of its aliases
    pub fn find(alias: &str) -> Option<&'static ChordType> {
        CHORD_TYPES.iter().find(|ty| ty.aliases.contains(&alias))
    }

    /// Bit set of the chord's semitones above the tonic, folded into one octave
    pub fn chroma_set(&self) -> u16 {
        self.intervals
            .iter()
            .fold(0, |set, interval| set | 1 << interval.semitones().rem_euclid(12))
    }

    fn canonical_suffix(&self) -> &'static str {
        self.aliases[0]
    }
}

/// The bundled chord oracle
///
/// # Examples
/// ```
/// use chordroll::{ChordDictionary, ChordOracle, PitchClass};
///
/// let oracle = ChordDictionary;
/// let pcs: Vec<PitchClass> = [57u8, 60, 64].iter().map(|&m| oracle.pitch_class(m)).collect();
/// let chord = oracle.detect_chord(&pcs);
/// assert_eq!(chord.symbol, "Am");
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct ChordDictionary;

impl ChordOracle for ChordDictionary {
    fn pitch_class(&self, midi: u8) -> PitchClass {
        PitchClass::from_midi(midi)
    }

    fn chord(&self, symbol: &str) -> ResolvedChord {
        let symbol = symbol.trim();
        let Some((tonic, rest)) = PitchClass::parse_prefix(symbol) else {
            return ResolvedChord::none();
        };

        let (quality, bass) = match rest.rsplit_once('/') {
            Some((quality, bass)) => match PitchClass::parse(bass) {
                Some(bass) => (quality, Some(bass)),
                None => return ResolvedChord::none(),
            },
            None => (rest, None),
        };

        let Some(chord_type) = ChordType::find(quality) else {
            return ResolvedChord::none();
        };

        let mut name = format!("{}{}", tonic, quality);
        if let Some(bass) = bass {
            name.push_str(&format!("/{}", bass));
        }
        ResolvedChord {
            tonic: Some(tonic),
            symbol: name,
            intervals: chord_type.intervals.to_vec(),
            bass,
            empty: false,
        }
    }

    fn detect_chord(&self, pitch_classes: &[PitchClass]) -> ResolvedChord {
        let mut distinct: Vec<PitchClass> = Vec::with_capacity(pitch_classes.len());
        for pc in pitch_classes {
            if !distinct.iter().any(|seen| seen.chroma() == pc.chroma()) {
                distinct.push(*pc);
            }
        }
        if distinct.len() < 2 {
            return ResolvedChord::none();
        }

        let bass = distinct[0];
        for tonic in &distinct {
            let set = distinct.iter().fold(0u16, |set, pc| {
                set | 1 << (pc.chroma() as i16 - tonic.chroma() as i16).rem_euclid(12)
            });
            let Some(chord_type) = CHORD_TYPES.iter().find(|ty| ty.chroma_set() == set) else {
                continue;
            };

            let mut symbol = format!("{}{}", tonic, chord_type.canonical_suffix());
            let slash = (tonic.chroma() != bass.chroma()).then_some(bass);
            if let Some(bass) = slash {
                symbol.push_str(&format!("/{}", bass));
            }
            return ResolvedChord {
                tonic: Some(*tonic),
                symbol,
                intervals: chord_type.intervals.to_vec(),
                bass: slash,
                empty: false,
            };
        }

        ResolvedChord::none()
    }

    fn roman_to_chord_symbol(&self, tonic: PitchClass, numeral: &str) -> Option<String> {
        RomanNumeral::parse(numeral).map(|rn| rn.chord_symbol(tonic))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(midis: &[u8]) -> ResolvedChord {
        let pcs: Vec<PitchClass> = midis.iter().map(|&m| PitchClass::from_midi(m)).collect();
        ChordDictionary.detect_chord(&pcs)
    }

    #[test]
    fn test_chord_lookup() {
        let c = ChordDictionary.chord("C");
        assert!(!c.is_empty());
        assert_eq!(c.symbol, "C");
        assert_eq!(c.intervals, vec![P1, MAJ3, P5]);

        let gm7 = ChordDictionary.chord("Gm7");
        assert_eq!(gm7.tonic, PitchClass::parse("G"));
        assert_eq!(gm7.intervals.len(), 4);

        let slash = ChordDictionary.chord("C/E");
        assert_eq!(slash.bass, PitchClass::parse("E"));
        assert_eq!(slash.symbol, "C/E");
    }

    #[test]
    fn test_chord_lookup_unknown() {
        assert!(ChordDictionary.chord("").is_empty());
        assert!(ChordDictionary.chord("H7").is_empty());
        assert!(ChordDictionary.chord("Cwhatever").is_empty());
        assert!(ChordDictionary.chord("C/X").is_empty());
    }

    #[test]
    fn test_detect_root_position() {
        assert_eq!(detect(&[60, 64, 67]).symbol, "C");
        assert_eq!(detect(&[57, 60, 64]).symbol, "Am");
        assert_eq!(detect(&[55, 59, 62, 65]).symbol, "G7");
    }

    #[test]
    fn test_detect_inversion_gets_slash_bass() {
        let chord = detect(&[64, 67, 72]);
        assert_eq!(chord.symbol, "C/E");
        assert_eq!(chord.tonic, PitchClass::parse("C"));
    }

    #[test]
    fn test_detect_needs_two_pitch_classes() {
        assert!(detect(&[]).is_empty());
        assert!(detect(&[60]).is_empty());
        assert!(detect(&[60, 72]).is_empty());
        assert_eq!(detect(&[60, 67]).symbol, "C5");
    }

    #[test]
    fn test_detect_unknown_cluster() {
        assert!(detect(&[60, 61, 62]).is_empty());
    }

    #[test]
    fn test_aliases_are_unique() {
        for (i, ty) in CHORD_TYPES.iter().enumerate() {
            for alias in ty.aliases {
                assert_eq!(
                    CHORD_TYPES.iter().position(|other| other.aliases.contains(alias)),
                    Some(i),
                    "alias {:?} defined twice",
                    alias
                );
            }
        }
    }
}
