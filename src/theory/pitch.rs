//! Note letters and enharmonic-aware pitch classes.

use serde::{Serialize, Serializer};
use std::fmt;

/// Note letters C through B
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    pub const ALL: [Letter; 7] = [
        Letter::C,
        Letter::D,
        Letter::E,
        Letter::F,
        Letter::G,
        Letter::A,
        Letter::B,
    ];

    /// Parse a letter, either case
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            'E' => Some(Letter::E),
            'F' => Some(Letter::F),
            'G' => Some(Letter::G),
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Letter::C => 'C',
            Letter::D => 'D',
            Letter::E => 'E',
            Letter::F => 'F',
            Letter::G => 'G',
            Letter::A => 'A',
            Letter::B => 'B',
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Semitones above C of the natural letter
    pub fn semitone(self) -> i8 {
        const OFFSETS: [i8; 7] = [0, 2, 4, 5, 7, 9, 11];
        OFFSETS[self.index()]
    }

    /// The letter `steps` diatonic steps above this one
    pub fn step(self, steps: usize) -> Letter {
        Self::ALL[(self.index() + steps) % Self::ALL.len()]
    }
}

/// A note name without octave: letter plus alteration (sharps positive, flats negative).
///
/// # Examples
/// ```
/// use chordroll::PitchClass;
///
/// assert_eq!(PitchClass::from_midi(61).to_string(), "C#");
/// assert_eq!(PitchClass::parse("Bb").unwrap().chroma(), 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PitchClass {
    pub letter: Letter,
    pub alteration: i8,
}

impl PitchClass {
    pub const fn new(letter: Letter, alteration: i8) -> Self {
        Self { letter, alteration }
    }

    pub const fn natural(letter: Letter) -> Self {
        Self::new(letter, 0)
    }

    /// Spell a MIDI note number, preferring sharps
    pub fn from_midi(midi: u8) -> Self {
        const SPELLING: [(Letter, i8); 12] = [
            (Letter::C, 0),
            (Letter::C, 1),
            (Letter::D, 0),
            (Letter::D, 1),
            (Letter::E, 0),
            (Letter::F, 0),
            (Letter::F, 1),
            (Letter::G, 0),
            (Letter::G, 1),
            (Letter::A, 0),
            (Letter::A, 1),
            (Letter::B, 0),
        ];
        let (letter, alteration) = SPELLING[(midi % 12) as usize];
        Self::new(letter, alteration)
    }

    /// Spell `chroma` on a fixed letter, choosing the nearest alteration.
    pub fn spelled(letter: Letter, chroma: u8) -> Self {
        let mut alteration = (chroma as i8 - letter.semitone()).rem_euclid(12);
        if alteration > 6 {
            alteration -= 12;
        }
        Self::new(letter, alteration)
    }

    /// Position within the octave, 0 = C
    pub fn chroma(&self) -> u8 {
        (self.letter.semitone() as i16 + self.alteration as i16).rem_euclid(12) as u8
    }

    /// Parse a leading pitch class and return it with the unparsed remainder.
    ///
    /// Accidentals are a run of `#` or a run of `b` directly after the letter.
    pub fn parse_prefix(s: &str) -> Option<(Self, &str)> {
        let mut chars = s.char_indices();
        let (_, first) = chars.next()?;
        let letter = Letter::from_char(first)?;
        let rest = &s[first.len_utf8()..];

        let sharps = rest.chars().take_while(|&c| c == '#').count();
        if sharps > 0 {
            return Some((Self::new(letter, sharps as i8), &rest[sharps..]));
        }
        let flats = rest.chars().take_while(|&c| c == 'b').count();
        Some((Self::new(letter, -(flats as i8)), &rest[flats..]))
    }

    /// Parse a complete pitch class string like `"F#"` or `"Eb"`
    pub fn parse(s: &str) -> Option<Self> {
        match Self::parse_prefix(s.trim())? {
            (pc, "") => Some(pc),
            _ => None,
        }
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter.as_char())?;
        let accidental = if self.alteration > 0 { '#' } else { 'b' };
        for _ in 0..self.alteration.unsigned_abs() {
            write!(f, "{}", accidental)?;
        }
        Ok(())
    }
}

impl Serialize for PitchClass {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
