//! Intervals in `<number><quality>` shorthand (`1P`, `3m`, `5d`, `9M`).

use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quality {
    Perfect,
    Major,
    Minor,
    Augmented,
    Diminished,
}

impl Quality {
    fn as_char(self) -> char {
        match self {
            Quality::Perfect => 'P',
            Quality::Major => 'M',
            Quality::Minor => 'm',
            Quality::Augmented => 'A',
            Quality::Diminished => 'd',
        }
    }
}

/// A diatonic interval above a tonic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    pub number: u8,
    pub quality: Quality,
}

impl Interval {
    pub const fn new(number: u8, quality: Quality) -> Self {
        Self { number, quality }
    }

    /// Size in semitones, compound intervals included (`9M` = 14)
    pub fn semitones(&self) -> i16 {
        const STEPS: [i16; 7] = [0, 2, 4, 5, 7, 9, 11];
        let zero_based = self.number.saturating_sub(1) as usize;
        let step = zero_based % 7;
        let octaves = (zero_based / 7) as i16;
        let perfect_kind = matches!(step, 0 | 3 | 4);

        let adjust = match (self.quality, perfect_kind) {
            (Quality::Perfect, _) | (Quality::Major, _) => 0,
            (Quality::Minor, _) => -1,
            (Quality::Augmented, _) => 1,
            (Quality::Diminished, true) => -1,
            (Quality::Diminished, false) => -2,
        };
        STEPS[step] + 12 * octaves + adjust
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.number, self.quality.as_char())
    }
}

impl Serialize for Interval {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
