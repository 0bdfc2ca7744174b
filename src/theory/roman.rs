//! Key-relative roman numeral expansion
//!
//! `bVII7` in C becomes `Bb7`, `ii` becomes `Dm`, `V7` becomes `G7`.

use super::pitch::PitchClass;

const NUMERALS: [&str; 7] = ["I", "II", "III", "IV", "V", "VI", "VII"];

/// Semitones above the tonic of each major-scale degree
const DEGREE_SEMITONES: [i16; 7] = [0, 2, 4, 5, 7, 9, 11];

/// A parsed roman numeral chord: accidentals, degree, case and quality suffix
#[derive(Debug, Clone, PartialEq)]
pub struct RomanNumeral {
    pub alteration: i8,
    /// Zero-based scale degree
    pub degree: usize,
    /// Upper-case numeral
    pub major: bool,
    pub suffix: String,
}

impl RomanNumeral {
    /// Parse `[#|b]*<numeral><suffix>`.
    ///
    /// The numeral is matched longest first and must be all upper or all lower case.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let accidentals = s.chars().take_while(|&c| c == '#' || c == 'b').count();
        let alteration = s[..accidentals]
            .chars()
            .map(|c| if c == '#' { 1 } else { -1 })
            .sum();
        let body = &s[accidentals..];

        for len in (1..=3).rev() {
            let Some(candidate) = body.get(..len) else {
                continue;
            };
            let upper = candidate.to_ascii_uppercase();
            let Some(degree) = NUMERALS.iter().position(|n| *n == upper) else {
                continue;
            };
            let major = candidate == upper;
            if !major && candidate != upper.to_ascii_lowercase() {
                continue;
            }
            return Some(Self {
                alteration,
                degree,
                major,
                suffix: body[len..].to_string(),
            });
        }
        None
    }

    /// Spell the chord this numeral names in the key of `tonic`.
    ///
    /// Without a suffix the numeral case picks major or minor. A lower-case
    /// numeral followed by an extension number (`ii7`, `vi9`, `iiadd9`) is
    /// read as a minor chord with that extension.
    pub fn chord_symbol(&self, tonic: PitchClass) -> String {
        let letter = tonic.letter.step(self.degree);
        let chroma = (tonic.chroma() as i16 + DEGREE_SEMITONES[self.degree] + self.alteration as i16)
            .rem_euclid(12) as u8;
        let root = PitchClass::spelled(letter, chroma);

        let extension = self
            .suffix
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_digit())
            || self.suffix.starts_with("add");

        let quality = match (self.major, self.suffix.as_str()) {
            (true, suffix) => suffix.to_string(),
            (false, "") => "m".to_string(),
            (false, suffix) if extension => format!("m{}", suffix),
            (false, suffix) => suffix.to_string(),
        };
        format!("{}{}", root, quality)
    }
}
