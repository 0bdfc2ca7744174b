//! # Chord Symbol Resolver
//!
//! Turns user tokens into resolved chords.
//!
//! ## Modes
//! - [`ResolveMode::Literal`] - the token is a chord name (`Am7`, `C/E`)
//! - [`ResolveMode::MajorRoman`] - roman numeral relative to the reference major tonic
//! - [`ResolveMode::MinorRoman`] - roman numeral relative to the relative minor
//!   of that tonic; the numeral is rotated onto its relative-major equivalent
//!   before expansion
//!
//! ## Minor Rotation
//! The minor tonic sits five diatonic steps above the relative major tonic
//! (A is the sixth degree of C), so minor degree `d` is major degree
//! `(d + 5) mod 7`: `i` becomes `vi`, `iv` becomes `ii`, `V` becomes `III`.
//!
//! ## Example
//! ```rust
//! use chordroll::{ChordDictionary, ChordResolver, ResolveMode};
//!
//! let resolver = ChordResolver::new(&ChordDictionary);
//! let chords = resolver.resolve_progression("i-iv-v", ResolveMode::MinorRoman);
//! let symbols: Vec<&str> = chords.iter().map(|c| c.symbol.as_str()).collect();
//! assert_eq!(symbols, ["Am", "Dm", "Em"]);
//! ```

use crate::theory::{ChordOracle, Letter, PitchClass, ResolvedChord};
use tracing::debug;

/// Delimiter between chords in a progression string
pub const PROGRESSION_DELIMITER: char = '-';

/// How a token is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveMode {
    Literal,
    MajorRoman,
    MinorRoman,
}

/// The seven diatonic numerals and the minor-to-relative-major rotation
struct RomanTable {
    numerals: [&'static str; 7],
    relative_major_offset: usize,
}

const ROMAN_TABLE: RomanTable = RomanTable {
    numerals: ["i", "ii", "iii", "iv", "v", "vi", "vii"],
    relative_major_offset: 5,
};

impl RomanTable {
    /// Longest leading numeral (3, 2 then 1 characters), case-insensitive.
    /// Returns the degree and the byte length of the match.
    fn match_prefix(&self, token: &str) -> Option<(usize, usize)> {
        (1..=3).rev().find_map(|len| {
            let candidate = token.get(..len)?.to_ascii_lowercase();
            let degree = self.numerals.iter().position(|n| *n == candidate)?;
            Some((degree, len))
        })
    }

    fn relative_major(&self, degree: usize) -> &'static str {
        self.numerals[(degree + self.relative_major_offset) % self.numerals.len()]
    }
}

/// Rewrite a minor-key roman numeral token as its relative-major numeral.
///
/// Leading accidentals and the quality suffix are kept; an upper-case numeral
/// stays upper-case. Returns `None` when the token has no numeral prefix.
///
/// ```
/// use chordroll::minor_to_major_numeral;
///
/// assert_eq!(minor_to_major_numeral("i").as_deref(), Some("vi"));
/// assert_eq!(minor_to_major_numeral("V7").as_deref(), Some("III7"));
/// assert_eq!(minor_to_major_numeral("bVII").as_deref(), Some("bV"));
/// assert_eq!(minor_to_major_numeral("Am"), None);
/// ```
pub fn minor_to_major_numeral(token: &str) -> Option<String> {
    let accidentals = token.chars().take_while(|&c| c == '#' || c == 'b').count();
    let (prefix, body) = token.split_at(accidentals);
    let (degree, len) = ROMAN_TABLE.match_prefix(body)?;

    let rotated = ROMAN_TABLE.relative_major(degree);
    let rotated = if body.starts_with(|c: char| c.is_ascii_uppercase()) {
        rotated.to_ascii_uppercase()
    } else {
        rotated.to_string()
    };
    Some(format!("{}{}{}", prefix, rotated, &body[len..]))
}

/// Resolves chord tokens through a [`ChordOracle`].
pub struct ChordResolver<'a, O: ChordOracle + ?Sized> {
    oracle: &'a O,
    tonic: PitchClass,
}

impl<'a, O: ChordOracle + ?Sized> ChordResolver<'a, O> {
    /// Resolver with C as the major reference tonic
    pub fn new(oracle: &'a O) -> Self {
        Self::with_tonic(oracle, PitchClass::natural(Letter::C))
    }

    pub fn with_tonic(oracle: &'a O, tonic: PitchClass) -> Self {
        Self { oracle, tonic }
    }

    /// The letter chord symbol a token stands for, before oracle lookup.
    pub fn chord_symbol(&self, token: &str, mode: ResolveMode) -> Option<String> {
        match mode {
            ResolveMode::Literal => Some(token.to_string()),
            ResolveMode::MajorRoman => self.oracle.roman_to_chord_symbol(self.tonic, token),
            ResolveMode::MinorRoman => {
                let major = minor_to_major_numeral(token)?;
                self.oracle.roman_to_chord_symbol(self.tonic, &major)
            }
        }
    }

    /// Resolve one token. Unrecognised tokens give the empty chord.
    pub fn resolve(&self, token: &str, mode: ResolveMode) -> ResolvedChord {
        match self.chord_symbol(token, mode) {
            Some(symbol) => self.oracle.chord(&symbol),
            None => ResolvedChord::none(),
        }
    }

    /// Resolve a `-` separated progression in order.
    ///
    /// Blank tokens are skipped; empty chords are kept for the caller to filter.
    pub fn resolve_progression(&self, input: &str, mode: ResolveMode) -> Vec<ResolvedChord> {
        input
            .split(PROGRESSION_DELIMITER)
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(|token| {
                let chord = self.resolve(token, mode);
                debug!(token, symbol = %chord.symbol, empty = chord.is_empty(), "resolved token");
                chord
            })
            .collect()
    }
}
