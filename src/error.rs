//! # Error Types
//!
//! This module defines all error types for chordroll.
//!
//! "No chord found" is never an error: an unresolvable symbol or a cluster the
//! oracle cannot name comes back as an empty [`ResolvedChord`](crate::ResolvedChord).
//! The variants here cover structurally broken input and external failures only.
//!
//! ## Error Types
//! - `Midi` - the note-event file could not be parsed at all
//! - `InvalidTrack` - a track or segmentation parameter violates its invariants
//! - `Config` - invalid YAML configuration
//! - `Subprocess` - synthesis or transcoding tool failed
//! - `Io` - filesystem failure around the subprocess pipeline
//!
//! ## Usage
//! ```rust
//! use chordroll::{read_midi, ChordrollError};
//!
//! match read_midi(b"not a midi file") {
//!     Ok(file) => println!("{} tracks", file.tracks.len()),
//!     Err(ChordrollError::Midi(message)) => eprintln!("bad file: {}", message),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChordrollError {
    /// The MIDI byte buffer could not be parsed.
    ///
    /// # Example
    /// ```
    /// # use chordroll::ChordrollError;
    /// let err = ChordrollError::Midi("unexpected end of file".to_string());
    /// assert_eq!(err.to_string(), "Invalid MIDI file: unexpected end of file");
    /// ```
    #[error("Invalid MIDI file: {0}")]
    Midi(String),

    /// A track handed to the segmentation engine breaks its input contract.
    ///
    /// # Example
    /// ```
    /// # use chordroll::ChordrollError;
    /// let err = ChordrollError::InvalidTrack {
    ///     track: 1,
    ///     message: "onset 10 after onset 20".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Invalid track 1: onset 10 after onset 20");
    /// ```
    #[error("Invalid track {track}: {message}")]
    InvalidTrack { track: usize, message: String },

    /// Invalid configuration value or YAML syntax.
    #[error("Invalid config: {0}")]
    Config(String),

    /// An external tool exited unsuccessfully or could not be started.
    #[error("{program} failed: {message}")]
    Subprocess { program: String, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
