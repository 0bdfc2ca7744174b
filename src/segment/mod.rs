//! # Segmentation Module
//!
//! Turn a stream of time-stamped note events into a chord progression.
//!
//! ## Purpose
//! A performance file carries notes, not chords. This module groups notes that
//! start on the same tick into clusters and asks the oracle to name each one,
//! producing one [`TrackProgression`] per track that the layout can draw.
//!
//! ## Sub-modules
//! - `types` - NoteEvent, NoteData, Segment, TrackProgression, SegmentOptions
//! - `engine` - the clustering walk and the multi-track driver
//!
//! ## Entry Points
//! - [`segment_track()`] - one track
//! - [`segment_tracks()`] - every track of a file, bounded by `max_tracks`
//!
//! ## Clustering
//! Events are walked in arrival order. Each event either joins the pending
//! cluster (same onset tick) or closes it: the pending cluster is resolved and
//! emitted, and the event seeds the next one. The last cluster is flushed when
//! the walk ends, so a one-note track still produces one segment.
//!
//! ## Duplicate Pitches
//! Two identical pitches in one cluster both stay in `members` (two
//! rectangles). The oracle sees each pitch class once, lowest pitch first.
//!
//! ## Empty Chords
//! [`EmptyChordPolicy::Drop`] leaves unnamed clusters out;
//! [`EmptyChordPolicy::Label`] keeps them so the layout can mark them `?`.

mod engine;
mod types;


pub use engine::{resolve_cluster, segment_track, segment_tracks};
pub use types::{EmptyChordPolicy, NoteData, NoteEvent, Segment, SegmentOptions, TrackProgression};
