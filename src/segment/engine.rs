//! Onset clustering and chord resolution
//!
//! Walks a track in arrival order, groups notes sharing an onset tick into
//! clusters, and names each cluster through the oracle.

use super::types::{NoteData, NoteEvent, Segment, SegmentOptions, TrackProgression};
use crate::error::ChordrollError;
use crate::theory::{ChordOracle, PitchClass, ResolvedChord};
use tracing::debug;

/// Notes collected for the onset currently being walked
struct Cluster {
    tick: u64,
    members: Vec<NoteData>,
}

impl Cluster {
    fn new(tick: u64) -> Self {
        Self {
            tick,
            members: Vec::new(),
        }
    }
}

/// Name a cluster: pitches sorted ascending, spelled, duplicate pitch classes dropped.
///
/// Member order never affects the result.
pub fn resolve_cluster<O: ChordOracle + ?Sized>(oracle: &O, members: &[NoteData]) -> ResolvedChord {
    let mut pitches: Vec<u8> = members.iter().map(|note| note.pitch).collect();
    pitches.sort_unstable();

    let mut seen = [false; 12];
    let pitch_classes: Vec<PitchClass> = pitches
        .into_iter()
        .map(|pitch| oracle.pitch_class(pitch))
        .filter(|pc| !std::mem::replace(&mut seen[pc.chroma() as usize], true))
        .collect();

    oracle.detect_chord(&pitch_classes)
}

/// Split one track into chord segments.
///
/// # Parameters
/// - `track`: index of the track in its file, carried into the result and errors
/// - `events`: the track's notes, non-decreasing by onset
/// - `ticks_per_unit`: file resolution (ticks per quarter note for MIDI)
///
/// # Returns
/// `Ok(None)` when the track has no events or every cluster was dropped.
///
/// # Windowing
/// Positions are measured from the first onset. Walking stops at the first
/// cluster starting `max_units` or more after it; that cluster is discarded.
/// Note lengths and the track duration are capped at the same window.
///
/// # Errors
/// [`ChordrollError::InvalidTrack`] for a zero resolution, a non-positive
/// window, a pitch above 127 or an onset earlier than the one before it.
///
/// # Example
/// ```rust
/// use chordroll::{segment_track, ChordDictionary, NoteEvent, SegmentOptions};
///
/// let events = [
///     NoteEvent::new(60, 0, 480),
///     NoteEvent::new(64, 0, 480),
///     NoteEvent::new(67, 0, 480),
///     NoteEvent::new(57, 480, 480),
///     NoteEvent::new(60, 480, 480),
///     NoteEvent::new(64, 480, 480),
/// ];
/// let progression = segment_track(&ChordDictionary, 0, &events, 480, &SegmentOptions::default())
///     .unwrap()
///     .unwrap();
///
/// assert_eq!(progression.segments.len(), 2);
/// assert_eq!(progression.segments[0].chord.symbol, "C");
/// assert_eq!(progression.segments[1].chord.symbol, "Am");
/// assert_eq!(progression.duration, 2.0);
/// ```
pub fn segment_track<O: ChordOracle + ?Sized>(
    oracle: &O,
    track: usize,
    events: &[NoteEvent],
    ticks_per_unit: u32,
    options: &SegmentOptions,
) -> Result<Option<TrackProgression>, ChordrollError> {
    let invalid = |message: String| ChordrollError::InvalidTrack { track, message };

    if ticks_per_unit == 0 {
        return Err(invalid("ticks per unit must be positive".to_string()));
    }
    if !(options.max_units.is_finite() && options.max_units > 0.0) {
        return Err(invalid(format!(
            "time window must be positive, got {}",
            options.max_units
        )));
    }

    let Some(first) = events.first() else {
        return Ok(None);
    };

    let unit = ticks_per_unit as f64;
    let window = unit * options.max_units;
    let gap = first.onset_tick;

    let mut cluster = Cluster::new(gap);
    let mut segments = Vec::new();
    let mut range: Option<(u8, u8)> = None;
    let mut last_end = gap;
    let mut stopped = false;

    for event in events {
        if event.pitch > 127 {
            return Err(invalid(format!("pitch {} out of range", event.pitch)));
        }
        if event.onset_tick < cluster.tick {
            return Err(invalid(format!(
                "onset {} comes after onset {}",
                event.onset_tick, cluster.tick
            )));
        }

        range = Some(match range {
            Some((min, max)) => (min.min(event.pitch), max.max(event.pitch)),
            None => (event.pitch, event.pitch),
        });
        last_end = last_end.max(event.end_tick());

        if event.onset_tick != cluster.tick {
            let finished = std::mem::replace(&mut cluster, Cluster::new(event.onset_tick));
            flush(oracle, finished, options, &mut segments);

            if (event.onset_tick - gap) as f64 >= window {
                stopped = true;
                break;
            }
        }

        cluster.members.push(NoteData {
            pitch: event.pitch,
            position: (event.onset_tick - gap) as f64 / unit,
            length: (event.duration_tick as f64).min(window) / unit,
        });
    }

    if !stopped {
        flush(oracle, cluster, options, &mut segments);
    }

    let Some((min_pitch, max_pitch)) = range else {
        return Ok(None);
    };
    if segments.is_empty() {
        return Ok(None);
    }

    let duration = ((last_end - gap) as f64).min(window) / unit;
    debug!(track, segments = segments.len(), duration, "track segmented");

    Ok(Some(TrackProgression {
        track,
        segments,
        min_pitch,
        max_pitch,
        duration,
    }))
}

fn flush<O: ChordOracle + ?Sized>(
    oracle: &O,
    cluster: Cluster,
    options: &SegmentOptions,
    segments: &mut Vec<Segment>,
) {
    if cluster.members.is_empty() {
        return;
    }
    let chord = resolve_cluster(oracle, &cluster.members);
    debug!(
        tick = cluster.tick,
        notes = cluster.members.len(),
        symbol = %chord.symbol,
        "cluster resolved"
    );
    if options.empty_chords.keeps(&chord) {
        segments.push(Segment {
            members: cluster.members,
            chord,
        });
    }
}

/// Segment every track in file order, keeping at most `options.max_tracks`
/// progressions. Tracks without a single named chord are skipped and not
/// counted, whatever the empty-chord policy.
pub fn segment_tracks<O: ChordOracle + ?Sized>(
    oracle: &O,
    tracks: &[Vec<NoteEvent>],
    ticks_per_unit: u32,
    options: &SegmentOptions,
) -> Result<Vec<TrackProgression>, ChordrollError> {
    let mut kept = Vec::new();
    for (index, events) in tracks.iter().enumerate() {
        if kept.len() >= options.max_tracks {
            break;
        }
        match segment_track(oracle, index, events, ticks_per_unit, options)? {
            Some(progression) if progression.names_a_chord() => kept.push(progression),
            Some(_) => debug!(track = index, "no chord named, track skipped"),
            None => {}
        }
    }
    Ok(kept)
}
