//! # MIDI Reader
//!
//! Turns a standard MIDI file into the ordered note events the segmentation
//! engine consumes. Byte-level parsing is done by `midly`; this module pairs
//! note-on and note-off messages into notes.
//!
//! ## Note Pairing
//! - note-on with velocity 0 counts as note-off
//! - notes are paired per channel and key, first-in first-out
//! - a note still sounding when its track ends is closed at the track end
//! - each track is returned sorted by onset tick (stable, so chord tones keep
//!   their file order)

use crate::error::ChordrollError;
use crate::segment::NoteEvent;
use midly::{MidiMessage, Smf, Timing, TrackEventKind};
use std::collections::{HashMap, VecDeque};
use tracing::debug;

/// Note events of a whole file
///
/// # Fields
/// - `ticks_per_quarter`: resolution, used as ticks per time unit
/// - `duration_ticks`: end tick of the last note in any track
/// - `tracks`: one onset-ordered event list per file track, empty tracks included
#[derive(Debug, Clone, PartialEq)]
pub struct MidiFile {
    pub ticks_per_quarter: u32,
    pub duration_ticks: u64,
    pub tracks: Vec<Vec<NoteEvent>>,
}

/// Parse a MIDI file held in memory.
///
/// # Errors
/// [`ChordrollError::Midi`] when `midly` rejects the bytes or the file uses
/// SMPTE timecode instead of ticks per quarter note.
pub fn read_midi(bytes: &[u8]) -> Result<MidiFile, ChordrollError> {
    let smf = Smf::parse(bytes).map_err(|e| ChordrollError::Midi(e.to_string()))?;

    let ticks_per_quarter = match smf.header.timing {
        Timing::Metrical(ticks) => ticks.as_int() as u32,
        Timing::Timecode(..) => {
            return Err(ChordrollError::Midi(
                "SMPTE timecode files are not supported".to_string(),
            ))
        }
    };
    if ticks_per_quarter == 0 {
        return Err(ChordrollError::Midi("zero ticks per quarter note".to_string()));
    }

    let mut tracks = Vec::with_capacity(smf.tracks.len());
    for events in &smf.tracks {
        let mut tick: u64 = 0;
        let mut sounding: HashMap<(u8, u8), VecDeque<usize>> = HashMap::new();
        let mut notes: Vec<NoteEvent> = Vec::new();

        for event in events {
            tick += event.delta.as_int() as u64;
            let TrackEventKind::Midi { channel, message } = event.kind else {
                continue;
            };
            match message {
                MidiMessage::NoteOn { key, vel } if vel.as_int() > 0 => {
                    sounding
                        .entry((channel.as_int(), key.as_int()))
                        .or_default()
                        .push_back(notes.len());
                    notes.push(NoteEvent::new(key.as_int(), tick, 0));
                }
                MidiMessage::NoteOn { key, .. } | MidiMessage::NoteOff { key, .. } => {
                    let open = sounding
                        .get_mut(&(channel.as_int(), key.as_int()))
                        .and_then(VecDeque::pop_front);
                    if let Some(index) = open {
                        notes[index].duration_tick = tick - notes[index].onset_tick;
                    }
                }
                _ => {}
            }
        }

        for index in sounding.into_values().flatten() {
            notes[index].duration_tick = tick - notes[index].onset_tick;
        }
        notes.sort_by_key(|note| note.onset_tick);
        tracks.push(notes);
    }

    let duration_ticks = tracks
        .iter()
        .flatten()
        .map(NoteEvent::end_tick)
        .max()
        .unwrap_or(0);

    debug!(
        tracks = tracks.len(),
        ticks_per_quarter,
        duration_ticks,
        "midi file read"
    );

    Ok(MidiFile {
        ticks_per_quarter,
        duration_ticks,
        tracks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use midly::num::{u15, u28, u4, u7};
    use midly::{Format, Header, MetaMessage, TrackEvent};

    fn note_on(delta: u32, key: u8, vel: u8) -> TrackEvent<'static> {
        TrackEvent {
            delta: u28::new(delta),
            kind: TrackEventKind::Midi {
                channel: u4::new(0),
                message: MidiMessage::NoteOn { key: u7::new(key), vel: u7::new(vel) },
            },
        }
    }

    fn note_off(delta: u32, key: u8) -> TrackEvent<'static> {
        TrackEvent {
            delta: u28::new(delta),
            kind: TrackEventKind::Midi {
                channel: u4::new(0),
                message: MidiMessage::NoteOff { key: u7::new(key), vel: u7::new(0) },
            },
        }
    }

    fn end_of_track(delta: u32) -> TrackEvent<'static> {
        TrackEvent {
            delta: u28::new(delta),
            kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
        }
    }

    fn encode(tracks: Vec<Vec<TrackEvent<'static>>>) -> Vec<u8> {
        let mut smf = Smf::new(Header::new(Format::Parallel, Timing::Metrical(u15::new(96))));
        smf.tracks = tracks;
        let mut bytes = Vec::new();
        smf.write_std(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn test_read_pairs_notes() {
        let bytes = encode(vec![vec![
            note_on(0, 60, 100),
            note_on(0, 64, 100),
            note_off(96, 60),
            note_on(0, 64, 0),
            note_on(0, 67, 90),
            note_off(48, 67),
            end_of_track(0),
        ]]);

        let file = read_midi(&bytes).unwrap();
        assert_eq!(file.ticks_per_quarter, 96);
        assert_eq!(
            file.tracks[0],
            vec![
                NoteEvent::new(60, 0, 96),
                NoteEvent::new(64, 0, 96),
                NoteEvent::new(67, 96, 48),
            ]
        );
        assert_eq!(file.duration_ticks, 144);
    }

    #[test]
    fn test_read_closes_dangling_notes_at_track_end() {
        let bytes = encode(vec![vec![note_on(10, 72, 100), end_of_track(50)]]);
        let file = read_midi(&bytes).unwrap();
        assert_eq!(file.tracks[0], vec![NoteEvent::new(72, 10, 50)]);
    }

    #[test]
    fn test_read_keeps_empty_tracks() {
        let bytes = encode(vec![
            vec![end_of_track(0)],
            vec![note_on(0, 60, 100), note_off(96, 60), end_of_track(0)],
        ]);
        let file = read_midi(&bytes).unwrap();
        assert_eq!(file.tracks.len(), 2);
        assert!(file.tracks[0].is_empty());
        assert_eq!(file.tracks[1].len(), 1);
    }

    #[test]
    fn test_read_rejects_garbage() {
        match read_midi(b"definitely not midi") {
            Err(ChordrollError::Midi(_)) => {}
            other => panic!("expected Midi error, got {:?}", other),
        }
    }
}
