//! Integration tests for chordroll
//!
//! Tests both pipelines end to end: chord text to draw plan, and MIDI bytes to
//! segmented tracks to draw plan, plus SVG output and configuration.

use chordroll::{
    chords_from_text, plan_chords, plan_track, to_svg, tracks_from_midi, ChordrollError, Config,
    ResolveMode,
};
use midly::num::{u15, u28, u4, u7};
use midly::{Format, Header, MetaMessage, MidiMessage, Smf, Timing, TrackEvent, TrackEventKind};

const TPQ: u16 = 96;

fn midi_event(delta: u32, message: MidiMessage) -> TrackEvent<'static> {
    TrackEvent {
        delta: u28::new(delta),
        kind: TrackEventKind::Midi {
            channel: u4::new(0),
            message,
        },
    }
}

/// A track of block chords: each entry sounds all its keys for `length` ticks,
/// after `rest` ticks of silence.
fn chord_track(chords: &[(u32, &[u8], u32)]) -> Vec<TrackEvent<'static>> {
    let mut events = Vec::new();
    for &(rest, keys, length) in chords {
        for (i, &key) in keys.iter().enumerate() {
            let delta = if i == 0 { rest } else { 0 };
            events.push(midi_event(
                delta,
                MidiMessage::NoteOn {
                    key: u7::new(key),
                    vel: u7::new(100),
                },
            ));
        }
        for (i, &key) in keys.iter().enumerate() {
            let delta = if i == 0 { length } else { 0 };
            events.push(midi_event(
                delta,
                MidiMessage::NoteOff {
                    key: u7::new(key),
                    vel: u7::new(0),
                },
            ));
        }
    }
    events.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    });
    events
}

fn midi_file(tracks: Vec<Vec<TrackEvent<'static>>>) -> Vec<u8> {
    let mut smf = Smf::new(Header::new(Format::Parallel, Timing::Metrical(u15::new(TPQ))));
    smf.tracks = tracks;
    let mut bytes = Vec::new();
    smf.write_std(&mut bytes).unwrap();
    bytes
}

fn symbols(chords: &[chordroll::ResolvedChord]) -> Vec<&str> {
    chords.iter().map(|chord| chord.symbol.as_str()).collect()
}

#[test]
fn test_chord_text_to_plan() {
    let config = Config::default();
    let chords = chords_from_text("C-G-Am-F", ResolveMode::Literal, &config);
    assert_eq!(symbols(&chords), ["C", "G", "Am", "F"]);

    let plan = plan_chords(&chords, &config);
    assert_eq!(plan.canvas_width, 600.0);
    // C4 (60) up to E5 (76): 16 rows plus 7 rows of headroom
    assert_eq!(plan.canvas_height, 230.0);
    assert_eq!(plan.rectangles.len(), 12);

    let labels: Vec<&str> = plan.labels.iter().map(|label| label.text.as_str()).collect();
    assert_eq!(labels, ["C", "G", "Am", "F"]);
    assert!(plan.labels.iter().all(|label| label.y == 210.0));

    let hues: Vec<u32> = plan.rectangles.iter().map(|rect| rect.hue).collect();
    assert_eq!(hues, [0, 0, 0, 30, 30, 30, 60, 60, 60, 90, 90, 90]);
}

#[test]
fn test_roman_numerals_to_chords() {
    let config = Config::default();

    let major = chords_from_text("I-V-vi-IV", ResolveMode::MajorRoman, &config);
    assert_eq!(symbols(&major), ["C", "G", "Am", "F"]);

    let minor = chords_from_text("i-iv-v", ResolveMode::MinorRoman, &config);
    assert_eq!(symbols(&minor), ["Am", "Dm", "Em"]);

    let in_g = Config::from_yaml("reference-tonic: G").unwrap();
    let major = chords_from_text("I-IV-V", ResolveMode::MajorRoman, &in_g);
    assert_eq!(symbols(&major), ["G", "C", "D"]);
}

#[test]
fn test_unknown_chords_follow_text_policy() {
    let config = Config::default();
    let chords = chords_from_text("C-Xyz-G", ResolveMode::Literal, &config);
    assert_eq!(symbols(&chords), ["C", "G"]);

    let config = Config::from_yaml("text-empty-chords: label").unwrap();
    let chords = chords_from_text("C-Xyz-G", ResolveMode::Literal, &config);
    assert_eq!(chords.len(), 3);
    assert!(chords[1].is_empty());

    let plan = plan_chords(&chords, &config);
    assert_eq!(plan.canvas_width, 450.0);
    assert_eq!(plan.labels[1].text, "?");
    assert!(plan.rectangles.iter().all(|rect| rect.segment != 1));
    // The empty slot does not advance the color
    assert_eq!(plan.rectangles.last().map(|rect| rect.hue), Some(30));
}

#[test]
fn test_nothing_to_draw() {
    let config = Config::default();
    let chords = chords_from_text("", ResolveMode::Literal, &config);
    assert!(chords.is_empty());
    assert!(plan_chords(&chords, &config).is_blank());
}

#[test]
fn test_midi_to_plan() {
    let bytes = midi_file(vec![chord_track(&[
        (0, &[60, 64, 67], 96),
        (0, &[57, 60, 64], 96),
    ])]);
    let config = Config::default();

    let tracks = tracks_from_midi(&bytes, &config).unwrap();
    assert_eq!(tracks.len(), 1);
    let progression = &tracks[0];
    let found: Vec<&str> = progression
        .segments
        .iter()
        .map(|segment| segment.chord.symbol.as_str())
        .collect();
    assert_eq!(found, ["C", "Am"]);
    assert_eq!(progression.min_pitch, 57);
    assert_eq!(progression.max_pitch, 67);
    assert_eq!(progression.duration, 2.0);

    let plan = plan_track(progression, &config);
    assert_eq!(plan.canvas_width, 300.0);
    assert_eq!(plan.canvas_height, 170.0);
    assert_eq!(plan.rectangles.len(), 6);
    assert_eq!(plan.labels.len(), 2);
    assert_eq!(plan.labels[1].y, 150.0);

    let svg = to_svg(&plan, &config.svg);
    assert!(svg.contains(r#"width="300" height="170""#));
    assert!(svg.contains("hsl(30, 100%, 50%)"));
    assert!(svg.contains(">Am</text>"));
}

#[test]
fn test_midi_leading_silence_is_removed() {
    let bytes = midi_file(vec![chord_track(&[(192, &[62, 65, 69], 96)])]);
    let tracks = tracks_from_midi(&bytes, &Config::default()).unwrap();

    let segment = &tracks[0].segments[0];
    assert_eq!(segment.chord.symbol, "Dm");
    assert_eq!(segment.position(), 0.0);
    assert_eq!(tracks[0].duration, 1.0);
}

#[test]
fn test_midi_track_limit_skips_empty_tracks() {
    let conductor = vec![TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    }];
    let bytes = midi_file(vec![
        conductor,
        chord_track(&[(0, &[60, 64, 67], 96)]),
        chord_track(&[(0, &[55, 59, 62], 96)]),
        chord_track(&[(0, &[53, 57, 60], 96)]),
    ]);

    let tracks = tracks_from_midi(&bytes, &Config::default()).unwrap();
    let indices: Vec<usize> = tracks.iter().map(|progression| progression.track).collect();
    assert_eq!(indices, [1, 2]);
    assert_eq!(tracks[1].segments[0].chord.symbol, "G");

    let config = Config::from_yaml("max-tracks: 5").unwrap();
    assert_eq!(tracks_from_midi(&bytes, &config).unwrap().len(), 3);
}

#[test]
fn test_midi_window_limits_segments() {
    let bytes = midi_file(vec![chord_track(&[
        (0, &[60, 64, 67], 96),
        (0, &[57, 60, 64], 96),
        (0, &[77, 81, 84], 96),
    ])]);
    let config = Config::from_yaml("max-units: 2").unwrap();

    let tracks = tracks_from_midi(&bytes, &config).unwrap();
    assert_eq!(tracks[0].segments.len(), 2);
    assert_eq!(tracks[0].duration, 2.0);
    // Only the first F note is walked before the stop; it still widens the range
    assert_eq!(tracks[0].max_pitch, 77);
}

#[test]
fn test_unnamed_clusters_follow_track_policy() {
    // A lone note has no chord name
    let bytes = midi_file(vec![chord_track(&[(0, &[60], 96), (0, &[60, 64, 67], 96)])]);

    let labelled = tracks_from_midi(&bytes, &Config::default()).unwrap();
    assert_eq!(labelled[0].segments.len(), 2);
    let plan = plan_track(&labelled[0], &Config::default());
    assert_eq!(plan.labels[0].text, "?");

    let config = Config::from_yaml("track-empty-chords: drop").unwrap();
    let dropped = tracks_from_midi(&bytes, &config).unwrap();
    assert_eq!(dropped[0].segments.len(), 1);
    assert_eq!(dropped[0].segments[0].chord.symbol, "C");
}

#[test]
fn test_melody_track_does_not_take_a_track_slot() {
    let melody = chord_track(&[(0, &[72], 96), (0, &[73], 96), (0, &[74], 96), (0, &[75], 96)]);
    let bytes = midi_file(vec![
        melody,
        chord_track(&[(0, &[60, 64, 67], 96)]),
        chord_track(&[(0, &[57, 60, 64], 96)]),
    ]);

    let tracks = tracks_from_midi(&bytes, &Config::default()).unwrap();
    let found: Vec<(usize, &str)> = tracks
        .iter()
        .map(|progression| (progression.track, progression.segments[0].chord.symbol.as_str()))
        .collect();
    assert_eq!(found, [(1, "C"), (2, "Am")]);
    assert!(tracks.iter().all(|progression| progression.names_a_chord()));
}

#[test]
fn test_unresolved_text_draws_nothing() {
    let config = Config::from_yaml("text-empty-chords: label").unwrap();
    let chords = chords_from_text("x-y", ResolveMode::Literal, &config);
    assert_eq!(chords.len(), 2);
    assert!(chords.iter().all(|chord| chord.is_empty()));
    assert!(plan_chords(&chords, &config).is_blank());
}

#[test]
fn test_progression_json() {
    let bytes = midi_file(vec![chord_track(&[(0, &[60, 64, 67], 96)])]);
    let tracks = tracks_from_midi(&bytes, &Config::default()).unwrap();

    let json = serde_json::to_value(&tracks).unwrap();
    assert_eq!(json[0]["minPitch"], 60);
    assert_eq!(json[0]["segments"][0]["chord"]["symbol"], "C");
    assert_eq!(json[0]["segments"][0]["chord"]["isEmpty"], false);
    assert_eq!(json[0]["segments"][0]["members"][2]["pitch"], 67);
}

#[test]
fn test_bad_midi_is_an_error() {
    match tracks_from_midi(b"MThd", &Config::default()) {
        Err(ChordrollError::Midi(_)) => {}
        other => panic!("expected Midi error, got {:?}", other),
    }
}
