//! MIDI to MP3 through `fluidsynth` and `ffmpeg`
//!
//! Both tools are run as plain subprocesses on scratch files. Failures are
//! reported once and never retried.

use crate::error::ChordrollError;
use clap::ValueEnum;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

/// Bundled soundfonts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Soundfont {
    Touhou,
    #[default]
    Sgmv2,
}

impl Soundfont {
    pub fn file_name(self) -> &'static str {
        match self {
            Soundfont::Touhou => "Touhou.sf2",
            Soundfont::Sgmv2 => "SGMv2.sf2",
        }
    }

    /// Path of this soundfont inside `dir`
    pub fn path_in(self, dir: &Path) -> PathBuf {
        dir.join(self.file_name())
    }
}

/// Arguments for `fluidsynth` rendering `midi` to `wav`
pub fn synth_args(wav: &Path, gain: f64, soundfont: &Path, midi: &Path) -> Vec<String> {
    vec![
        "--fast-render".to_string(),
        wav.display().to_string(),
        "--gain".to_string(),
        gain.to_string(),
        soundfont.display().to_string(),
        midi.display().to_string(),
    ]
}

/// Arguments for `ffmpeg` transcoding `wav` to a 44.1 kHz stereo 192k `mp3`
pub fn transcode_args(wav: &Path, mp3: &Path) -> Vec<String> {
    let mut args = vec!["-i".to_string(), wav.display().to_string()];
    args.extend(
        ["-vn", "-ar", "44100", "-ac", "2", "-b:a", "192k"]
            .iter()
            .map(|arg| arg.to_string()),
    );
    args.push(mp3.display().to_string());
    args
}

fn run(program: &str, args: &[String], stderr_is_failure: bool) -> Result<(), ChordrollError> {
    debug!(program, ?args, "running");
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|e| ChordrollError::Subprocess {
            program: program.to_string(),
            message: e.to_string(),
        })?;

    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if !output.status.success() || (stderr_is_failure && !stderr.is_empty()) {
        let message = if stderr.is_empty() {
            output.status.to_string()
        } else {
            stderr
        };
        return Err(ChordrollError::Subprocess {
            program: program.to_string(),
            message,
        });
    }
    Ok(())
}

/// Render MIDI bytes to MP3 bytes.
///
/// # Errors
/// - [`ChordrollError::Subprocess`] when a tool is missing, exits non-zero,
///   or `fluidsynth` writes anything to stderr
/// - [`ChordrollError::Io`] for scratch file failures
pub fn render_audio(midi: &[u8], soundfont: &Path, gain: f64) -> Result<Vec<u8>, ChordrollError> {
    let scratch = tempfile::tempdir()?;
    let midi_path = scratch.path().join("input.mid");
    let wav_path = scratch.path().join("render.wav");
    let mp3_path = scratch.path().join("render.mp3");

    std::fs::write(&midi_path, midi)?;
    run("fluidsynth", &synth_args(&wav_path, gain, soundfont, &midi_path), true)?;
    run("ffmpeg", &transcode_args(&wav_path, &mp3_path), false)?;

    let mp3 = std::fs::read(&mp3_path)?;
    info!(bytes = mp3.len(), "audio rendered");
    Ok(mp3)
}
