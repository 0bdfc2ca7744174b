use chordroll::{
    chords_from_text, plan_chords, plan_track, render_audio, to_svg, tracks_from_midi,
    ChordrollError, Config, ResolveMode, ResolvedChord, Soundfont,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "chordroll")]
#[command(about = "Chord progressions from chord text and MIDI files, drawn as a piano roll", long_about = None)]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw a `-` separated chord progression, e.g. `C-G-Am-F` or `I-V-vi-IV`
    Chord {
        chords: String,

        /// Read the tokens as roman numerals in a major or minor key
        #[arg(short, long)]
        roman: Option<Key>,

        /// SVG output file
        #[arg(short, long, default_value = "chords.svg")]
        output: PathBuf,

        /// Print the resolved chords and draw plan as JSON instead
        #[arg(long)]
        json: bool,
    },

    /// Detect the chord progression of each track in a MIDI file
    Detect {
        midi: PathBuf,

        /// Output prefix; each track is written to `<prefix>-<track>.svg`
        #[arg(short, long, default_value = "track")]
        output: String,

        /// Print the progressions as JSON instead
        #[arg(long)]
        json: bool,
    },

    /// Render a MIDI file to MP3
    Play {
        midi: PathBuf,

        #[arg(short, long)]
        soundfont: Option<Soundfont>,

        #[arg(short, long)]
        gain: Option<f64>,

        #[arg(short, long, default_value = "out.mp3")]
        output: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Key {
    Major,
    Minor,
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("chordroll=info")))
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path),
        None => Ok(Config::default()),
    };
    let result = config.and_then(|config| run(cli.command, &config));

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(command: Commands, config: &Config) -> Result<(), ChordrollError> {
    match command {
        Commands::Chord {
            chords,
            roman,
            output,
            json,
        } => {
            let mode = match roman {
                None => ResolveMode::Literal,
                Some(Key::Major) => ResolveMode::MajorRoman,
                Some(Key::Minor) => ResolveMode::MinorRoman,
            };
            let resolved = chords_from_text(&chords, mode, config);
            let plan = plan_chords(&resolved, config);

            if json {
                let value = serde_json::json!({ "chords": resolved, "plan": plan });
                println!("{}", to_json(&value)?);
                return Ok(());
            }
            if resolved.iter().all(ResolvedChord::is_empty) {
                println!("nothing to show");
                return Ok(());
            }
            println!(
                "{}",
                resolved
                    .iter()
                    .map(|chord| chord_label(chord, config))
                    .collect::<Vec<_>>()
                    .join(" ")
            );
            write_svg(&output, &to_svg(&plan, &config.svg))
        }

        Commands::Detect { midi, output, json } => {
            let bytes = read_file(&midi)?;
            let tracks = tracks_from_midi(&bytes, config)?;

            if json {
                println!("{}", to_json(&tracks)?);
                return Ok(());
            }
            if tracks.is_empty() {
                println!("nothing to show");
                return Ok(());
            }
            for progression in &tracks {
                let symbols: Vec<&str> = progression
                    .segments
                    .iter()
                    .map(|segment| chord_label(&segment.chord, config))
                    .collect();
                println!("track {}: {}", progression.track, symbols.join(" "));

                let plan = plan_track(progression, config);
                let path = PathBuf::from(format!("{}-{}.svg", output, progression.track));
                write_svg(&path, &to_svg(&plan, &config.svg))?;
            }
            Ok(())
        }

        Commands::Play {
            midi,
            soundfont,
            gain,
            output,
        } => {
            let bytes = read_file(&midi)?;
            let font = config.soundfont_path(soundfont);
            let gain = gain.unwrap_or(config.gain);
            if !(gain.is_finite() && gain > 0.0) {
                return Err(ChordrollError::Config(format!("gain must be positive, got {}", gain)));
            }
            let mp3 = render_audio(&bytes, &font, gain)?;
            fs::write(&output, mp3)?;
            info!(path = %output.display(), "wrote audio");
            Ok(())
        }
    }
}

fn chord_label<'a>(chord: &'a ResolvedChord, config: &'a Config) -> &'a str {
    if chord.is_empty() {
        &config.layout.placeholder
    } else {
        &chord.symbol
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>, ChordrollError> {
    fs::read(path).map_err(|e| {
        ChordrollError::Io(std::io::Error::new(
            e.kind(),
            format!("reading '{}': {}", path.display(), e),
        ))
    })
}

fn write_svg(path: &Path, svg: &str) -> Result<(), ChordrollError> {
    fs::write(path, svg)?;
    info!(path = %path.display(), "wrote piano roll");
    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, ChordrollError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ChordrollError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))
}
