//! # Render Module
//!
//! Output stages downstream of the core pipeline.
//!
//! - `svg` - paints a [`DrawPlan`](crate::DrawPlan) as an SVG document
//! - `audio` - MIDI to MP3 through external `fluidsynth` and `ffmpeg`

mod audio;
mod svg;

pub use audio::{render_audio, synth_args, transcode_args, Soundfont};
pub use svg::{to_svg, SvgStyle};
