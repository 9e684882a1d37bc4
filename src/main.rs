//! Triadic CLI binary

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use log::info;
use std::path::PathBuf;
use triadic::audio::MidiInputHandle;
use triadic::{load_options, DrillOptions, ReplConfig, SequenceMode};

/// Triad drills in the terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Root order: random or circle (of fifths)
    #[arg(short, long, default_value = "random")]
    mode: SequenceMode,

    /// Seed for reproducible drills
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file with drill options
    #[arg(short, long)]
    options: Option<PathBuf>,

    /// MIDI input port to answer from (partial name)
    #[arg(long)]
    midi_in: Option<String>,

    /// List MIDI input ports and exit
    #[arg(long)]
    list_midi: bool,

    /// Run without sound
    #[arg(long)]
    no_audio: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if cli.list_midi {
        for port in MidiInputHandle::list_ports()? {
            println!("{}", port);
        }
        return Ok(());
    }

    let options = match &cli.options {
        Some(path) => load_options(path)?,
        None => DrillOptions::default(),
    };
    info!("starting in {} mode with {:?}", cli.mode, options);

    triadic::start(ReplConfig {
        options,
        mode: cli.mode,
        seed: cli.seed,
        midi_in: cli.midi_in,
        audio: !cli.no_audio,
    })
}
