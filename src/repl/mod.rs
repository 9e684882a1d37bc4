//! REPL (Read-Eval-Print Loop) for the Triadic drill
//!
//! Typed lines, MIDI keys, options-file changes and the auto-advance timer
//! all arrive on channels and are handled one at a time by a single
//! `select!` loop, so the session is never touched from two threads.

use crate::audio::{AudioPlayer, MidiInputHandle};
use crate::commands::{
    create_registry, drill, options, CommandContext, CommandRegistry, CommandResult,
};
use crate::config::load_options;
use crate::repl::watcher::OptionsWatcher;
use anyhow::Result;
use colored::*;
use crossbeam_channel::{unbounded, Receiver, Sender};
use log::{debug, warn};
use notify::Event;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RustylineResult};
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};
use triadic_core::types::pitch::parse_midi_note;
use triadic_core::{DrillOptions, SequenceMode};

pub mod watcher;

/// How long a solved chord stays up before the next one appears
pub const ADVANCE_DELAY: Duration = Duration::from_millis(1200);

/// Types of events the REPL loop handles
enum ReplEvent {
    Input(Result<String, ReadlineError>),
}

/// Startup settings, usually taken from the command line
#[derive(Debug, Clone, Default)]
pub struct ReplConfig {
    pub options: DrillOptions,
    pub mode: SequenceMode,
    pub seed: Option<u64>,
    /// MIDI input port to listen on (partial name)
    pub midi_in: Option<String>,
    pub audio: bool,
}

/// Interactive REPL for the chord drill
pub struct Repl {
    editor: Option<DefaultEditor>,
    ctx: CommandContext,
    registry: CommandRegistry,

    // Event channels
    tx_input: Sender<ReplEvent>,
    rx_input: Receiver<ReplEvent>,
    rx_midi: Receiver<u8>,
    tx_watcher: Sender<notify::Result<Event>>,
    rx_watcher: Receiver<notify::Result<Event>>,

    // Options file watcher
    watcher: Option<OptionsWatcher>,
    /// When the next chord is due after a correct answer
    advance_at: Option<Instant>,
}

impl Repl {
    /// Create a new REPL instance. Audio and MIDI failures are not fatal.
    pub fn new(config: ReplConfig) -> RustylineResult<Self> {
        let editor = DefaultEditor::new()?;

        let (tx_input, rx_input) = unbounded();
        let (tx_midi, rx_midi) = unbounded();
        let (tx_watcher, rx_watcher) = unbounded();

        let mut ctx = CommandContext::new(config.options, config.mode, config.seed, tx_midi);

        if config.audio {
            let player = AudioPlayer::new().and_then(|player| {
                player.play()?;
                Ok(player)
            });
            match player {
                Ok(player) => ctx = ctx.with_audio(player),
                Err(e) => warn!("audio disabled: {}", e),
            }
        }

        if let Some(port) = &config.midi_in {
            match MidiInputHandle::connect(port, ctx.midi_tx.clone()) {
                Ok(handle) => ctx.midi = Some(handle),
                Err(e) => warn!("MIDI input disabled: {}", e),
            }
        }

        Ok(Repl {
            editor: Some(editor),
            ctx,
            registry: create_registry(),
            tx_input,
            rx_input,
            rx_midi,
            tx_watcher,
            rx_watcher,
            watcher: None,
            advance_at: None,
        })
    }

    /// Print a command result. Returns false when the REPL should exit.
    fn handle(&mut self, result: CommandResult) -> bool {
        match result {
            CommandResult::Success => {}
            CommandResult::Message(msg) => println!("{}", msg),
            CommandResult::Solved(msg) => {
                println!("{}", msg);
                self.advance_at = Some(Instant::now() + ADVANCE_DELAY);
            }
            CommandResult::Exit => {
                println!("{} 🎹", "Goodbye!".bright_cyan());
                return false;
            }
            CommandResult::NotACommand => {
                println!(
                    "{} {}",
                    "Error:".bright_red().bold(),
                    "Unknown command. Type 'help' for a list.".red()
                );
            }
            CommandResult::Error(e) => {
                println!("{} {}", "Error:".bright_red().bold(), e.red());
            }
            CommandResult::Watch(path) => self.watch(&path),
        }
        true
    }

    /// Run one typed line. Returns false when the REPL should exit.
    fn handle_line(&mut self, line: &str) -> bool {
        if line.is_empty() {
            return true;
        }

        let mut result = self.registry.execute(line, &mut self.ctx);
        if matches!(result, CommandResult::NotACommand)
            && line.split_whitespace().all(|key| parse_midi_note(key).is_ok())
        {
            result = drill::cmd_play(line, &mut self.ctx);
        }
        let keep_going = self.handle(result);

        // Anything that replaced the solved chord cancels the pending advance
        if !self.ctx.session.is_frozen() {
            self.advance_at = None;
        }
        keep_going
    }

    /// Start watching an options file and load it right away
    fn watch(&mut self, path: &str) {
        if self.watcher.is_none() {
            match OptionsWatcher::new(self.tx_watcher.clone()) {
                Ok(w) => self.watcher = Some(w),
                Err(e) => {
                    println!("{} Failed to create watcher: {}", "Error:".red(), e);
                    return;
                }
            }
        }

        if let Some(w) = &mut self.watcher {
            if let Err(e) = w.watch(path) {
                println!("{} Failed to watch {}: {}", "Error:".red(), path, e);
                return;
            }
            println!(
                "{} Watching {} for changes...",
                "👀".bright_cyan(),
                path.bright_green()
            );
        }
        self.reload_options(Path::new(path));
    }

    /// Re-read the options file; identical contents are ignored so that the
    /// burst of events one save produces only starts one new chord
    fn reload_options(&mut self, path: &Path) {
        match load_options(path) {
            Ok(loaded) if loaded == self.ctx.options => {
                debug!("{} unchanged", path.display());
            }
            Ok(loaded) => {
                println!(
                    "{} Options changed: {}",
                    "⚡".bright_yellow(),
                    path.display()
                );
                let result = options::apply(&mut self.ctx, loaded);
                self.handle(result);
            }
            Err(e) => println!("{} {:#}", "Error:".red(), e),
        }
    }

    /// Move on after a correct answer, unless something already did
    fn advance(&mut self) {
        self.advance_at = None;
        if self.ctx.session.is_frozen() {
            let result = self.ctx.next_task();
            self.handle(result);
        }
    }

    /// Start the REPL loop
    pub fn run(&mut self) -> Result<()> {
        println!(
            "{} {}",
            "🎹".bright_yellow(),
            "Triadic Chord Trainer".bright_cyan().bold()
        );
        println!(
            "Play the chord shown: {}, {} or just {}",
            "play C4 E4 G4".cyan(),
            "play 60 64 67".cyan(),
            "C4 E4 G4".cyan()
        );
        println!(
            "Type '{}' for more information, '{}' or {} to exit.\n",
            "help".bright_green(),
            "quit".bright_red(),
            "Ctrl+C".bright_red()
        );

        let Some(mut editor) = self.editor.take() else {
            return Err(anyhow::anyhow!("REPL is already running"));
        };
        let tx_input = self.tx_input.clone();

        // Move editor to thread
        thread::spawn(move || loop {
            let prompt = format!("{} ", "triadic>".bright_magenta().bold());
            match editor.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim().to_string();
                    if !line.is_empty() {
                        let _ = editor.add_history_entry(&line);
                    }
                    if tx_input.send(ReplEvent::Input(Ok(line))).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    let _ = tx_input.send(ReplEvent::Input(Err(err)));
                    break;
                }
            }
        });

        let first = self.ctx.next_task();
        self.handle(first);

        let rx_input = self.rx_input.clone();
        let rx_midi = self.rx_midi.clone();
        let rx_watcher = self.rx_watcher.clone();

        loop {
            let timer = match self.advance_at {
                Some(at) => crossbeam_channel::at(at),
                None => crossbeam_channel::never(),
            };

            crossbeam_channel::select! {
                recv(rx_input) -> msg => match msg {
                    Ok(ReplEvent::Input(Ok(line))) => {
                        if !self.handle_line(&line) {
                            break;
                        }
                    }
                    Ok(ReplEvent::Input(Err(ReadlineError::Interrupted | ReadlineError::Eof))) => {
                        println!("{} 🎹", "Goodbye!".bright_cyan());
                        break;
                    }
                    Ok(ReplEvent::Input(Err(err))) => {
                        println!(
                            "{} {}",
                            "Error reading input:".bright_red().bold(),
                            err.to_string().red()
                        );
                        break;
                    }
                    Err(_) => break, // Channel closed
                },

                recv(rx_midi) -> msg => match msg {
                    Ok(note) => {
                        debug!("MIDI key {}", note);
                        let result = self.ctx.press(note);
                        self.handle(result);
                    }
                    Err(_) => break,
                },

                recv(rx_watcher) -> msg => match msg {
                    Ok(Ok(event)) => {
                        let path = self
                            .watcher
                            .as_ref()
                            .filter(|w| w.concerns(&event))
                            .and_then(|w| w.path())
                            .map(Path::to_path_buf);
                        if let Some(path) = path {
                            self.reload_options(&path);
                        }
                    }
                    Ok(Err(e)) => println!("{} Watch error: {}", "Error:".red(), e),
                    Err(_) => break,
                },

                recv(timer) -> _ => self.advance(),
            }
        }

        Ok(())
    }
}

/// Convenience function to start the REPL
pub fn start(config: ReplConfig) -> Result<()> {
    let mut repl =
        Repl::new(config).map_err(|e| anyhow::anyhow!("Failed to initialize REPL: {}", e))?;
    repl.run()
}
