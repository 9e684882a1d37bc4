//! Command registry for REPL commands
//!
//! Provides a clean, extensible pattern for handling REPL commands.

pub mod drill;
pub mod general;
pub mod midi;
pub mod options;

use crate::audio::{AudioPlayer, MidiInputHandle};
use crate::display::{generation_error_message, render_keyboard, render_task, verdict_message};
use colored::*;
use crossbeam_channel::Sender;
use rand::rngs::StdRng;
use rand::SeedableRng;
use triadic_core::{DrillOptions, SequenceMode, Session, Verdict};

/// Result of executing a command
#[derive(Debug)]
pub enum CommandResult {
    /// Command executed successfully, continue REPL
    Success,
    /// Command executed, show this message
    Message(String),
    /// The current chord was answered correctly: show this message,
    /// then move on to the next chord after a pause
    Solved(String),
    /// Exit the REPL
    Exit,
    /// Not a command, try treating the line as keys
    NotACommand,
    /// Error occurred
    Error(String),
    /// Watch an options file for changes
    Watch(String),
}

/// Context passed to command handlers: the drill and its peripherals
pub struct CommandContext {
    pub session: Session,
    pub options: DrillOptions,
    pub rng: StdRng,
    pub audio: Option<AudioPlayer>,
    pub midi: Option<MidiInputHandle>,
    /// Where a newly connected MIDI input forwards its notes
    pub midi_tx: Sender<u8>,
}

impl CommandContext {
    /// Create a context without audio. A missing seed draws one from the OS.
    pub fn new(
        options: DrillOptions,
        mode: SequenceMode,
        seed: Option<u64>,
        midi_tx: Sender<u8>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            session: Session::with_mode(mode),
            options,
            rng,
            audio: None,
            midi: None,
            midi_tx,
        }
    }

    /// Create a new context with sound output
    pub fn with_audio(mut self, audio: AudioPlayer) -> Self {
        self.audio = Some(audio);
        self
    }

    /// Generate and show the next chord
    pub fn next_task(&mut self) -> CommandResult {
        match self.session.next_task(&self.options, &mut self.rng) {
            Ok(task) => CommandResult::Message(render_task(task)),
            Err(e) if e.is_configuration() => CommandResult::Error(generation_error_message(&e)),
            Err(e) => CommandResult::Message(generation_error_message(&e)),
        }
    }

    /// Replace the options and start over with a fresh chord
    pub fn apply_options(&mut self, options: DrillOptions) -> CommandResult {
        self.options = options;
        self.next_task()
    }

    /// Toggle one key and report how the answer stands
    pub fn press(&mut self, midi: u8) -> CommandResult {
        if self.session.task().is_none() {
            return CommandResult::Error("No chord to play. Use `new` to get one.".to_string());
        }
        let Some(verdict) = self.session.toggle_key(midi) else {
            return CommandResult::Error("Already solved, the next chord is on its way".to_string());
        };

        if let Some(audio) = &self.audio {
            if let Err(e) = audio.play_tone(midi) {
                log::warn!("tone failed: {}", e);
            }
        }
        self.feedback(verdict)
    }

    /// Keyboard plus verdict; a correct answer is strummed and reported as solved
    pub fn feedback(&self, verdict: Verdict) -> CommandResult {
        let mut out = render_keyboard(self.session.pressed());
        if let Some(msg) = verdict_message(verdict) {
            out.push('\n');
            out.push_str(&msg);
        }

        if !verdict.is_correct() {
            return CommandResult::Message(out);
        }
        if let Some(audio) = &self.audio {
            let notes: Vec<u8> = self.session.pressed().iter().copied().collect();
            if let Err(e) = audio.strum(&notes) {
                log::warn!("strum failed: {}", e);
            }
        }
        CommandResult::Solved(out)
    }

    /// The current chord and keyboard, or a hint when there is none
    pub fn render_current(&self) -> String {
        match self.session.task() {
            Some(task) => format!(
                "{}\n{}",
                render_task(task),
                render_keyboard(self.session.pressed())
            ),
            None => "No current chord. Use `new` to get one.".yellow().to_string(),
        }
    }
}

/// A command handler function
pub type CommandHandler = fn(&str, &mut CommandContext) -> CommandResult;

/// Registry of available commands
pub struct CommandRegistry {
    /// Commands indexed by their prefix (e.g., "midi connect")
    /// Sorted by prefix length descending for longest-match-first lookup
    commands: Vec<(String, CommandHandler)>,
}

impl CommandRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Register a command with its prefix
    pub fn register(&mut self, prefix: &str, handler: CommandHandler) {
        self.commands.push((prefix.to_string(), handler));
        self.commands.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    }

    /// Execute a command, returning NotACommand if no match found
    pub fn execute(&self, input: &str, ctx: &mut CommandContext) -> CommandResult {
        for (prefix, handler) in &self.commands {
            if input == prefix || input.starts_with(&format!("{} ", prefix)) {
                let args = input[prefix.len()..].trim();
                return handler(args, ctx);
            }
        }
        CommandResult::NotACommand
    }

    /// Get all registered command prefixes
    pub fn list_commands(&self) -> Vec<&str> {
        self.commands.iter().map(|(p, _)| p.as_str()).collect()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a fully populated command registry with all built-in commands
pub fn create_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();

    // Drill
    registry.register("new", drill::cmd_new);
    registry.register("skip", drill::cmd_new);
    registry.register("show", drill::cmd_show);
    registry.register("play", drill::cmd_play);
    registry.register("clear", drill::cmd_clear);
    registry.register("reveal", drill::cmd_reveal);
    registry.register("exclude", drill::cmd_exclude);
    registry.register("excluded", drill::cmd_excluded);
    registry.register("restore", drill::cmd_restore);
    registry.register("status", drill::cmd_status);

    // Options
    registry.register("mode", options::cmd_mode);
    registry.register("roots", options::cmd_roots);
    registry.register("types", options::cmd_types);
    registry.register("inversions", options::cmd_inversions);
    registry.register("options", options::cmd_options);
    registry.register("load", options::cmd_load);
    registry.register("save", options::cmd_save);

    // MIDI input
    registry.register("midi devices", midi::cmd_midi_devices);
    registry.register("midi connect", midi::cmd_midi_connect);
    registry.register("midi disconnect", midi::cmd_midi_disconnect);
    registry.register("midi status", midi::cmd_midi_status);

    // General commands
    registry.register("help", general::cmd_help);
    registry.register("quit", general::cmd_quit);
    registry.register("exit", general::cmd_quit);
    registry.register("watch", general::cmd_watch);

    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use triadic_core::{ChordQuality, Inversion};

    /// C major in root position, first in circle order, no audio
    pub(crate) fn c_major_context() -> CommandContext {
        let (tx, _rx) = crossbeam_channel::unbounded();
        let options = DrillOptions::new(true, false, [ChordQuality::Major], [Inversion::Root]);
        let mut ctx = CommandContext::new(options, SequenceMode::Circle, Some(1), tx);
        ctx.next_task();
        ctx
    }

    #[test]
    fn test_longest_prefix_wins() {
        colored::control::set_override(false);
        let registry = create_registry();
        let mut ctx = c_major_context();

        // "excluded" must not be routed to "exclude" with args "d"
        match registry.execute("excluded", &mut ctx) {
            CommandResult::Message(msg) => assert!(msg.contains("No chords are excluded")),
            other => panic!("unexpected {:?}", other),
        }
        assert!(ctx.session.excluded().is_empty());
    }

    #[test]
    fn test_prefix_needs_word_boundary() {
        let registry = create_registry();
        let mut ctx = c_major_context();
        assert!(matches!(
            registry.execute("newer", &mut ctx),
            CommandResult::NotACommand
        ));
    }

    #[test]
    fn test_press_until_solved() {
        let mut ctx = c_major_context();
        assert!(matches!(ctx.press(60), CommandResult::Message(_)));
        assert!(matches!(ctx.press(64), CommandResult::Message(_)));
        assert!(matches!(ctx.press(67), CommandResult::Solved(_)));
        assert!(matches!(ctx.press(72), CommandResult::Error(_)));
    }

    #[test]
    fn test_press_without_task() {
        let (tx, _rx) = crossbeam_channel::unbounded();
        let mut ctx = CommandContext::new(DrillOptions::default(), SequenceMode::Random, Some(0), tx);
        assert!(matches!(ctx.press(60), CommandResult::Error(_)));
    }

    #[test]
    fn test_configuration_error_is_reported_as_error() {
        let mut ctx = c_major_context();
        let no_roots = DrillOptions {
            allow_natural: false,
            ..ctx.options.clone()
        };
        let result = ctx.apply_options(no_roots);
        assert!(matches!(result, CommandResult::Error(_)));
        assert!(ctx.session.task().is_none());
    }

    #[test]
    fn test_list_commands() {
        let registry = create_registry();
        let commands = registry.list_commands();
        assert!(commands.contains(&"midi connect"));
        assert_eq!(commands.first().map(|c| c.len()), Some("midi disconnect".len()));
    }
}
