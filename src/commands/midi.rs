//! MIDI REPL commands

use crate::audio::MidiInputHandle;
use crate::commands::{CommandContext, CommandResult};
use colored::*;

/// Handle `midi devices` command - list available MIDI input ports
pub fn cmd_midi_devices(_args: &str, _ctx: &mut CommandContext) -> CommandResult {
    match MidiInputHandle::list_ports() {
        Ok(ports) => {
            if ports.is_empty() {
                CommandResult::Message(
                    "No MIDI input ports found. Make sure a MIDI keyboard is connected."
                        .yellow()
                        .to_string(),
                )
            } else {
                let mut output = format!("{}\n", "🎹 Available MIDI Input Ports:".bold());
                for (i, port) in ports.iter().enumerate() {
                    output.push_str(&format!("  {}. {}\n", i + 1, port.cyan()));
                }
                output.push_str(&format!(
                    "\n{} {}",
                    "Use".dimmed(),
                    "midi connect <port name>".green()
                ));
                CommandResult::Message(output)
            }
        }
        Err(e) => CommandResult::Error(format!("Failed to list MIDI ports: {}", e)),
    }
}

/// Handle `midi connect <port>` command - play answers from a MIDI keyboard
pub fn cmd_midi_connect(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Error(
            "Usage: midi connect <port name>\nUse 'midi devices' to see available ports"
                .to_string(),
        );
    }

    // Close any previous connection first so the port is free to reopen
    ctx.midi = None;
    match MidiInputHandle::connect(args, ctx.midi_tx.clone()) {
        Ok(handle) => {
            let msg = format!("🎹 Listening to MIDI port: {}", handle.port_name().green());
            ctx.midi = Some(handle);
            CommandResult::Message(msg)
        }
        Err(e) => CommandResult::Error(format!("Failed to connect to '{}': {}", args, e)),
    }
}

/// Handle `midi disconnect` command
pub fn cmd_midi_disconnect(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    match ctx.midi.take() {
        Some(handle) => CommandResult::Message(format!(
            "🎹 Disconnected from {}",
            handle.port_name()
        )),
        None => CommandResult::Error("No MIDI input connected".to_string()),
    }
}

/// Handle `midi status` command
pub fn cmd_midi_status(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    match &ctx.midi {
        Some(handle) => {
            CommandResult::Message(format!("🎹 MIDI input: {}", handle.port_name().green()))
        }
        None => CommandResult::Message("🎹 MIDI input: not connected".dimmed().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::c_major_context;

    #[test]
    fn test_connect_requires_port_name() {
        let mut ctx = c_major_context();
        assert!(matches!(
            cmd_midi_connect("", &mut ctx),
            CommandResult::Error(_)
        ));
    }

    #[test]
    fn test_disconnect_without_connection() {
        let mut ctx = c_major_context();
        assert!(matches!(
            cmd_midi_disconnect("", &mut ctx),
            CommandResult::Error(_)
        ));
        assert!(matches!(
            cmd_midi_status("", &mut ctx),
            CommandResult::Message(_)
        ));
    }
}
