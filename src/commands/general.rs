//! General REPL commands (help, quit, watch)

use crate::commands::{CommandContext, CommandResult};
use colored::*;

/// Handle `help` command
pub fn cmd_help(_args: &str, _ctx: &mut CommandContext) -> CommandResult {
    print_help();
    CommandResult::Success
}

/// Handle `quit` or `exit` command
pub fn cmd_quit(_args: &str, _ctx: &mut CommandContext) -> CommandResult {
    CommandResult::Exit
}

/// Handle `watch <file>` command - load an options file and reload it on every save
pub fn cmd_watch(args: &str, _ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Error("Usage: watch <file>".to_string());
    }
    CommandResult::Watch(args.to_string())
}

/// Print help information
fn print_help() {
    println!("{}", "🎹 Triadic Help".bold());
    println!("{}", "===============".bold());
    println!();
    println!("{}", "Answering:".green());
    println!(
        "  {}  - Toggle keys by name or MIDI number",
        "play C4 E4 G4".cyan()
    );
    println!(
        "  {}       - Keys can also be typed on their own",
        "C4 E4 G4".cyan()
    );
    println!("  {}          - Release every key", "clear".cyan());
    println!(
        "  {}         - Hold down the answer",
        "reveal".cyan()
    );
    println!();
    println!("{}", "Drill:".green());
    println!("  {}     - Skip to the next chord", "new | skip".cyan());
    println!("  {}           - Show the current chord", "show".cyan());
    println!(
        "  {}        - Drop this chord for the session",
        "exclude".cyan()
    );
    println!("  {}       - List excluded chords", "excluded".cyan());
    println!(
        "  {} - Bring a chord back (e.g. Ebm)",
        "restore <chord|all>".cyan()
    );
    println!("  {}         - Mode, options and devices", "status".cyan());
    println!();
    println!("{}", "Options:".green());
    println!(
        "  {}     - Random draws or the circle of fifths",
        "mode random|circle".cyan()
    );
    println!(
        "  {} - Which roots to drill",
        "roots naturals|accidentals|both".cyan()
    );
    println!(
        "  {}  - e.g. types major minor",
        "types <major|minor|dim|aug>..".cyan()
    );
    println!(
        "  {}       - e.g. inversions 0 1",
        "inversions <0|1|2>..".cyan()
    );
    println!("  {}        - Show enabled options", "options".cyan());
    println!(
        "  {}    - Load or save an options file",
        "load | save <file>".cyan()
    );
    println!(
        "  {}   - Load a file and reload it on change",
        "watch <file>".cyan()
    );
    println!();
    println!("{}", "MIDI Input:".green());
    println!("  {}         - List MIDI input ports", "midi devices".cyan());
    println!(
        "  {}  - Answer from a MIDI keyboard",
        "midi connect <port>".cyan()
    );
    println!("  {}      - Stop listening", "midi disconnect".cyan());
    println!("  {}          - Show MIDI status", "midi status".cyan());
    println!();
    println!("{}", "Other Commands:".green());
    println!("  {}           - Show this help", "help".bright_green());
    println!("  {}           - Exit the REPL", "quit".bright_red());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::c_major_context;

    #[test]
    fn test_watch_needs_a_path() {
        let mut ctx = c_major_context();
        assert!(matches!(cmd_watch("", &mut ctx), CommandResult::Error(_)));
        match cmd_watch("drill.json", &mut ctx) {
            CommandResult::Watch(path) => assert_eq!(path, "drill.json"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_quit() {
        let mut ctx = c_major_context();
        assert!(matches!(cmd_quit("", &mut ctx), CommandResult::Exit));
    }
}
