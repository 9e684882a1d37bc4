//! Drill commands: answering, revealing, skipping and excluding chords

use crate::commands::{CommandContext, CommandResult};
use crate::display::render_keyboard;
use colored::*;
use triadic_core::types::pitch::{midi_name, parse_midi_note, pretty_accidentals};
use triadic_core::{ChordId, ChordQuality, PitchClass};

/// Handle `new` / `skip` command
pub fn cmd_new(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    ctx.next_task()
}

/// Handle `show` command
pub fn cmd_show(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    CommandResult::Message(ctx.render_current())
}

/// Handle `play <key> [key..]` command: toggle keys by MIDI number or name ("C4", "Eb3")
pub fn cmd_play(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Error("Usage: play <key> [key..]  e.g. play C4 E4 G4".to_string());
    }

    let keys: Result<Vec<u8>, _> = args.split_whitespace().map(parse_midi_note).collect();
    let keys = match keys {
        Ok(keys) => keys,
        Err(e) => return CommandResult::Error(e.to_string()),
    };

    let mut result = CommandResult::Success;
    for key in keys {
        result = ctx.press(key);
        if matches!(result, CommandResult::Solved(_) | CommandResult::Error(_)) {
            break;
        }
    }
    result
}

/// Handle `clear` command - release every key
pub fn cmd_clear(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    ctx.session.clear_keys();
    CommandResult::Message(render_keyboard(ctx.session.pressed()))
}

/// Handle `reveal` command - hold down the answer
pub fn cmd_reveal(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    if ctx.session.is_frozen() {
        return CommandResult::Error("Already solved, the next chord is on its way".to_string());
    }
    let Some((notes, verdict)) = ctx.session.reveal_answer() else {
        return CommandResult::Error("No chord to reveal".to_string());
    };

    let names: Vec<String> = notes.iter().map(|&m| midi_name(m)).collect();
    let header = format!("{} {}", "Answer:".bold(), names.join(" ").cyan());
    match ctx.feedback(verdict) {
        CommandResult::Solved(out) => CommandResult::Solved(format!("{}\n{}", header, out)),
        CommandResult::Message(out) => CommandResult::Message(format!("{}\n{}", header, out)),
        other => other,
    }
}

/// Handle `exclude` command - drop the current chord for this session and move on
pub fn cmd_exclude(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    let Some(id) = ctx.session.exclude_current() else {
        return CommandResult::Error("No chord to exclude".to_string());
    };

    let excluded = format!("Excluded {}", symbol(&id)).dimmed();
    match ctx.next_task() {
        CommandResult::Message(msg) => CommandResult::Message(format!("{}\n{}", excluded, msg)),
        other => other,
    }
}

/// Handle `excluded` command - list excluded chords
pub fn cmd_excluded(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    let excluded = ctx.session.excluded();
    if excluded.is_empty() {
        return CommandResult::Message("No chords are excluded".to_string());
    }

    let mut output = format!("{} ({})\n", "Excluded chords".bold(), excluded.len());
    for id in excluded.iter() {
        output.push_str(&format!("  {}  {}\n", symbol(id).cyan(), id.to_string().dimmed()));
    }
    output.push_str(&format!("{} {}", "Use".dimmed(), "restore <chord|all>".green()));
    CommandResult::Message(output)
}

/// Handle `restore <chord|all>` command
pub fn cmd_restore(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Error("Usage: restore <chord|all>  e.g. restore Ebm".to_string());
    }

    let restored = if args.eq_ignore_ascii_case("all") {
        let count = ctx.session.excluded().len();
        ctx.session.restore_all();
        format!("Restored {} chords", count)
    } else {
        let Some(id) = parse_chord(args) else {
            return CommandResult::Error(format!("Unknown chord '{}'", args));
        };
        if !ctx.session.restore(&id) {
            return CommandResult::Error(format!("{} is not excluded", symbol(&id)));
        }
        format!("Restored {}", symbol(&id))
    };

    // Nothing was playable before; pick up again now that something is
    if ctx.session.task().is_none() {
        return match ctx.next_task() {
            CommandResult::Message(msg) => {
                CommandResult::Message(format!("{}\n{}", restored.green(), msg))
            }
            other => other,
        };
    }
    CommandResult::Message(restored.green().to_string())
}

/// Handle `status` command
pub fn cmd_status(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    let mut output = format!("{} {}\n", "mode:".bold(), ctx.session.mode().name().cyan());
    output.push_str(&crate::display::render_options(&ctx.options));
    output.push_str(&format!(
        "\n{} {}",
        "excluded:".bold(),
        ctx.session.excluded().len()
    ));
    if ctx.audio.is_none() {
        output.push_str(&format!("\n{}", "audio off".dimmed()));
    }
    if let Some(midi) = &ctx.midi {
        output.push_str(&format!("\n{} {}", "midi in:".bold(), midi.port_name().green()));
    }
    CommandResult::Message(output)
}

/// Chord symbol for an exclusion id, e.g. "C♯m"
fn symbol(id: &ChordId) -> String {
    pretty_accidentals(&id.symbol())
}

/// Accept either the stored id ("1|Minor") or a chord symbol ("C#m", "Dbaug", "E")
fn parse_chord(s: &str) -> Option<ChordId> {
    if let Ok(id) = s.parse::<ChordId>() {
        return Some(id);
    }

    let s = s.replace('♯', "#").replace('♭', "b");
    let mut chars = s.char_indices().skip(1);
    let split = match chars.next() {
        Some((i, c)) if c == '#' || c == 'b' => i + c.len_utf8(),
        Some((i, _)) => i,
        None => s.len(),
    };
    let (root, suffix) = s.split_at(split);
    let root: PitchClass = root.parse().ok()?;
    let quality = match suffix {
        "" => ChordQuality::Major,
        suffix => suffix.parse().ok()?,
    };
    Some(ChordId::new(root, quality))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::c_major_context;

    #[test]
    fn test_parse_chord() {
        let pc = |v| PitchClass::new(v).unwrap();
        assert_eq!(parse_chord("C"), Some(ChordId::new(pc(0), ChordQuality::Major)));
        assert_eq!(parse_chord("C#m"), Some(ChordId::new(pc(1), ChordQuality::Minor)));
        assert_eq!(parse_chord("E♭m"), Some(ChordId::new(pc(3), ChordQuality::Minor)));
        assert_eq!(parse_chord("Bbaug"), Some(ChordId::new(pc(10), ChordQuality::Augmented)));
        assert_eq!(parse_chord("bdim"), Some(ChordId::new(pc(11), ChordQuality::Diminished)));
        assert_eq!(parse_chord("1|Minor"), Some(ChordId::new(pc(1), ChordQuality::Minor)));
        assert_eq!(parse_chord("Hm"), None);
        assert_eq!(parse_chord("Cmaj9"), None);
    }

    #[test]
    fn test_play_names_and_numbers() {
        let mut ctx = c_major_context();
        assert!(matches!(cmd_play("C4 64", &mut ctx), CommandResult::Message(_)));
        assert!(matches!(cmd_play("G4", &mut ctx), CommandResult::Solved(_)));
    }

    #[test]
    fn test_play_rejects_bad_key_without_toggling() {
        let mut ctx = c_major_context();
        assert!(matches!(cmd_play("C4 X9", &mut ctx), CommandResult::Error(_)));
        assert!(ctx.session.pressed().is_empty());
    }

    #[test]
    fn test_reveal_solves() {
        let mut ctx = c_major_context();
        match cmd_reveal("", &mut ctx) {
            CommandResult::Solved(out) => assert!(out.contains("C3 E3 G3")),
            other => panic!("unexpected {:?}", other),
        }
        // A second reveal must not solve again
        assert!(matches!(cmd_reveal("", &mut ctx), CommandResult::Error(_)));
    }

    #[test]
    fn test_exclude_then_restore() {
        let mut ctx = c_major_context();
        assert!(matches!(cmd_exclude("", &mut ctx), CommandResult::Message(_)));
        assert_eq!(ctx.session.excluded().len(), 1);
        // Circle moved on to G
        assert_eq!(ctx.session.task().map(|t| t.symbol()), Some("G".to_string()));

        assert!(matches!(cmd_restore("C", &mut ctx), CommandResult::Message(_)));
        assert!(ctx.session.excluded().is_empty());
        assert!(matches!(cmd_restore("C", &mut ctx), CommandResult::Error(_)));
    }

    #[test]
    fn test_restore_after_completion_resumes() {
        let mut ctx = c_major_context();
        for _ in 0..7 {
            cmd_exclude("", &mut ctx);
        }
        assert!(ctx.session.task().is_none());

        cmd_restore("all", &mut ctx);
        assert!(ctx.session.task().is_some());
    }
}
