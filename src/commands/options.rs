//! Drill option commands
//!
//! Every change starts a fresh chord. A change that would leave a group
//! (roots, types, inversions) empty is refused, so the drill always has
//! something to ask.

use crate::commands::{CommandContext, CommandResult};
use crate::config::{load_options, save_options};
use crate::display::render_options;
use colored::*;
use triadic_core::{ChordQuality, DrillOptions, Inversion, SequenceMode};

/// Handle `mode [random|circle]` command
pub fn cmd_mode(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Message(format!(
            "Current mode: {}",
            ctx.session.mode().name().cyan()
        ));
    }

    match args.parse::<SequenceMode>() {
        Ok(mode) => {
            ctx.session.set_mode(mode);
            prefixed(format!("Mode set to {}", mode.name()), ctx.next_task())
        }
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

/// Handle `roots naturals|accidentals|both` command
pub fn cmd_roots(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let (allow_natural, allow_accidental) = match args.to_lowercase().as_str() {
        "naturals" | "natural" => (true, false),
        "accidentals" | "accidental" => (false, true),
        "both" | "all" => (true, true),
        _ => {
            return CommandResult::Error(
                "Usage: roots naturals|accidentals|both".to_string(),
            )
        }
    };

    let options = DrillOptions {
        allow_natural,
        allow_accidental,
        ..ctx.options.clone()
    };
    apply(ctx, options)
}

/// Handle `types <quality> [quality..]` command
pub fn cmd_types(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Error(
            "Usage: types <major|minor|dim|aug> [..]  At least one type is required".to_string(),
        );
    }

    let qualities: Result<Vec<ChordQuality>, _> =
        args.split_whitespace().map(str::parse).collect();
    match qualities {
        Ok(qualities) => {
            let options = DrillOptions {
                qualities,
                ..ctx.options.clone()
            };
            apply(ctx, options)
        }
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

/// Handle `inversions <0|1|2> [..]` command
pub fn cmd_inversions(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Error(
            "Usage: inversions <0|1|2> [..]  At least one inversion is required".to_string(),
        );
    }

    let inversions: Result<Vec<Inversion>, _> =
        args.split_whitespace().map(str::parse).collect();
    match inversions {
        Ok(inversions) => {
            let options = DrillOptions {
                inversions,
                ..ctx.options.clone()
            };
            apply(ctx, options)
        }
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

/// Handle `options` command - show the enabled options
pub fn cmd_options(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    CommandResult::Message(render_options(&ctx.options))
}

/// Handle `load <file>` command
pub fn cmd_load(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Error("Usage: load <file>".to_string());
    }

    match load_options(args) {
        Ok(options) => apply(ctx, options),
        Err(e) => CommandResult::Error(format!("{:#}", e)),
    }
}

/// Handle `save <file>` command
pub fn cmd_save(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Error("Usage: save <file>".to_string());
    }

    match save_options(args, &ctx.options) {
        Ok(()) => CommandResult::Message(format!("Options saved to {}", args.green())),
        Err(e) => CommandResult::Error(format!("{:#}", e)),
    }
}

/// Normalize, refuse options that leave a group empty, then start a fresh chord
pub fn apply(ctx: &mut CommandContext, mut options: DrillOptions) -> CommandResult {
    options.normalize();
    if let Err(e) = options.validate() {
        return CommandResult::Error(format!("Options not changed: {}", e));
    }
    let summary = render_options(&options);
    prefixed(summary, ctx.apply_options(options))
}

/// Put a line above a message; errors pass through untouched
fn prefixed(line: String, result: CommandResult) -> CommandResult {
    match result {
        CommandResult::Message(msg) => {
            CommandResult::Message(format!("{}\n{}", line.dimmed(), msg))
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::c_major_context;
    use std::io::Write;

    #[test]
    fn test_roots_switches_to_black_keys() {
        let mut ctx = c_major_context();
        assert!(matches!(
            cmd_roots("accidentals", &mut ctx),
            CommandResult::Message(_)
        ));
        assert!(!ctx.options.allow_natural);
        assert!(ctx.session.task().unwrap().root().is_black_key());
    }

    #[test]
    fn test_types_parse_and_dedup() {
        let mut ctx = c_major_context();
        cmd_types("minor dim m", &mut ctx);
        assert_eq!(
            ctx.options.qualities,
            vec![ChordQuality::Minor, ChordQuality::Diminished]
        );
    }

    #[test]
    fn test_empty_group_is_refused() {
        let mut ctx = c_major_context();
        let before = ctx.options.clone();

        assert!(matches!(cmd_types("", &mut ctx), CommandResult::Error(_)));
        assert!(matches!(cmd_inversions("", &mut ctx), CommandResult::Error(_)));
        assert!(matches!(cmd_inversions("3", &mut ctx), CommandResult::Error(_)));
        assert!(matches!(cmd_roots("none", &mut ctx), CommandResult::Error(_)));
        assert_eq!(ctx.options, before);
    }

    #[test]
    fn test_mode_switch_restarts_circle() {
        let mut ctx = c_major_context();
        cmd_mode("random", &mut ctx);
        assert_eq!(ctx.session.mode(), SequenceMode::Random);

        cmd_mode("circle", &mut ctx);
        assert_eq!(ctx.session.task().map(|t| t.symbol()), Some("C".to_string()));
        assert!(matches!(cmd_mode("spiral", &mut ctx), CommandResult::Error(_)));
    }

    #[test]
    fn test_load_and_save() {
        let mut ctx = c_major_context();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"qualities":["Augmented"],"inversions":[1]}}"#).unwrap();
        let path = file.path().to_string_lossy().to_string();

        assert!(matches!(cmd_load(&path, &mut ctx), CommandResult::Message(_)));
        assert_eq!(ctx.options.qualities, vec![ChordQuality::Augmented]);
        assert_eq!(ctx.session.task().unwrap().inversion(), Inversion::First);

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("saved.json");
        let out = out.to_string_lossy();
        assert!(matches!(cmd_save(&out, &mut ctx), CommandResult::Message(_)));
        assert_eq!(load_options(&*out).unwrap(), ctx.options);
    }

    #[test]
    fn test_load_missing_file() {
        let mut ctx = c_major_context();
        assert!(matches!(
            cmd_load("/no/such/options.json", &mut ctx),
            CommandResult::Error(_)
        ));
    }
}
