//! Terminal rendering for the drill: task cards, the keyboard and feedback

use colored::*;
use std::collections::BTreeSet;
use triadic_core::session::{KEYBOARD_BASE, KEYBOARD_KEYS};
use triadic_core::types::pitch::midi_name;
use triadic_core::{DrillOptions, GenerationError, PitchClass, Task, Verdict};

/// Width of one key cell on the text keyboard
const CELL: usize = 3;

/// Chord symbol with ♯/♭ and the inversion underneath
pub fn render_task(task: &Task) -> String {
    format!(
        "{}\n{}",
        task.pretty_symbol().bright_cyan().bold(),
        task.inversion().name().dimmed()
    )
}

/// Two octaves starting at C3, with held keys marked below.
///
/// Keys held outside the drawn range are listed after the keyboard.
pub fn render_keyboard(pressed: &BTreeSet<u8>) -> String {
    let mut labels = String::new();
    let mut marks = String::new();

    for midi in KEYBOARD_BASE..KEYBOARD_BASE + KEYBOARD_KEYS {
        let pc = PitchClass::from_midi(midi);
        let label = format!("{:<width$}", pc.to_string(), width = CELL);
        let held = pressed.contains(&midi);

        let label = match (held, pc.is_black_key()) {
            (true, _) => label.bright_green().bold(),
            (false, true) => label.dimmed(),
            (false, false) => label.normal(),
        };
        labels.push_str(&label.to_string());
        marks.push_str(&format!(
            "{:<width$}",
            if held { "^" } else { "" },
            width = CELL
        ));
    }

    let mut out = format!("{}\n{}", labels.trim_end(), marks.trim_end());

    let outside: Vec<String> = pressed
        .iter()
        .filter(|&&m| !(KEYBOARD_BASE..KEYBOARD_BASE + KEYBOARD_KEYS).contains(&m))
        .map(|&m| midi_name(m))
        .collect();
    if !outside.is_empty() {
        out.push_str(&format!("\nalso held: {}", outside.join(" ")));
    }
    out
}

/// Feedback line for a verdict; nothing while the answer is incomplete
pub fn verdict_message(verdict: Verdict) -> Option<String> {
    let msg = match verdict {
        Verdict::Pending => return None,
        Verdict::WrongNotes => "✗ Try again".bright_red().to_string(),
        Verdict::WrongInversion => "~ Right notes, wrong inversion. Check bass."
            .bright_yellow()
            .to_string(),
        Verdict::Correct => "✓ Correct!".bright_green().bold().to_string(),
    };
    Some(msg)
}

/// What to tell the learner when no task can be generated
pub fn generation_error_message(err: &GenerationError) -> String {
    match err {
        GenerationError::NoQualities => "Select types: use `types <quality..>`".to_string(),
        GenerationError::NoRoots => "Select roots: use `roots naturals|accidentals|both`".to_string(),
        GenerationError::NoInversions => "Select inversions: use `inversions <0|1|2..>`".to_string(),
        GenerationError::Completed => format!(
            "{}\nYou've mastered all selected chords! Use `restore` to bring some back.",
            "All Done!".bright_green().bold()
        ),
    }
}

/// One-line summary of the enabled options
pub fn render_options(options: &DrillOptions) -> String {
    let roots = match (options.allow_natural, options.allow_accidental) {
        (true, true) => "naturals + accidentals",
        (true, false) => "naturals",
        (false, true) => "accidentals",
        (false, false) => "none",
    };
    let qualities: Vec<&str> = options.qualities.iter().map(|q| q.name()).collect();
    let inversions: Vec<String> = options
        .inversions
        .iter()
        .map(|i| i.index().to_string())
        .collect();

    format!(
        "roots: {}  types: {}  inversions: {}",
        roots.cyan(),
        qualities.join(", ").cyan(),
        inversions.join(" ").cyan()
    )
}
