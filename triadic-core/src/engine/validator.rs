//! Answer validator
//!
//! Checks the notes first and the bass second, so a learner who has the
//! wrong chord hears about that before hearing about the inversion.

use crate::types::{PitchClass, Task};
use std::collections::BTreeSet;
use std::fmt;

/// Number of keys that must be held before an answer is judged
pub const REQUIRED_KEYS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// Fewer or more than three keys are held; no judgement yet
    Pending,
    WrongNotes,
    /// The pitch classes are right but the lowest key is not the required bass
    WrongInversion,
    Correct,
}

impl Verdict {
    pub fn code(&self) -> &'static str {
        match self {
            Verdict::Pending => "pending",
            Verdict::WrongNotes => "wrong-notes",
            Verdict::WrongInversion => "wrong-inversion",
            Verdict::Correct => "correct",
        }
    }

    pub fn is_correct(&self) -> bool {
        matches!(self, Verdict::Correct)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Judge the held keys (absolute MIDI notes) against a task
pub fn validate_answer(pressed: &BTreeSet<u8>, task: &Task) -> Verdict {
    if pressed.len() != REQUIRED_KEYS {
        return Verdict::Pending;
    }

    let pressed_classes: BTreeSet<PitchClass> =
        pressed.iter().map(|&m| PitchClass::from_midi(m)).collect();
    let target_classes: BTreeSet<PitchClass> =
        task.target_pitch_classes().into_iter().collect();

    if pressed_classes != target_classes {
        return Verdict::WrongNotes;
    }

    // BTreeSet iterates in ascending order, so the first key is the lowest
    let lowest = pressed.iter().next().copied().map(PitchClass::from_midi);
    if lowest != Some(task.target_bass()) {
        return Verdict::WrongInversion;
    }

    Verdict::Correct
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AccidentalPreference, ChordQuality, Inversion, NoteSpelling};

    fn c_major(inversion: Inversion) -> Task {
        Task::new(
            NoteSpelling::new(PitchClass::C, AccidentalPreference::Auto),
            ChordQuality::Major,
            inversion,
        )
    }

    fn keys(notes: &[u8]) -> BTreeSet<u8> {
        notes.iter().copied().collect()
    }

    #[test]
    fn test_pending_until_three_keys() {
        let task = c_major(Inversion::Root);
        assert_eq!(validate_answer(&keys(&[]), &task), Verdict::Pending);
        assert_eq!(validate_answer(&keys(&[60, 64]), &task), Verdict::Pending);
        assert_eq!(validate_answer(&keys(&[60, 64, 67, 72]), &task), Verdict::Pending);
    }

    #[test]
    fn test_wrong_notes() {
        let task = c_major(Inversion::Root);
        assert_eq!(validate_answer(&keys(&[60, 63, 67]), &task), Verdict::WrongNotes);
        // Doubled C instead of G: only two distinct pitch classes
        assert_eq!(validate_answer(&keys(&[60, 64, 72]), &task), Verdict::WrongNotes);
    }

    #[test]
    fn test_wrong_inversion() {
        let task = c_major(Inversion::Root);
        // E G C: right notes, E in the bass
        assert_eq!(
            validate_answer(&keys(&[64, 67, 72]), &task),
            Verdict::WrongInversion
        );
    }

    #[test]
    fn test_correct_in_any_octave() {
        let task = c_major(Inversion::Second);
        assert_eq!(validate_answer(&keys(&[55, 60, 64]), &task), Verdict::Correct);
        assert_eq!(validate_answer(&keys(&[43, 72, 88]), &task), Verdict::Correct);
    }

    #[test]
    fn test_notes_checked_before_bass() {
        // Wrong chord with the right bass still reports the notes
        let task = c_major(Inversion::Root);
        assert_eq!(validate_answer(&keys(&[60, 65, 69]), &task), Verdict::WrongNotes);
    }
}
