//! Alteration resolver
//!
//! Decides which semitone shifts turn a natural root into a legal drill root.
//! An accidental root must land on a black key: flattening C gives B, which is a
//! white key and not a distinct accidental drill, so that shift is never offered.

use crate::types::{AccidentalPreference, NoteSpelling, PitchClass};

/// A semitone alteration applied to a natural root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Shift {
    Flat,
    Natural,
    Sharp,
}

impl Shift {
    pub fn semitones(&self) -> i8 {
        match self {
            Shift::Flat => -1,
            Shift::Natural => 0,
            Shift::Sharp => 1,
        }
    }

    /// Spelling preference implied by the shift
    pub fn preference(&self) -> AccidentalPreference {
        match self {
            Shift::Flat => AccidentalPreference::Flat,
            Shift::Natural => AccidentalPreference::Auto,
            Shift::Sharp => AccidentalPreference::Sharp,
        }
    }
}

/// Shifts allowed for `root` under the two root gates.
///
/// Returned in the order natural, flat, sharp. An empty result is not an error;
/// the caller should try a different root.
pub fn valid_shifts(root: PitchClass, allow_natural: bool, allow_accidental: bool) -> Vec<Shift> {
    let mut shifts = Vec::with_capacity(3);

    if allow_natural {
        shifts.push(Shift::Natural);
    }

    if allow_accidental {
        if (root - 1).is_black_key() {
            shifts.push(Shift::Flat);
        }
        if (root + 1).is_black_key() {
            shifts.push(Shift::Sharp);
        }
    }

    shifts
}

/// Apply a shift, returning the altered pitch class and how to spell it.
///
/// The spelling keeps the letter of the natural root: D shifted down is "Db",
/// never "C#".
pub fn apply_shift(root: PitchClass, shift: Shift) -> (PitchClass, NoteSpelling) {
    let altered = root + shift.semitones();
    (altered, NoteSpelling::new(altered, shift.preference()))
}
