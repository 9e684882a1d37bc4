//! Inversion resolver
//!
//! Turns a root, an interval set and an inversion into what the learner must
//! play (pitch classes plus bass), and into a concrete voicing for "show answer".

use crate::types::{Inversion, PitchClass};

/// Highest MIDI note a generated voicing may reach before it is dropped an octave (B4)
pub const VOICING_CEILING: u8 = 71;

/// What the learner has to press for a chord in a given inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Target {
    pub name: &'static str,
    /// Root, third and fifth as pitch classes; compare as a set
    pub pitch_classes: [PitchClass; 3],
    pub bass: PitchClass,
}

impl Target {
    pub fn contains(&self, pitch_class: PitchClass) -> bool {
        self.pitch_classes.contains(&pitch_class)
    }
}

/// Calculate the target pitch classes and bass for a chord in an inversion
pub fn calculate_target(root: PitchClass, intervals: [u8; 3], inversion: Inversion) -> Target {
    let pitch_classes = intervals.map(|iv| root.transpose(iv as i32));
    let bass = pitch_classes[inversion.bass_slot()];

    Target {
        name: inversion.name(),
        pitch_classes,
        bass,
    }
}

/// Generate absolute MIDI notes for a chord in an inversion.
///
/// Lower tones are lifted an octave to reach the inversion. If the top note then
/// lies above `VOICING_CEILING` the whole triad drops one octave. This is a single
/// pass, so very high roots can still end above the ceiling.
///
/// Returns `None` when a tone would fall outside the MIDI range 0..=127.
pub fn generate_voicing(
    root_midi: u8,
    intervals: [u8; 3],
    inversion: Inversion,
) -> Option<[u8; 3]> {
    let mut notes = intervals.map(|iv| root_midi as i16 + iv as i16);

    match inversion {
        Inversion::Root => {}
        Inversion::First => notes[0] += 12,
        Inversion::Second => {
            notes[0] += 12;
            notes[1] += 12;
        }
    }

    let highest = notes.iter().copied().max().unwrap_or_default();
    if highest > VOICING_CEILING as i16 {
        notes = notes.map(|n| n - 12);
    }

    if notes.iter().any(|&n| !(0..=127).contains(&n)) {
        return None;
    }
    Some(notes.map(|n| n as u8))
}
