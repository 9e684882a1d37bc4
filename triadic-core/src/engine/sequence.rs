//! Sequencing strategies
//!
//! A strategy proposes the next candidate root; the task generator decides
//! whether the candidate is usable. Strategies share one contract so the
//! generator never needs to know which one is active.

use crate::engine::alteration::{valid_shifts, Shift};
use crate::types::{
    AccidentalPreference, ChordQuality, DrillOptions, Inversion, PitchClass, NATURAL_ROOTS,
};
use rand::seq::IndexedRandom;
use rand::RngCore;

/// Semitones between successive roots on the circle of fifths
pub const FIFTH_STEP: i32 = 7;

/// A proposed root, before the generator has checked it against the options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub root: PitchClass,
    pub quality: Option<ChordQuality>,
    pub inversion: Option<Inversion>,
    /// The root is used as-is and must not be altered downstream
    pub fixed_root: bool,
    pub shift: Shift,
    pub preference: AccidentalPreference,
}

/// Produces candidate roots for the task generator
pub trait Sequence {
    /// Propose the next candidate, or `None` when the strategy is exhausted
    fn next(&mut self, options: &DrillOptions, rng: &mut dyn RngCore) -> Option<Candidate>;

    /// Return to the initial state
    fn reset(&mut self) {}
}

/// Uniform draws over the seven naturals, the enabled qualities and inversions
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSequence;

impl RandomSequence {
    pub fn new() -> Self {
        RandomSequence
    }
}

impl Sequence for RandomSequence {
    fn next(&mut self, options: &DrillOptions, rng: &mut dyn RngCore) -> Option<Candidate> {
        let root = *NATURAL_ROOTS.choose(rng)?;
        let quality = options.qualities.choose(rng).copied();
        let inversion = options.inversions.choose(rng).copied();

        let shifts = valid_shifts(root, options.allow_natural, options.allow_accidental);
        let shift = *shifts.choose(rng)?;

        Some(Candidate {
            root,
            quality,
            inversion,
            fixed_root: false,
            shift,
            preference: shift.preference(),
        })
    }
}

/// Walks the circle of fifths from C: C G D A E B F# Db Ab Eb Bb F, then wraps
#[derive(Debug, Clone, Copy)]
pub struct CircleSequence {
    current: PitchClass,
    is_first: bool,
}

impl Default for CircleSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl CircleSequence {
    pub fn new() -> Self {
        CircleSequence {
            current: PitchClass::C,
            is_first: true,
        }
    }

    /// The root most recently handed out (C before the first call)
    pub fn current(&self) -> PitchClass {
        self.current
    }

    /// Conventional spelling on the circle: F# on the sharp side, flats after it
    fn preference_for(root: PitchClass) -> AccidentalPreference {
        match root.value() {
            6 => AccidentalPreference::Sharp,
            1 | 3 | 8 | 10 => AccidentalPreference::Flat,
            _ => AccidentalPreference::Auto,
        }
    }
}

impl Sequence for CircleSequence {
    fn next(&mut self, options: &DrillOptions, rng: &mut dyn RngCore) -> Option<Candidate> {
        if self.is_first {
            self.is_first = false;
        } else {
            self.current = self.current.transpose(FIFTH_STEP);
        }

        Some(Candidate {
            root: self.current,
            quality: options.qualities.choose(rng).copied(),
            inversion: options.inversions.choose(rng).copied(),
            fixed_root: true,
            shift: Shift::Natural,
            preference: Self::preference_for(self.current),
        })
    }

    fn reset(&mut self) {
        self.current = PitchClass::C;
        self.is_first = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::BTreeSet;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_circle_order() {
        let options = DrillOptions::default();
        let mut rng = rng();
        let mut circle = CircleSequence::new();

        let roots: Vec<u8> = (0..12)
            .map(|_| circle.next(&options, &mut rng).unwrap().root.value())
            .collect();
        assert_eq!(roots, vec![0, 7, 2, 9, 4, 11, 6, 1, 8, 3, 10, 5]);

        // Thirteenth call wraps back to C
        assert_eq!(circle.next(&options, &mut rng).unwrap().root, PitchClass::C);
    }

    #[test]
    fn test_circle_visits_each_root_once_per_cycle() {
        let options = DrillOptions::default();
        let mut rng = rng();
        let mut circle = CircleSequence::new();

        for _ in 0..3 {
            let cycle: BTreeSet<PitchClass> = (0..12)
                .map(|_| circle.next(&options, &mut rng).unwrap().root)
                .collect();
            assert_eq!(cycle.len(), 12);
        }
    }

    #[test]
    fn test_circle_reset_starts_at_c() {
        let options = DrillOptions::default();
        let mut rng = rng();
        let mut circle = CircleSequence::new();

        for _ in 0..5 {
            circle.next(&options, &mut rng);
        }
        circle.reset();
        assert_eq!(circle.next(&options, &mut rng).unwrap().root, PitchClass::C);

        // Resetting twice is the same as resetting once
        circle.reset();
        circle.reset();
        assert_eq!(circle.next(&options, &mut rng).unwrap().root, PitchClass::C);
    }

    #[test]
    fn test_circle_candidates_are_fixed() {
        let options = DrillOptions::default();
        let mut rng = rng();
        let mut circle = CircleSequence::new();

        for _ in 0..12 {
            let candidate = circle.next(&options, &mut rng).unwrap();
            assert!(candidate.fixed_root);
            assert_eq!(candidate.shift, Shift::Natural);
            assert!(candidate.quality.is_some());
            assert!(candidate.inversion.is_some());
        }
    }

    #[test]
    fn test_circle_spelling() {
        let eb = PitchClass::new(3).unwrap();
        assert_eq!(CircleSequence::preference_for(eb), AccidentalPreference::Flat);
        let fs = PitchClass::new(6).unwrap();
        assert_eq!(CircleSequence::preference_for(fs), AccidentalPreference::Sharp);
    }

    #[test]
    fn test_random_draws_within_options() {
        let options = DrillOptions::new(
            true,
            false,
            [ChordQuality::Minor],
            [Inversion::First, Inversion::Second],
        );
        let mut rng = rng();
        let mut random = RandomSequence::new();

        for _ in 0..200 {
            let candidate = random.next(&options, &mut rng).unwrap();
            assert!(candidate.root.is_natural());
            assert!(!candidate.fixed_root);
            assert_eq!(candidate.shift, Shift::Natural);
            assert_eq!(candidate.quality, Some(ChordQuality::Minor));
            assert_ne!(candidate.inversion, Some(Inversion::Root));
        }
    }

    #[test]
    fn test_random_shift_matches_preference() {
        let options = DrillOptions::new(false, true, ChordQuality::ALL, Inversion::ALL);
        let mut rng = rng();
        let mut random = RandomSequence::new();

        for _ in 0..200 {
            let candidate = random.next(&options, &mut rng).unwrap();
            assert_ne!(candidate.shift, Shift::Natural);
            assert_eq!(candidate.preference, candidate.shift.preference());
        }
    }

    #[test]
    fn test_random_without_root_gates_is_exhausted() {
        let options = DrillOptions::new(false, false, ChordQuality::ALL, Inversion::ALL);
        assert!(RandomSequence::new().next(&options, &mut rng()).is_none());
    }
}
