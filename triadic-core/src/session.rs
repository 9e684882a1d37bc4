//! A learner's drill session
//!
//! Holds everything that changes while someone practises: the generator and
//! its strategy cursor, the excluded chords, the current task and the keys
//! held down. Front ends feed it discrete events and decide timing themselves.

use crate::engine::{
    generate_voicing, validate_answer, ExclusionSet, SequenceMode, TaskGenerator, Verdict,
};
use crate::error::GenerationError;
use crate::types::{ChordId, DrillOptions, Task};
use rand::RngCore;
use std::collections::BTreeSet;

/// MIDI note of the lowest key on the trainer keyboard (C3); reveals are voiced from here
pub const KEYBOARD_BASE: u8 = 48;

/// Number of keys on the trainer keyboard (two octaves, C3 to B4)
pub const KEYBOARD_KEYS: u8 = 24;

#[derive(Debug, Clone, Default)]
pub struct Session {
    generator: TaskGenerator,
    excluded: ExclusionSet,
    task: Option<Task>,
    pressed: BTreeSet<u8>,
    /// Set after a correct answer; input is ignored until the next task
    frozen: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mode: SequenceMode) -> Self {
        Session {
            generator: TaskGenerator::with_mode(mode),
            ..Self::default()
        }
    }

    pub fn mode(&self) -> SequenceMode {
        self.generator.mode()
    }

    pub fn set_mode(&mut self, mode: SequenceMode) {
        self.generator.set_mode(mode);
    }

    pub fn task(&self) -> Option<&Task> {
        self.task.as_ref()
    }

    pub fn pressed(&self) -> &BTreeSet<u8> {
        &self.pressed
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn excluded(&self) -> &ExclusionSet {
        &self.excluded
    }

    /// Replace the current task with a freshly generated one.
    /// On failure there is no current task until the next successful call.
    pub fn next_task(
        &mut self,
        options: &DrillOptions,
        rng: &mut dyn RngCore,
    ) -> Result<&Task, GenerationError> {
        self.pressed.clear();
        self.frozen = false;
        self.task = None;

        let task = self.generator.generate_task(options, &self.excluded, rng)?;
        Ok(self.task.insert(task))
    }

    /// Press or release a key and judge the result.
    /// Returns `None` while frozen or before any task exists.
    pub fn toggle_key(&mut self, midi: u8) -> Option<Verdict> {
        if self.frozen {
            return None;
        }
        let task = self.task.as_ref()?;

        if !self.pressed.remove(&midi) {
            self.pressed.insert(midi);
        }

        let verdict = validate_answer(&self.pressed, task);
        if verdict.is_correct() {
            self.frozen = true;
        }
        Some(verdict)
    }

    pub fn clear_keys(&mut self) {
        self.pressed.clear();
    }

    /// Hold down the answer for the current task and judge it.
    /// Returns `None` while frozen or before any task exists.
    pub fn reveal_answer(&mut self) -> Option<([u8; 3], Verdict)> {
        if self.frozen {
            return None;
        }
        let task = self.task.as_ref()?;
        let voicing = generate_voicing(
            KEYBOARD_BASE + task.root().value(),
            task.quality().intervals(),
            task.inversion(),
        )?;

        self.pressed = voicing.into_iter().collect();
        let verdict = validate_answer(&self.pressed, task);
        if verdict.is_correct() {
            self.frozen = true;
        }
        Some((voicing, verdict))
    }

    /// Exclude the current chord for the rest of the session.
    /// The caller is expected to request the next task afterwards.
    pub fn exclude_current(&mut self) -> Option<ChordId> {
        let id = self.task.as_ref()?.id();
        self.excluded.insert(id);
        Some(id)
    }

    /// Put an excluded chord back into rotation
    pub fn restore(&mut self, id: &ChordId) -> bool {
        self.excluded.remove(id)
    }

    pub fn restore_all(&mut self) {
        self.excluded.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ChordQuality, Inversion, PitchClass, NATURAL_ROOTS};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn options() -> DrillOptions {
        DrillOptions::new(true, false, [ChordQuality::Major], [Inversion::Root])
    }

    #[test]
    fn test_no_input_before_task() {
        let mut session = Session::new();
        assert_eq!(session.toggle_key(60), None);
        assert!(session.reveal_answer().is_none());
        assert!(session.exclude_current().is_none());
    }

    #[test]
    fn test_circle_session_plays_c_major() {
        let mut session = Session::with_mode(SequenceMode::Circle);
        let mut rng = StdRng::seed_from_u64(1);
        let task = session.next_task(&options(), &mut rng).unwrap();
        assert_eq!(task.root(), PitchClass::C);

        assert_eq!(session.toggle_key(60), Some(Verdict::Pending));
        assert_eq!(session.toggle_key(64), Some(Verdict::Pending));
        assert_eq!(session.toggle_key(67), Some(Verdict::Correct));
        assert!(session.is_frozen());

        // Frozen until the next task
        assert_eq!(session.toggle_key(72), None);
        session.next_task(&options(), &mut rng).unwrap();
        assert!(!session.is_frozen());
        assert!(session.pressed().is_empty());
    }

    #[test]
    fn test_toggle_releases_key() {
        let mut session = Session::with_mode(SequenceMode::Circle);
        let mut rng = StdRng::seed_from_u64(1);
        session.next_task(&options(), &mut rng).unwrap();

        session.toggle_key(64);
        session.toggle_key(67);
        assert_eq!(session.toggle_key(72), Some(Verdict::WrongInversion));
        assert_eq!(session.toggle_key(72), Some(Verdict::Pending));
        assert_eq!(session.pressed().len(), 2);
    }

    #[test]
    fn test_reveal_is_correct() {
        let mut session = Session::new();
        let mut rng = StdRng::seed_from_u64(9);
        let all = DrillOptions::new(true, true, ChordQuality::ALL, Inversion::ALL);

        for _ in 0..20 {
            session.next_task(&all, &mut rng).unwrap();
            let (voicing, verdict) = session.reveal_answer().unwrap();
            assert_eq!(verdict, Verdict::Correct);
            assert_eq!(session.pressed().len(), 3);
            assert!(voicing.iter().all(|m| session.pressed().contains(m)));
        }
    }

    #[test]
    fn test_reveal_ignored_once_solved() {
        let mut session = Session::with_mode(SequenceMode::Circle);
        let mut rng = StdRng::seed_from_u64(1);
        session.next_task(&options(), &mut rng).unwrap();

        let (_, verdict) = session.reveal_answer().unwrap();
        assert_eq!(verdict, Verdict::Correct);
        assert!(session.reveal_answer().is_none());
        assert_eq!(session.toggle_key(72), None);

        session.next_task(&options(), &mut rng).unwrap();
        assert!(session.reveal_answer().is_some());
    }

    #[test]
    fn test_exclude_until_completed_then_restore() {
        let mut session = Session::new();
        let mut rng = StdRng::seed_from_u64(3);
        let options = options();

        let mut rounds = 0;
        while session.next_task(&options, &mut rng).is_ok() {
            session.exclude_current().unwrap();
            rounds += 1;
            assert!(rounds <= NATURAL_ROOTS.len() * 10, "never completed");
        }
        assert!(session.task().is_none());
        assert!(!session.excluded().is_empty());

        session.restore_all();
        assert!(session.next_task(&options, &mut rng).is_ok());
    }

    #[test]
    fn test_restore_single_chord() {
        let mut session = Session::with_mode(SequenceMode::Circle);
        let mut rng = StdRng::seed_from_u64(5);
        session.next_task(&options(), &mut rng).unwrap();

        let id = session.exclude_current().unwrap();
        assert!(session.excluded().contains(&id));
        assert!(session.restore(&id));
        assert!(!session.restore(&id));
    }
}
