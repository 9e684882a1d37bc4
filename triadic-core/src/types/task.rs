use crate::engine::inversion::{calculate_target, Target};
use crate::error::ParseError;
use crate::types::{AccidentalPreference, ChordQuality, Inversion, NoteSpelling, PitchClass};
use std::fmt;
use std::str::FromStr;

/// Identity of a chord for deduplication and exclusion.
///
/// Only the root pitch class and quality take part, so "C#" and "Db" major are
/// the same chord, and so are all inversions of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChordId {
    root: PitchClass,
    quality: ChordQuality,
}

impl ChordId {
    pub fn new(root: PitchClass, quality: ChordQuality) -> Self {
        ChordId { root, quality }
    }

    pub fn root(&self) -> PitchClass {
        self.root
    }

    pub fn quality(&self) -> ChordQuality {
        self.quality
    }

    /// Chord symbol for listings, e.g. "C#m"
    pub fn symbol(&self) -> String {
        format!("{}{}", self.root, self.quality.suffix())
    }
}

impl fmt::Display for ChordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.root.value(), self.quality.name())
    }
}

impl FromStr for ChordId {
    type Err = ParseError;

    /// Parse the `<pitch class>|<quality>` form produced by `Display`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ParseError::MalformedChordId(s.to_string());

        let (root, quality) = s.trim().split_once('|').ok_or_else(malformed)?;
        let root: u8 = root.parse().map_err(|_| malformed())?;

        Ok(ChordId {
            root: PitchClass::new(root)?,
            quality: quality.parse()?,
        })
    }
}

/// One chord the learner is asked to play.
///
/// Tasks are never mutated; the next request replaces the current task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: ChordId,
    spelling: NoteSpelling,
    quality: ChordQuality,
    inversion: Inversion,
    target: Target,
}

impl Task {
    /// Build a task for a root spelling, quality and inversion
    pub fn new(spelling: NoteSpelling, quality: ChordQuality, inversion: Inversion) -> Self {
        let root = spelling.pitch_class();
        Task {
            id: ChordId::new(root, quality),
            spelling,
            quality,
            inversion,
            target: calculate_target(root, quality.intervals(), inversion),
        }
    }

    pub fn id(&self) -> ChordId {
        self.id
    }

    pub fn root(&self) -> PitchClass {
        self.spelling.pitch_class()
    }

    pub fn spelling(&self) -> NoteSpelling {
        self.spelling
    }

    pub fn preference(&self) -> AccidentalPreference {
        self.spelling.preference()
    }

    pub fn quality(&self) -> ChordQuality {
        self.quality
    }

    pub fn inversion(&self) -> Inversion {
        self.inversion
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn target_pitch_classes(&self) -> [PitchClass; 3] {
        self.target.pitch_classes
    }

    pub fn target_bass(&self) -> PitchClass {
        self.target.bass
    }

    /// Chord symbol with the task's spelling, e.g. "Ebm"
    pub fn symbol(&self) -> String {
        format!("{}{}", self.spelling.label(), self.quality.suffix())
    }

    /// Chord symbol with typographic accidentals, e.g. "E♭m"
    pub fn pretty_symbol(&self) -> String {
        format!("{}{}", self.spelling.pretty(), self.quality.suffix())
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.symbol(), self.inversion.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pc(value: u8) -> PitchClass {
        PitchClass::new(value).unwrap()
    }

    #[test]
    fn test_id_ignores_spelling_and_inversion() {
        let sharp = Task::new(
            NoteSpelling::new(pc(1), AccidentalPreference::Sharp),
            ChordQuality::Major,
            Inversion::Root,
        );
        let flat = Task::new(
            NoteSpelling::new(pc(1), AccidentalPreference::Flat),
            ChordQuality::Major,
            Inversion::Second,
        );
        assert_eq!(sharp.id(), flat.id());
        assert_ne!(sharp.symbol(), flat.symbol());
    }

    #[test]
    fn test_id_text_form() {
        let id = ChordId::new(pc(1), ChordQuality::Major);
        assert_eq!(id.to_string(), "1|Major");
        assert_eq!("1|Major".parse::<ChordId>().unwrap(), id);
        assert_eq!(id.symbol(), "C#");
    }

    #[test]
    fn test_malformed_ids() {
        assert!("1-Major".parse::<ChordId>().is_err());
        assert!("x|Major".parse::<ChordId>().is_err());
        assert!("12|Major".parse::<ChordId>().is_err());
        assert!("1|Sus".parse::<ChordId>().is_err());
    }

    #[test]
    fn test_task_target() {
        let task = Task::new(
            NoteSpelling::new(pc(3), AccidentalPreference::Flat),
            ChordQuality::Minor,
            Inversion::First,
        );
        assert_eq!(task.symbol(), "Ebm");
        assert_eq!(task.pretty_symbol(), "E♭m");
        assert_eq!(task.target_pitch_classes(), [pc(3), pc(6), pc(10)]);
        assert_eq!(task.target_bass(), pc(6));
        assert_eq!(task.to_string(), "Ebm (1st Inversion)");
    }
}
