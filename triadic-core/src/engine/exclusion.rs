use crate::types::ChordId;
use std::collections::BTreeSet;

/// Chords the learner has chosen to skip for the rest of the session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    ids: BTreeSet<ChordId>,
}

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the chord was already excluded
    pub fn insert(&mut self, id: ChordId) -> bool {
        let added = self.ids.insert(id);
        if added {
            log::debug!("excluded {} ({})", id.symbol(), id);
        }
        added
    }

    /// Returns false if the chord was not excluded
    pub fn remove(&mut self, id: &ChordId) -> bool {
        let removed = self.ids.remove(id);
        if removed {
            log::debug!("restored {} ({})", id.symbol(), id);
        }
        removed
    }

    pub fn contains(&self, id: &ChordId) -> bool {
        self.ids.contains(id)
    }

    /// Excluded chords in pitch-class then quality order
    pub fn iter(&self) -> impl Iterator<Item = &ChordId> {
        self.ids.iter()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

impl FromIterator<ChordId> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = ChordId>>(iter: I) -> Self {
        ExclusionSet {
            ids: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ChordQuality, PitchClass};

    #[test]
    fn test_insert_remove() {
        let id = ChordId::new(PitchClass::C, ChordQuality::Major);
        let mut set = ExclusionSet::new();

        assert!(set.insert(id));
        assert!(!set.insert(id));
        assert!(set.contains(&id));
        assert_eq!(set.len(), 1);

        assert!(set.remove(&id));
        assert!(!set.remove(&id));
        assert!(set.is_empty());
    }

    #[test]
    fn test_listing_order() {
        let set: ExclusionSet = [
            ChordId::new(PitchClass::new(7).unwrap(), ChordQuality::Major),
            ChordId::new(PitchClass::C, ChordQuality::Minor),
            ChordId::new(PitchClass::C, ChordQuality::Major),
        ]
        .into_iter()
        .collect();

        let listed: Vec<String> = set.iter().map(|id| id.to_string()).collect();
        assert_eq!(listed, vec!["0|Major", "0|Minor", "7|Major"]);
    }
}
