//! Learner-configured drill options
//!
//! A snapshot of these is handed to every generation call. The front end
//! gathers them from toggles, REPL commands or a JSON file; the engine
//! only ever reads them.

use crate::error::GenerationError;
use crate::types::{ChordQuality, Inversion, PitchClass};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct DrillOptions {
    /// Drill white-key roots (C, D, E, F, G, A, B)
    pub allow_natural: bool,
    /// Drill black-key roots reached by sharpening or flattening a natural
    pub allow_accidental: bool,
    pub qualities: Vec<ChordQuality>,
    pub inversions: Vec<Inversion>,
}

impl Default for DrillOptions {
    fn default() -> Self {
        DrillOptions {
            allow_natural: true,
            allow_accidental: false,
            qualities: ChordQuality::ALL.to_vec(),
            inversions: Inversion::ALL.to_vec(),
        }
    }
}

impl DrillOptions {
    pub fn new(
        allow_natural: bool,
        allow_accidental: bool,
        qualities: impl IntoIterator<Item = ChordQuality>,
        inversions: impl IntoIterator<Item = Inversion>,
    ) -> Self {
        let mut options = DrillOptions {
            allow_natural,
            allow_accidental,
            qualities: qualities.into_iter().collect(),
            inversions: inversions.into_iter().collect(),
        };
        options.normalize();
        options
    }

    /// Sort and deduplicate the enabled sets so draws are uniform
    pub fn normalize(&mut self) {
        self.qualities.sort();
        self.qualities.dedup();
        self.inversions.sort();
        self.inversions.dedup();
    }

    /// Check the options can produce any task at all.
    /// Checks run in a fixed order so callers see a stable error.
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.qualities.is_empty() {
            return Err(GenerationError::NoQualities);
        }
        if !self.allow_natural && !self.allow_accidental {
            return Err(GenerationError::NoRoots);
        }
        if self.inversions.is_empty() {
            return Err(GenerationError::NoInversions);
        }
        Ok(())
    }

    /// Whether a root that is used as-is (no alteration) passes the root gates
    pub fn allows_root(&self, root: PitchClass) -> bool {
        if root.is_black_key() {
            self.allow_accidental
        } else {
            self.allow_natural
        }
    }

    pub fn allows_inversion(&self, inversion: Inversion) -> bool {
        self.inversions.contains(&inversion)
    }
}
