//! Task generator
//!
//! Asks the active strategy for candidates and keeps the first one that
//! survives every check. The search is bounded by `MAX_ATTEMPTS`, so a nearly
//! unsatisfiable combination of options and exclusions ends in
//! `GenerationError::Completed` instead of spinning.

use crate::engine::alteration::{apply_shift, valid_shifts, Shift};
use crate::engine::exclusion::ExclusionSet;
use crate::engine::sequence::{Candidate, CircleSequence, RandomSequence, Sequence};
use crate::error::{GenerationError, ParseError};
use crate::types::{ChordId, DrillOptions, Inversion, NoteSpelling, Task};
use rand::RngCore;
use std::fmt;
use std::str::FromStr;

/// Candidates drawn per `generate_task` call before giving up
pub const MAX_ATTEMPTS: usize = 40;

/// Which sequencing strategy drives generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum SequenceMode {
    #[default]
    Random,
    Circle,
}

impl SequenceMode {
    pub fn name(&self) -> &'static str {
        match self {
            SequenceMode::Random => "random",
            SequenceMode::Circle => "circle",
        }
    }
}

impl fmt::Display for SequenceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for SequenceMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "random" => Ok(SequenceMode::Random),
            "circle" | "fifths" => Ok(SequenceMode::Circle),
            _ => Err(ParseError::UnknownMode(s.to_string())),
        }
    }
}

/// Why a candidate was discarded. Never leaves this module except in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Miss {
    StaleShift(Shift),
    RootGated,
    NoQuality,
    Excluded(ChordId),
    InversionDisabled(Inversion),
}

impl fmt::Display for Miss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Miss::StaleShift(shift) => write!(f, "shift {:?} no longer valid", shift),
            Miss::RootGated => write!(f, "root disabled by root options"),
            Miss::NoQuality => write!(f, "candidate has no quality"),
            Miss::Excluded(id) => write!(f, "{} is excluded", id),
            Miss::InversionDisabled(inv) => write!(f, "{} is disabled", inv),
        }
    }
}

/// Owns the sequencing strategies and turns their candidates into tasks
#[derive(Debug, Clone, Default)]
pub struct TaskGenerator {
    mode: SequenceMode,
    random: RandomSequence,
    circle: CircleSequence,
}

impl TaskGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mode: SequenceMode) -> Self {
        let mut generator = Self::new();
        generator.set_mode(mode);
        generator
    }

    pub fn mode(&self) -> SequenceMode {
        self.mode
    }

    /// Switch strategies. The newly selected strategy always starts fresh.
    pub fn set_mode(&mut self, mode: SequenceMode) {
        self.mode = mode;
        self.strategy_mut().reset();
        log::debug!("sequence mode set to {}", mode);
    }

    fn strategy_mut(&mut self) -> &mut dyn Sequence {
        match self.mode {
            SequenceMode::Random => &mut self.random,
            SequenceMode::Circle => &mut self.circle,
        }
    }

    /// Produce the next task, or say why none can be produced
    pub fn generate_task(
        &mut self,
        options: &DrillOptions,
        excluded: &ExclusionSet,
        rng: &mut dyn RngCore,
    ) -> Result<Task, GenerationError> {
        options.validate()?;

        for attempt in 0..MAX_ATTEMPTS {
            let Some(candidate) = self.strategy_mut().next(options, rng) else {
                log::info!("{} sequence exhausted", self.mode);
                return Err(GenerationError::Completed);
            };

            match Self::resolve(&candidate, options, excluded) {
                Ok(task) => {
                    log::debug!("generated {} after {} attempt(s)", task, attempt + 1);
                    return Ok(task);
                }
                Err(miss) => log::trace!("attempt {}: {}", attempt + 1, miss),
            }
        }

        log::info!(
            "no eligible chord after {} attempts ({} excluded)",
            MAX_ATTEMPTS,
            excluded.len()
        );
        Err(GenerationError::Completed)
    }

    /// Check one candidate against the current options and exclusions
    fn resolve(
        candidate: &Candidate,
        options: &DrillOptions,
        excluded: &ExclusionSet,
    ) -> Result<Task, Miss> {
        let spelling = if candidate.fixed_root {
            if candidate.shift != Shift::Natural {
                return Err(Miss::StaleShift(candidate.shift));
            }
            if !options.allows_root(candidate.root) {
                return Err(Miss::RootGated);
            }
            NoteSpelling::new(candidate.root, candidate.preference)
        } else {
            let shifts = valid_shifts(
                candidate.root,
                options.allow_natural,
                options.allow_accidental,
            );
            if !shifts.contains(&candidate.shift) {
                return Err(Miss::StaleShift(candidate.shift));
            }
            apply_shift(candidate.root, candidate.shift).1
        };

        let quality = candidate.quality.ok_or(Miss::NoQuality)?;

        let id = ChordId::new(spelling.pitch_class(), quality);
        if excluded.contains(&id) {
            return Err(Miss::Excluded(id));
        }

        let inversion = candidate.inversion.unwrap_or_default();
        if !options.allows_inversion(inversion) {
            return Err(Miss::InversionDisabled(inversion));
        }

        Ok(Task::new(spelling, quality, inversion))
    }
}
