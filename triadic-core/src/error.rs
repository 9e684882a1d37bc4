use thiserror::Error;

/// Why `TaskGenerator::generate_task` could not produce a task.
///
/// The first three variants are configuration errors: retrying is pointless
/// until the options change. `Completed` means every reachable chord is
/// excluded (or the attempt budget ran out) and can be cleared by restoring
/// exclusions or widening the options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum GenerationError {
    #[error("no chord qualities are enabled")]
    NoQualities,
    #[error("neither natural nor accidental roots are enabled")]
    NoRoots,
    #[error("no inversions are enabled")]
    NoInversions,
    #[error("no eligible chord remains under the current options")]
    Completed,
}

impl GenerationError {
    /// Stable short code, used by the web bindings and in logs
    pub fn code(&self) -> &'static str {
        match self {
            GenerationError::NoQualities => "no-types",
            GenerationError::NoRoots => "no-roots",
            GenerationError::NoInversions => "no-inversions",
            GenerationError::Completed => "completed",
        }
    }

    pub fn is_configuration(&self) -> bool {
        !matches!(self, GenerationError::Completed)
    }
}

/// Failure to parse user-supplied text into a core type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("pitch class must be 0-11, got {0}")]
    PitchClassOutOfRange(u8),
    #[error("unknown note name '{0}'")]
    UnknownNote(String),
    #[error("MIDI note out of range: '{0}'")]
    MidiOutOfRange(String),
    #[error("unknown chord quality '{0}'")]
    UnknownQuality(String),
    #[error("unknown inversion '{0}' (expected 0, 1 or 2)")]
    UnknownInversion(String),
    #[error("unknown sequence mode '{0}' (expected random or circle)")]
    UnknownMode(String),
    #[error("malformed chord id '{0}' (expected <pitch class>|<quality>)")]
    MalformedChordId(String),
}
