// triadic-core/src/types/mod.rs

pub mod inversion;
pub mod options;
pub mod pitch;
pub mod quality;
pub mod task;

pub use inversion::Inversion;
pub use options::DrillOptions;
pub use pitch::{AccidentalPreference, NoteSpelling, PitchClass, NATURAL_ROOTS};
pub use quality::ChordQuality;
pub use task::{ChordId, Task};
