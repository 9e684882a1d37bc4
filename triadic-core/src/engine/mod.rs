// triadic-core/src/engine/mod.rs

pub mod alteration;
pub mod exclusion;
pub mod generator;
pub mod inversion;
pub mod sequence;
pub mod validator;

pub use alteration::{apply_shift, valid_shifts, Shift};
pub use exclusion::ExclusionSet;
pub use generator::{SequenceMode, TaskGenerator, MAX_ATTEMPTS};
pub use inversion::{calculate_target, generate_voicing, Target, VOICING_CEILING};
pub use sequence::{Candidate, CircleSequence, RandomSequence, Sequence};
pub use validator::{validate_answer, Verdict};
