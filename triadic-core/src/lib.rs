//! # Triadic Core
//!
//! WASM-compatible engine for the Triadic chord trainer.
//! Generates triad drills under learner-chosen constraints and judges the
//! keys pressed in answer, without any audio, MIDI or terminal dependencies.
//!
//! ## Features
//!
//! - **serde**: Enable (de)serialization of drill options
//! - **wasm**: Enable WASM bindings via wasm-bindgen
//!
//! ## Example
//!
//! ```ignore
//! use triadic_core::{DrillOptions, Session};
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(1);
//! let mut session = Session::new();
//! let task = session.next_task(&DrillOptions::default(), &mut rng)?;
//! println!("Play {}", task);
//! ```

pub mod engine;
pub mod error;
pub mod session;
pub mod types;
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use engine::{ExclusionSet, SequenceMode, TaskGenerator, Verdict};
pub use error::{GenerationError, ParseError};
pub use session::Session;
pub use types::{ChordId, ChordQuality, DrillOptions, Inversion, PitchClass, Task};
