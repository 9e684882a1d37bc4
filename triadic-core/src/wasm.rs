//! WASM bindings for triadic-core
//!
//! Exposes a drill session to a browser front end. The page owns the piano
//! drawing, pointer handling, audio and timers; it calls in here on every
//! option change, key press and button click.

use crate::engine::SequenceMode;
use crate::session::Session;
use crate::types::{pitch::midi_name, ChordId, DrillOptions, Task};
use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;

// ============================================================================
// JS-serializable views
// ============================================================================

/// A task as the page sees it
#[derive(Debug, Clone, serde::Serialize)]
pub struct TaskJS {
    pub id: String,
    /// Chord symbol with ♯/♭, e.g. "E♭m"
    pub symbol: String,
    pub root: u8,
    pub quality: String,
    pub inversion: u8,
    pub inversion_name: String,
    pub target_pitch_classes: Vec<u8>,
    pub target_bass: u8,
}

impl From<&Task> for TaskJS {
    fn from(task: &Task) -> Self {
        TaskJS {
            id: task.id().to_string(),
            symbol: task.pretty_symbol(),
            root: task.root().value(),
            quality: task.quality().name().to_string(),
            inversion: task.inversion().index(),
            inversion_name: task.inversion().name().to_string(),
            target_pitch_classes: task
                .target_pitch_classes()
                .iter()
                .map(|pc| pc.value())
                .collect(),
            target_bass: task.target_bass().value(),
        }
    }
}

/// Result of asking for the next task: either `task` or an `error` code
#[derive(Debug, Clone, serde::Serialize)]
struct NextTaskJS {
    task: Option<TaskJS>,
    error: Option<&'static str>,
}

#[derive(Debug, Clone, serde::Serialize)]
struct RevealJS {
    notes: Vec<u8>,
    names: Vec<String>,
    verdict: &'static str,
}

#[derive(Debug, Clone, serde::Serialize)]
struct ExcludedJS {
    id: String,
    symbol: String,
}

// ============================================================================
// WASM Bindings
// ============================================================================

#[wasm_bindgen]
pub struct WasmTrainer {
    session: Session,
    options: DrillOptions,
    rng: StdRng,
}

#[wasm_bindgen]
impl WasmTrainer {
    /// Create a trainer seeded from `Math.random`
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
        Self::with_seed(seed)
    }

    /// Create a trainer with a fixed seed, for reproducible drills
    pub fn with_seed(seed: u64) -> Self {
        WasmTrainer {
            session: Session::new(),
            options: DrillOptions::default(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Switch between "random" and "circle"
    pub fn set_mode(&mut self, mode: &str) -> Result<(), JsValue> {
        let mode: SequenceMode = mode
            .parse()
            .map_err(|e: crate::error::ParseError| JsValue::from_str(&e.to_string()))?;
        self.session.set_mode(mode);
        Ok(())
    }

    pub fn mode(&self) -> String {
        self.session.mode().to_string()
    }

    /// Replace the options with a JS object of the same shape as `DrillOptions`
    pub fn set_options(&mut self, options: JsValue) -> Result<(), JsValue> {
        let mut options: DrillOptions = serde_wasm_bindgen::from_value(options)?;
        options.normalize();
        self.options = options;
        Ok(())
    }

    /// Replace the options from a JSON string
    pub fn set_options_json(&mut self, json: &str) -> Result<(), JsValue> {
        let mut options: DrillOptions =
            serde_json::from_str(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        options.normalize();
        self.options = options;
        Ok(())
    }

    pub fn options(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.options).unwrap_or(JsValue::NULL)
    }

    /// Generate the next task. Returns `{ task }` or `{ error }` where error is
    /// one of "no-types", "no-roots", "no-inversions" or "completed".
    pub fn next_task(&mut self) -> JsValue {
        let result = match self.session.next_task(&self.options, &mut self.rng) {
            Ok(task) => NextTaskJS {
                task: Some(task.into()),
                error: None,
            },
            Err(err) => NextTaskJS {
                task: None,
                error: Some(err.code()),
            },
        };
        serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
    }

    pub fn current_task(&self) -> JsValue {
        match self.session.task() {
            Some(task) => {
                serde_wasm_bindgen::to_value(&TaskJS::from(task)).unwrap_or(JsValue::NULL)
            }
            None => JsValue::NULL,
        }
    }

    /// Toggle a key. Returns the verdict code, or undefined while input is frozen.
    pub fn toggle_key(&mut self, midi: u8) -> Option<String> {
        self.session
            .toggle_key(midi)
            .map(|verdict| verdict.code().to_string())
    }

    pub fn pressed_keys(&self) -> Vec<u8> {
        self.session.pressed().iter().copied().collect()
    }

    pub fn clear_keys(&mut self) {
        self.session.clear_keys();
    }

    /// Hold down the answer. Returns `{ notes, names, verdict }` or null without a task or once solved.
    pub fn reveal_answer(&mut self) -> JsValue {
        match self.session.reveal_answer() {
            Some((notes, verdict)) => serde_wasm_bindgen::to_value(&RevealJS {
                notes: notes.to_vec(),
                names: notes.iter().map(|&m| midi_name(m)).collect(),
                verdict: verdict.code(),
            })
            .unwrap_or(JsValue::NULL),
            None => JsValue::NULL,
        }
    }

    /// Exclude the current chord and return its id
    pub fn exclude_current(&mut self) -> Option<String> {
        self.session.exclude_current().map(|id| id.to_string())
    }

    /// Restore an excluded chord by id ("<pitch class>|<quality>")
    pub fn restore(&mut self, id: &str) -> Result<bool, JsValue> {
        let id: ChordId = id
            .parse()
            .map_err(|e: crate::error::ParseError| JsValue::from_str(&e.to_string()))?;
        Ok(self.session.restore(&id))
    }

    /// List excluded chords as `[{ id, symbol }]`
    pub fn excluded(&self) -> JsValue {
        let list: Vec<ExcludedJS> = self
            .session
            .excluded()
            .iter()
            .map(|id| ExcludedJS {
                id: id.to_string(),
                symbol: crate::types::pitch::pretty_accidentals(&id.symbol()),
            })
            .collect();
        serde_wasm_bindgen::to_value(&list).unwrap_or(JsValue::NULL)
    }
}

impl Default for WasmTrainer {
    fn default() -> Self {
        Self::new()
    }
}
