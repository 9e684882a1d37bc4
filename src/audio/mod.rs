pub mod audio;
pub mod midi;

pub use audio::{midi_to_frequency, AudioPlayer};
pub use midi::MidiInputHandle;
