use anyhow::{anyhow, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Sample, SampleFormat, SizedSample, Stream, StreamConfig};
use std::sync::{Arc, Mutex};

/// Seconds between successive notes of a strummed chord
pub const STRUM_OFFSET: f32 = 0.05;

/// Seconds for a voice to fall to 1/e of its starting level
const DECAY_TIME: f32 = 0.5;

/// Level below which a voice is dropped from the mix
const SILENCE: f32 = 0.001;

const VOLUME: f32 = 0.2;

/// Equal-tempered frequency of a MIDI note, A4 (69) = 440 Hz
pub fn midi_to_frequency(midi: u8) -> f32 {
    440.0 * 2f32.powf((midi as f32 - 69.0) / 12.0)
}

/// A decaying sine tone, optionally delayed
#[derive(Debug, Clone, PartialEq)]
pub struct Voice {
    frequency: f32,
    /// Samples of silence before the tone starts
    delay: u32,
    /// Position within the current cycle, 0.0..1.0
    phase: f32,
    level: f32,
}

impl Voice {
    pub fn new(frequency: f32, delay: u32) -> Self {
        Voice {
            frequency,
            delay,
            phase: 0.0,
            level: 1.0,
        }
    }

    fn next_sample(&mut self, sample_rate: f32, decay: f32) -> f32 {
        if self.delay > 0 {
            self.delay -= 1;
            return 0.0;
        }
        let value = self.level * (2.0 * std::f32::consts::PI * self.phase).sin();
        self.phase = (self.phase + self.frequency / sample_rate) % 1.0;
        self.level *= decay;
        value
    }

    fn is_silent(&self) -> bool {
        self.delay == 0 && self.level < SILENCE
    }
}

// Shared between the REPL thread and the audio callback
pub struct AudioState {
    pub voices: Vec<Voice>,
    sample_rate: f32,
    /// Per-sample level multiplier derived from `DECAY_TIME`
    decay: f32,
}

impl AudioState {
    pub fn new(sample_rate: f32) -> Self {
        AudioState {
            voices: Vec::new(),
            sample_rate,
            decay: (-1.0 / (DECAY_TIME * sample_rate)).exp(),
        }
    }

    /// Start a single tone now
    pub fn add_tone(&mut self, midi: u8) {
        self.voices.push(Voice::new(midi_to_frequency(midi), 0));
    }

    /// Start the notes lowest first, `STRUM_OFFSET` apart
    pub fn add_strum(&mut self, notes: &[u8]) {
        let mut sorted = notes.to_vec();
        sorted.sort_unstable();
        let step = (STRUM_OFFSET * self.sample_rate) as u32;
        for (i, midi) in sorted.into_iter().enumerate() {
            self.voices
                .push(Voice::new(midi_to_frequency(midi), step * i as u32));
        }
    }

    /// Mix one mono sample and drop voices that have died away
    pub fn next_frame(&mut self) -> f32 {
        let (sample_rate, decay) = (self.sample_rate, self.decay);
        let sum: f32 = self
            .voices
            .iter_mut()
            .map(|v| v.next_sample(sample_rate, decay))
            .sum();
        self.voices.retain(|v| !v.is_silent());
        (sum * VOLUME).clamp(-1.0, 1.0)
    }
}

pub struct AudioPlayer {
    stream: Stream,
    state: Arc<Mutex<AudioState>>,
}

impl AudioPlayer {
    pub fn new() -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| anyhow!("No output device available"))?;
        let config = device.default_output_config()?;

        let sample_format = config.sample_format();
        let config: StreamConfig = config.into();

        let state = Arc::new(Mutex::new(AudioState::new(config.sample_rate.0 as f32)));
        let stream = match sample_format {
            SampleFormat::F32 => Self::build_stream::<f32>(&device, &config, state.clone())?,
            SampleFormat::I16 => Self::build_stream::<i16>(&device, &config, state.clone())?,
            SampleFormat::U16 => Self::build_stream::<u16>(&device, &config, state.clone())?,
            _ => return Err(anyhow!("Unsupported sample format: {:?}", sample_format)),
        };

        Ok(AudioPlayer { stream, state })
    }

    fn build_stream<T>(
        device: &cpal::Device,
        config: &StreamConfig,
        state: Arc<Mutex<AudioState>>,
    ) -> Result<Stream>
    where
        T: Sample + SizedSample + Send + 'static + cpal::FromSample<f32>,
    {
        let channels = config.channels as usize;
        let err_fn = |err| log::error!("an error occurred on the output audio stream: {:?}", err);

        let stream = device
            .build_output_stream(
                config,
                move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                    let Ok(mut state) = state.lock() else {
                        data.fill(T::EQUILIBRIUM);
                        return;
                    };
                    for frame in data.chunks_mut(channels) {
                        let value: T = cpal::Sample::from_sample(state.next_frame());
                        for sample in frame.iter_mut() {
                            *sample = value;
                        }
                    }
                },
                err_fn,
                None,
            )
            .map_err(|e| anyhow!("Failed to build output stream: {}", e))?;

        Ok(stream)
    }

    fn with_state(&self, f: impl FnOnce(&mut AudioState)) -> Result<()> {
        let mut state = self
            .state
            .lock()
            .map_err(|e| anyhow!("Failed to lock audio state: {}", e))?;
        f(&mut state);
        Ok(())
    }

    /// Short tone for a key press
    pub fn play_tone(&self, midi: u8) -> Result<()> {
        self.with_state(|state| state.add_tone(midi))
    }

    /// Strummed chord for a solved or revealed task
    pub fn strum(&self, notes: &[u8]) -> Result<()> {
        self.with_state(|state| state.add_strum(notes))
    }

    pub fn silence(&self) -> Result<()> {
        self.with_state(|state| state.voices.clear())
    }

    pub fn play(&self) -> Result<()> {
        self.stream
            .play()
            .map_err(|e| anyhow!("Failed to play stream: {}", e))
    }

    pub fn pause(&self) -> Result<()> {
        self.stream
            .pause()
            .map_err(|e| anyhow!("Failed to pause stream: {}", e))
    }
}
