//! MIDI input for Triadic
//!
//! Note On messages from a hardware keyboard are forwarded as key toggles
//! over a crossbeam channel, so the REPL loop can select on them alongside
//! typed input.

use anyhow::{anyhow, Result};
use crossbeam_channel::Sender;
use midir::{Ignore, MidiInput, MidiInputConnection};

const CLIENT_NAME: &str = "Triadic";

/// Extract the note number from a Note On message.
/// Note On with velocity 0 is a Note Off by convention and is ignored.
pub fn parse_note_on(message: &[u8]) -> Option<u8> {
    match message {
        [status, note, velocity, ..] if status & 0xF0 == 0x90 && *velocity > 0 => {
            Some(note & 0x7F)
        }
        _ => None,
    }
}

/// An open MIDI input connection; closed when dropped
pub struct MidiInputHandle {
    _connection: MidiInputConnection<()>,
    port_name: String,
}

impl MidiInputHandle {
    /// List available MIDI input ports
    /// Note: Creates a temporary MIDI client, which can sometimes fail on macOS.
    /// Retries up to 3 times with a small delay.
    pub fn list_ports() -> Result<Vec<String>> {
        let mut last_err = None;
        for attempt in 0..3 {
            if attempt > 0 {
                std::thread::sleep(std::time::Duration::from_millis(100));
            }
            match MidiInput::new(CLIENT_NAME) {
                Ok(midi_in) => {
                    let names: Vec<String> = midi_in
                        .ports()
                        .iter()
                        .filter_map(|p| midi_in.port_name(p).ok())
                        .collect();
                    return Ok(names);
                }
                Err(e) => {
                    last_err = Some(e);
                }
            }
        }
        Err(anyhow!(
            "MIDI initialization failed after 3 attempts: {:?}",
            last_err
        ))
    }

    /// Connect to an input port by name (partial match supported) and
    /// forward every Note On to `tx`
    pub fn connect(port_name: &str, tx: Sender<u8>) -> Result<Self> {
        let mut midi_in = MidiInput::new(CLIENT_NAME)?;
        midi_in.ignore(Ignore::All);

        let ports = midi_in.ports();
        let port = ports
            .iter()
            .find(|p| {
                midi_in
                    .port_name(p)
                    .map(|name| name.contains(port_name))
                    .unwrap_or(false)
            })
            .ok_or_else(|| anyhow!("MIDI port '{}' not found", port_name))?;

        let actual_name = midi_in.port_name(port)?;
        let connection = midi_in
            .connect(
                port,
                "triadic-in",
                move |_stamp, message, _| {
                    if let Some(note) = parse_note_on(message) {
                        // Receiver gone means the REPL is shutting down
                        let _ = tx.send(note);
                    }
                },
                (),
            )
            .map_err(|e| anyhow!("Failed to connect to '{}': {}", actual_name, e))?;

        log::info!("listening on MIDI port {}", actual_name);
        Ok(Self {
            _connection: connection,
            port_name: actual_name,
        })
    }

    /// Full name of the connected port
    pub fn port_name(&self) -> &str {
        &self.port_name
    }
}
