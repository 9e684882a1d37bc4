use crate::error::ParseError;
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

/// Represents a pitch class as a semitone distance from C (0-11)
/// 0=C, 1=C#/Db, 2=D, 3=D#/Eb, 4=E, 5=F, 6=F#/Gb, 7=G, 8=G#/Ab, 9=A, 10=A#/Bb, 11=B
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PitchClass(u8);

/// Preferred spelling for a black-key pitch class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AccidentalPreference {
    #[default]
    Auto,
    Sharp,
    Flat,
}

/// Spellings indexed by pitch class: one for white keys, sharp then flat for black keys
const NOTE_NAMES: [&[&str]; 12] = [
    &["C"],
    &["C#", "Db"],
    &["D"],
    &["D#", "Eb"],
    &["E"],
    &["F"],
    &["F#", "Gb"],
    &["G"],
    &["G#", "Ab"],
    &["A"],
    &["A#", "Bb"],
    &["B"],
];

/// The seven white-key pitch classes: C, D, E, F, G, A, B
pub const NATURAL_ROOTS: [PitchClass; 7] = [
    PitchClass(0),
    PitchClass(2),
    PitchClass(4),
    PitchClass(5),
    PitchClass(7),
    PitchClass(9),
    PitchClass(11),
];

impl PitchClass {
    pub const C: PitchClass = PitchClass(0);

    /// Create a pitch class, rejecting values above 11
    pub fn new(value: u8) -> Result<Self, ParseError> {
        if value > 11 {
            return Err(ParseError::PitchClassOutOfRange(value));
        }
        Ok(PitchClass(value))
    }

    /// Wrap any semitone offset into 0-11
    pub fn from_semitones(semitones: i32) -> Self {
        PitchClass(semitones.rem_euclid(12) as u8)
    }

    /// Pitch class of an absolute MIDI note
    pub fn from_midi(midi: u8) -> Self {
        PitchClass(midi % 12)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// True for C#, D#, F#, G# and A#
    pub fn is_black_key(self) -> bool {
        matches!(self.0, 1 | 3 | 6 | 8 | 10)
    }

    pub fn is_natural(self) -> bool {
        !self.is_black_key()
    }

    /// Transpose by a number of semitones, wrapping around the octave
    pub fn transpose(self, semitones: i32) -> Self {
        Self::from_semitones(self.0 as i32 + semitones)
    }

    /// Name of this pitch class under a spelling preference.
    /// White keys ignore the preference; `Auto` spells black keys as sharps.
    pub fn name(self, preference: AccidentalPreference) -> &'static str {
        let names = NOTE_NAMES[self.0 as usize];
        match preference {
            AccidentalPreference::Flat if names.len() == 2 => names[1],
            _ => names[0],
        }
    }
}

impl Add<i8> for PitchClass {
    type Output = PitchClass;

    fn add(self, semitones: i8) -> PitchClass {
        self.transpose(semitones as i32)
    }
}

impl Sub<i8> for PitchClass {
    type Output = PitchClass;

    fn sub(self, semitones: i8) -> PitchClass {
        self.transpose(-(semitones as i32))
    }
}

impl TryFrom<u8> for PitchClass {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        PitchClass::new(value)
    }
}

impl From<PitchClass> for u8 {
    fn from(pc: PitchClass) -> u8 {
        pc.0
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name(AccidentalPreference::Auto))
    }
}

impl FromStr for PitchClass {
    type Err = ParseError;

    /// Parse a letter name with an optional `#`/`b` (or `♯`/`♭`), e.g. "Eb".
    /// Letter plus accidental wraps, so "Cb" is B and "E#" is F.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let letter = chars
            .next()
            .ok_or_else(|| ParseError::UnknownNote(s.to_string()))?;

        let base = match letter.to_ascii_uppercase() {
            'C' => 0,
            'D' => 2,
            'E' => 4,
            'F' => 5,
            'G' => 7,
            'A' => 9,
            'B' => 11,
            _ => return Err(ParseError::UnknownNote(s.to_string())),
        };

        let shift = match chars.as_str() {
            "" => 0,
            "#" | "♯" | "s" => 1,
            "b" | "♭" => -1,
            _ => return Err(ParseError::UnknownNote(s.to_string())),
        };

        Ok(PitchClass::from_semitones(base + shift))
    }
}

/// A pitch class paired with the label it should be displayed with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoteSpelling {
    pitch_class: PitchClass,
    preference: AccidentalPreference,
}

impl NoteSpelling {
    pub fn new(pitch_class: PitchClass, preference: AccidentalPreference) -> Self {
        NoteSpelling {
            pitch_class,
            preference,
        }
    }

    pub fn pitch_class(&self) -> PitchClass {
        self.pitch_class
    }

    pub fn preference(&self) -> AccidentalPreference {
        self.preference
    }

    /// Plain ASCII label, e.g. "Db"
    pub fn label(&self) -> &'static str {
        self.pitch_class.name(self.preference)
    }

    /// Label with typographic accidentals, e.g. "D♭"
    pub fn pretty(&self) -> String {
        pretty_accidentals(self.label())
    }
}

impl fmt::Display for NoteSpelling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Replace ASCII accidentals in a note label with ♯ and ♭
pub fn pretty_accidentals(label: &str) -> String {
    label.replacen('#', "♯", 1).replacen('b', "♭", 1)
}

/// Name an absolute MIDI note with its octave, e.g. 60 -> "C4"
pub fn midi_name(midi: u8) -> String {
    let octave = (midi / 12) as i16 - 1;
    format!("{}{}", PitchClass::from_midi(midi), octave)
}

/// Parse a key given either as a MIDI number ("60") or a note with octave ("C4", "Eb3")
pub fn parse_midi_note(s: &str) -> Result<u8, ParseError> {
    let s = s.trim();
    if let Ok(number) = s.parse::<u8>() {
        return if number <= 127 {
            Ok(number)
        } else {
            Err(ParseError::MidiOutOfRange(s.to_string()))
        };
    }

    let split = s
        .find(|c: char| c.is_ascii_digit() || c == '-')
        .ok_or_else(|| ParseError::UnknownNote(s.to_string()))?;
    let (name, octave) = s.split_at(split);
    let octave: i16 = octave
        .parse()
        .map_err(|_| ParseError::UnknownNote(s.to_string()))?;

    // Letter base before wrapping, so "B#3" lands on C4 and "Cb4" on B3
    let pitch_class: PitchClass = name.parse()?;
    let letter_offset: i16 = match name.chars().next().map(|c| c.to_ascii_uppercase()) {
        Some('C') => 0,
        Some('D') => 2,
        Some('E') => 4,
        Some('F') => 5,
        Some('G') => 7,
        Some('A') => 9,
        _ => 11,
    };
    let shift = pitch_class.value() as i16 - letter_offset;
    let shift = if shift > 6 {
        shift - 12
    } else if shift < -6 {
        shift + 12
    } else {
        shift
    };

    let midi = (octave + 1) * 12 + letter_offset + shift;
    if (0..=127).contains(&midi) {
        Ok(midi as u8)
    } else {
        Err(ParseError::MidiOutOfRange(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_class_range() {
        assert!(PitchClass::new(11).is_ok());
        assert_eq!(
            PitchClass::new(12),
            Err(ParseError::PitchClassOutOfRange(12))
        );
    }

    #[test]
    fn test_transpose_wraps() {
        let b = PitchClass::new(11).unwrap();
        assert_eq!((b + 1).value(), 0);
        assert_eq!((PitchClass::C - 1).value(), 11);
        assert_eq!(PitchClass::C.transpose(-25).value(), 11);
    }

    #[test]
    fn test_black_keys() {
        let black: Vec<u8> = (0..12)
            .filter(|&v| PitchClass::new(v).unwrap().is_black_key())
            .collect();
        assert_eq!(black, vec![1, 3, 6, 8, 10]);
        assert!(NATURAL_ROOTS.iter().all(|pc| pc.is_natural()));
    }

    #[test]
    fn test_names_follow_preference() {
        let cs = PitchClass::new(1).unwrap();
        assert_eq!(cs.name(AccidentalPreference::Auto), "C#");
        assert_eq!(cs.name(AccidentalPreference::Sharp), "C#");
        assert_eq!(cs.name(AccidentalPreference::Flat), "Db");

        // Naturals have only one spelling
        let e = PitchClass::new(4).unwrap();
        assert_eq!(e.name(AccidentalPreference::Flat), "E");
    }

    #[test]
    fn test_parse_note_names() {
        assert_eq!("C".parse::<PitchClass>().unwrap().value(), 0);
        assert_eq!("eb".parse::<PitchClass>().unwrap().value(), 3);
        assert_eq!("F#".parse::<PitchClass>().unwrap().value(), 6);
        assert_eq!("Cb".parse::<PitchClass>().unwrap().value(), 11);
        assert!("H".parse::<PitchClass>().is_err());
        assert!("C##".parse::<PitchClass>().is_err());
    }

    #[test]
    fn test_pretty_spelling() {
        let bb = NoteSpelling::new(PitchClass::new(10).unwrap(), AccidentalPreference::Flat);
        assert_eq!(bb.label(), "Bb");
        assert_eq!(bb.pretty(), "B♭");

        // A lone B must not be turned into a flat sign
        let b = NoteSpelling::new(PitchClass::new(11).unwrap(), AccidentalPreference::Auto);
        assert_eq!(b.pretty(), "B");
    }

    #[test]
    fn test_midi_names() {
        assert_eq!(midi_name(60), "C4");
        assert_eq!(midi_name(48), "C3");
        assert_eq!(midi_name(71), "B4");
    }

    #[test]
    fn test_parse_midi_note() {
        assert_eq!(parse_midi_note("64").unwrap(), 64);
        assert_eq!(parse_midi_note("C4").unwrap(), 60);
        assert_eq!(parse_midi_note("Eb3").unwrap(), 51);
        assert_eq!(parse_midi_note("B#3").unwrap(), 60);
        assert_eq!(parse_midi_note("Cb4").unwrap(), 59);
        assert!(parse_midi_note("200").is_err());
        assert!(parse_midi_note("X4").is_err());
        assert!(parse_midi_note("C").is_err());
    }
}
