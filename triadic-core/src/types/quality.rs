use crate::error::ParseError;
use std::fmt;
use std::str::FromStr;

/// The four triad qualities the trainer drills
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChordQuality {
    Major,
    Minor,
    Diminished,
    Augmented,
}

impl ChordQuality {
    pub const ALL: [ChordQuality; 4] = [
        ChordQuality::Major,
        ChordQuality::Minor,
        ChordQuality::Diminished,
        ChordQuality::Augmented,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ChordQuality::Major => "Major",
            ChordQuality::Minor => "Minor",
            ChordQuality::Diminished => "Diminished",
            ChordQuality::Augmented => "Augmented",
        }
    }

    /// Suffix appended to the root in chord symbols ("", "m", "dim", "aug")
    pub fn suffix(&self) -> &'static str {
        match self {
            ChordQuality::Major => "",
            ChordQuality::Minor => "m",
            ChordQuality::Diminished => "dim",
            ChordQuality::Augmented => "aug",
        }
    }

    /// Semitone offsets of root, third and fifth
    pub fn intervals(&self) -> [u8; 3] {
        match self {
            ChordQuality::Major => [0, 4, 7],
            ChordQuality::Minor => [0, 3, 7],
            ChordQuality::Diminished => [0, 3, 6],
            ChordQuality::Augmented => [0, 4, 8],
        }
    }
}

impl fmt::Display for ChordQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ChordQuality {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "major" | "maj" => Ok(ChordQuality::Major),
            "minor" | "min" | "m" => Ok(ChordQuality::Minor),
            "diminished" | "dim" | "o" => Ok(ChordQuality::Diminished),
            "augmented" | "aug" | "+" => Ok(ChordQuality::Augmented),
            _ => Err(ParseError::UnknownQuality(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_intervals() {
        assert_eq!(ChordQuality::Major.intervals(), [0, 4, 7]);
        assert_eq!(ChordQuality::Minor.intervals(), [0, 3, 7]);
        assert_eq!(ChordQuality::Diminished.intervals(), [0, 3, 6]);
        assert_eq!(ChordQuality::Augmented.intervals(), [0, 4, 8]);

        for quality in ChordQuality::ALL {
            assert!(quality.intervals().iter().all(|&iv| iv < 12));
        }
    }

    #[test]
    fn test_parse_quality() {
        assert_eq!("Major".parse::<ChordQuality>().unwrap(), ChordQuality::Major);
        assert_eq!("m".parse::<ChordQuality>().unwrap(), ChordQuality::Minor);
        assert_eq!("DIM".parse::<ChordQuality>().unwrap(), ChordQuality::Diminished);
        assert_eq!("aug".parse::<ChordQuality>().unwrap(), ChordQuality::Augmented);
        assert!("sus4".parse::<ChordQuality>().is_err());
    }

    #[test]
    fn test_name_round_trips_through_parse() {
        for quality in ChordQuality::ALL {
            assert_eq!(quality.name().parse::<ChordQuality>().unwrap(), quality);
        }
    }
}
