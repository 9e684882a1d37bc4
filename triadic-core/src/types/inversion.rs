use crate::error::ParseError;
use std::fmt;
use std::str::FromStr;

/// Which chord tone sits in the bass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u8", into = "u8")
)]
pub enum Inversion {
    #[default]
    Root,
    First,
    Second,
}

impl Inversion {
    pub const ALL: [Inversion; 3] = [Inversion::Root, Inversion::First, Inversion::Second];

    pub fn from_index(index: u8) -> Option<Inversion> {
        match index {
            0 => Some(Inversion::Root),
            1 => Some(Inversion::First),
            2 => Some(Inversion::Second),
            _ => None,
        }
    }

    pub fn index(&self) -> u8 {
        match self {
            Inversion::Root => 0,
            Inversion::First => 1,
            Inversion::Second => 2,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Inversion::Root => "Root Position",
            Inversion::First => "1st Inversion",
            Inversion::Second => "2nd Inversion",
        }
    }

    /// Index into the interval list of the tone that is in the bass
    pub fn bass_slot(&self) -> usize {
        self.index() as usize
    }
}

impl TryFrom<u8> for Inversion {
    type Error = ParseError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Inversion::from_index(index).ok_or_else(|| ParseError::UnknownInversion(index.to_string()))
    }
}

impl From<Inversion> for u8 {
    fn from(inversion: Inversion) -> u8 {
        inversion.index()
    }
}

impl fmt::Display for Inversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Inversion {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "0" | "root" => Ok(Inversion::Root),
            "1" | "1st" | "first" => Ok(Inversion::First),
            "2" | "2nd" | "second" => Ok(Inversion::Second),
            _ => Err(ParseError::UnknownInversion(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bass_slots() {
        assert_eq!(Inversion::Root.bass_slot(), 0);
        assert_eq!(Inversion::First.bass_slot(), 1);
        assert_eq!(Inversion::Second.bass_slot(), 2);
    }

    #[test]
    fn test_index_conversion() {
        for inversion in Inversion::ALL {
            assert_eq!(Inversion::try_from(inversion.index()), Ok(inversion));
        }
        assert!(Inversion::try_from(3).is_err());
    }

    #[test]
    fn test_parse() {
        assert_eq!("1st".parse::<Inversion>().unwrap(), Inversion::First);
        assert_eq!("root".parse::<Inversion>().unwrap(), Inversion::Root);
        assert!("third".parse::<Inversion>().is_err());
    }
}
