use phf::{Map, phf_map};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A single nucleotide code as stored in sequences and persisted records.
///
/// The numeric codes are part of the persisted record format and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum Base {
    Undefined, // Placeholder for an unassigned position
    Adenine,   // A
    Guanine,   // G
    Uracil,    // U
    Cytosine,  // C
    Cut,       // Strand boundary between co-folded strands
}

static BASE_LETTERS: Map<char, Base> = phf_map! {
    'A' => Base::Adenine,
    'a' => Base::Adenine,
    'G' => Base::Guanine,
    'g' => Base::Guanine,
    'U' => Base::Uracil,
    'u' => Base::Uracil,
    'T' => Base::Uracil,
    't' => Base::Uracil,
    'C' => Base::Cytosine,
    'c' => Base::Cytosine,
    '&' => Base::Cut,
    '+' => Base::Cut,
    '?' => Base::Undefined,
};

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum SequenceError {
    #[error("Unknown base letter '{letter}' at position {position}")]
    UnknownLetter { letter: char, position: usize },
    #[error("Unknown base code: {0}")]
    UnknownCode(i32),
}

impl Base {
    pub const fn code(self) -> i32 {
        match self {
            Base::Undefined => 0,
            Base::Adenine => 1,
            Base::Guanine => 2,
            Base::Uracil => 3,
            Base::Cytosine => 4,
            Base::Cut => 19,
        }
    }

    pub fn from_code(code: i32) -> Result<Self, SequenceError> {
        match code {
            0 => Ok(Base::Undefined),
            1 => Ok(Base::Adenine),
            2 => Ok(Base::Guanine),
            3 => Ok(Base::Uracil),
            4 => Ok(Base::Cytosine),
            19 => Ok(Base::Cut),
            other => Err(SequenceError::UnknownCode(other)),
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        BASE_LETTERS.get(&letter).copied()
    }

    pub const fn letter(self) -> char {
        match self {
            Base::Undefined => '?',
            Base::Adenine => 'A',
            Base::Guanine => 'G',
            Base::Uracil => 'U',
            Base::Cytosine => 'C',
            Base::Cut => '&',
        }
    }
}

impl TryFrom<i32> for Base {
    type Error = SequenceError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Base::from_code(code)
    }
}

impl From<Base> for i32 {
    fn from(base: Base) -> Self {
        base.code()
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Parses sequence text (`A`, `G`, `U`/`T`, `C`, `&` or `+` for a strand cut).
/// Whitespace is skipped.
pub fn parse_sequence(text: &str) -> Result<Vec<Base>, SequenceError> {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .enumerate()
        .map(|(position, letter)| {
            Base::from_letter(letter).ok_or(SequenceError::UnknownLetter { letter, position })
        })
        .collect()
}

pub fn sequence_to_string(bases: &[Base]) -> String {
    bases.iter().map(|b| b.letter()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_the_persisted_encoding() {
        assert_eq!(Base::Adenine.code(), 1);
        assert_eq!(Base::Guanine.code(), 2);
        assert_eq!(Base::Uracil.code(), 3);
        assert_eq!(Base::Cytosine.code(), 4);
        assert_eq!(Base::Cut.code(), 19);
        assert_eq!(Base::from_code(19), Ok(Base::Cut));
    }

    #[test]
    fn from_code_rejects_unknown_codes() {
        assert_eq!(Base::from_code(7), Err(SequenceError::UnknownCode(7)));
    }

    #[test]
    fn parse_sequence_accepts_lowercase_thymine_and_cut_markers() {
        let bases = parse_sequence("gAt&C").unwrap();
        assert_eq!(
            bases,
            vec![
                Base::Guanine,
                Base::Adenine,
                Base::Uracil,
                Base::Cut,
                Base::Cytosine
            ]
        );
    }

    #[test]
    fn parse_sequence_reports_position_of_bad_letter() {
        let err = parse_sequence("AG XU").unwrap_err();
        assert_eq!(
            err,
            SequenceError::UnknownLetter {
                letter: 'X',
                position: 2
            }
        );
    }

    #[test]
    fn sequence_to_string_uses_ampersand_for_cuts() {
        let seq = parse_sequence("GGAA+UUCC").unwrap();
        assert_eq!(seq.len(), 9);
        assert_eq!(sequence_to_string(&seq), "GGAA&UUCC");
    }

    #[test]
    fn serializes_as_numeric_codes() {
        let seq = parse_sequence("AGUC&").unwrap();
        let json = serde_json::to_string(&seq).unwrap();
        assert_eq!(json, "[1,2,3,4,19]");
        let back: Vec<Base> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, seq);
    }

    #[test]
    fn deserializing_unknown_code_fails() {
        let result: Result<Vec<Base>, _> = serde_json::from_str("[1,2,42]");
        assert!(result.is_err());
    }
}
