//! Two-bit instruction codec.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single robot instruction.
///
/// Every 2-bit value maps to exactly one instruction:
///
/// | bits | instruction |
/// |------|-------------|
/// | `00` | Forward     |
/// | `01` | TurnRight   |
/// | `10` | TurnLeft    |
/// | `11` | Stop        |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Instruction {
    Forward = 0b00,
    TurnRight = 0b01,
    TurnLeft = 0b10,
    Stop = 0b11,
}

impl Instruction {
    pub const ALL: [Instruction; 4] = [
        Instruction::Forward,
        Instruction::TurnRight,
        Instruction::TurnLeft,
        Instruction::Stop,
    ];

    /// Decode the low two bits of `bits`. Higher bits are ignored.
    #[inline]
    pub fn decode(bits: u8) -> Self {
        Self::ALL[(bits & 0b11) as usize]
    }

    /// Decode a `(high, low)` bit pair.
    #[inline]
    pub fn from_pair(high: bool, low: bool) -> Self {
        Self::decode(((high as u8) << 1) | low as u8)
    }

    /// Encode as a 2-bit value.
    #[inline]
    pub fn encode(self) -> u8 {
        self as u8
    }

    /// Encode as a `(high, low)` bit pair.
    #[inline]
    pub fn to_pair(self) -> (bool, bool) {
        let bits = self.encode();
        (bits & 0b10 != 0, bits & 0b01 != 0)
    }

    /// Single-letter symbol used in phenotype strings.
    pub fn symbol(self) -> char {
        match self {
            Instruction::Forward => 'F',
            Instruction::TurnRight => 'R',
            Instruction::TurnLeft => 'L',
            Instruction::Stop => 'S',
        }
    }

    /// Parse a phenotype symbol.
    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            'F' => Some(Instruction::Forward),
            'R' => Some(Instruction::TurnRight),
            'L' => Some(Instruction::TurnLeft),
            'S' => Some(Instruction::Stop),
            _ => None,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codec_mapping() {
        assert_eq!(Instruction::decode(0b00), Instruction::Forward);
        assert_eq!(Instruction::decode(0b01), Instruction::TurnRight);
        assert_eq!(Instruction::decode(0b10), Instruction::TurnLeft);
        assert_eq!(Instruction::decode(0b11), Instruction::Stop);
    }

    #[test]
    fn test_codec_round_trip() {
        for bits in 0..4u8 {
            assert_eq!(Instruction::decode(bits).encode(), bits);
        }
        for instruction in Instruction::ALL {
            assert_eq!(Instruction::decode(instruction.encode()), instruction);
            let (high, low) = instruction.to_pair();
            assert_eq!(Instruction::from_pair(high, low), instruction);
            assert_eq!(Instruction::from_symbol(instruction.symbol()), Some(instruction));
        }
    }

    #[test]
    fn test_unknown_symbol() {
        assert_eq!(Instruction::from_symbol('X'), None);
    }
}
