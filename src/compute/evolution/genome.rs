//! Genotype representation, phenotype decoding and genetic operators.
//!
//! A genotype is an even-length bit string; each consecutive bit pair is one
//! [`Instruction`]. Operators never edit a genotype in place, they return new
//! ones, so an elite copy can never be changed through a live robot.

use std::fmt;
use std::str::FromStr;

use rand::prelude::*;

use crate::compute::Instruction;
use crate::schema::GenomeConstraints;

/// Errors building a genotype from external input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenomeError {
    #[error("Genotype must contain at least one instruction")]
    Empty,
    #[error("Genotype length {0} is odd; instructions are 2 bits wide")]
    OddLength(usize),
    #[error("Invalid genotype character {found:?} at index {index}")]
    InvalidBit { index: usize, found: char },
}

/// Variable-length bit string, always even and at least 2 bits long.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Genotype {
    bits: Vec<bool>,
}

impl Genotype {
    /// Create from raw bits.
    pub fn from_bits(bits: Vec<bool>) -> Result<Self, GenomeError> {
        if bits.is_empty() {
            return Err(GenomeError::Empty);
        }
        if bits.len() % 2 != 0 {
            return Err(GenomeError::OddLength(bits.len()));
        }
        Ok(Self { bits })
    }

    /// Encode an instruction sequence.
    pub fn from_instructions(instructions: &[Instruction]) -> Result<Self, GenomeError> {
        let bits = instructions
            .iter()
            .flat_map(|i| {
                let (high, low) = i.to_pair();
                [high, low]
            })
            .collect();
        Self::from_bits(bits)
    }

    /// Length in bits.
    #[inline]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    #[inline]
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Number of instructions encoded.
    #[inline]
    pub fn instruction_count(&self) -> usize {
        self.bits.len() / 2
    }

    /// Decode into a phenotype.
    pub fn decode(&self) -> Phenotype {
        debug_assert!(self.bits.len() % 2 == 0, "odd-length genotype");
        Phenotype(
            self.bits
                .chunks_exact(2)
                .map(|pair| Instruction::from_pair(pair[0], pair[1]))
                .collect(),
        )
    }

    /// Copy with the bit at `index` inverted.
    pub fn with_flipped(&self, index: usize) -> Self {
        let mut bits = self.bits.clone();
        bits[index] = !bits[index];
        Self { bits }
    }

    /// Single-point crossover at `cut`.
    ///
    /// Returns `(a[..cut] ++ b[cut..], b[..cut] ++ a[cut..])`. `cut` must lie
    /// in `1..min(a.len(), b.len())`, so both children keep material from both
    /// parents and stay even-length.
    pub fn crossover_at(a: &Genotype, b: &Genotype, cut: usize) -> (Genotype, Genotype) {
        debug_assert!(cut >= 1 && cut < a.len().min(b.len()), "cut {cut} out of range");

        let splice = |head: &[bool], tail: &[bool]| {
            let mut bits = Vec::with_capacity(tail.len());
            bits.extend_from_slice(&head[..cut]);
            bits.extend_from_slice(&tail[cut..]);
            Genotype { bits }
        };

        (splice(&a.bits, &b.bits), splice(&b.bits, &a.bits))
    }

    /// Number of bit positions that differ, plus the length difference.
    pub fn distance(&self, other: &Genotype) -> usize {
        let differing = self
            .bits
            .iter()
            .zip(&other.bits)
            .filter(|(a, b)| a != b)
            .count();
        differing + self.len().abs_diff(other.len())
    }
}

impl fmt::Display for Genotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for Genotype {
    type Err = GenomeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bits = s
            .chars()
            .enumerate()
            .map(|(index, c)| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                found => Err(GenomeError::InvalidBit { index, found }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_bits(bits)
    }
}

/// Decoded instruction sequence. A read-only projection of a [`Genotype`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Phenotype(Vec<Instruction>);

impl Phenotype {
    #[inline]
    pub fn instructions(&self) -> &[Instruction] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Phenotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for instruction in &self.0 {
            write!(f, "{}", instruction.symbol())?;
        }
        Ok(())
    }
}

/// Random number generator wrapper for genome operations.
///
/// One instance drives a whole run; drawing from it sequentially keeps a
/// seeded run reproducible.
pub struct GenomeRng {
    rng: StdRng,
}

impl GenomeRng {
    /// Create from seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generate a random genotype whose phenotype length lies in
    /// `constraints.phenotype_length_bounds` (half-open, validated non-empty).
    pub fn random_genotype(&mut self, constraints: &GenomeConstraints) -> Genotype {
        let (min, max) = constraints.phenotype_length_bounds;
        let length = self.rng.gen_range(min..max);

        let mut bits = Vec::with_capacity(length * 2);
        for _ in 0..length {
            let (high, low) = Instruction::decode(self.rng.gen_range(0..4u8)).to_pair();
            bits.push(high);
            bits.push(low);
        }
        Genotype { bits }
    }

    /// Flip one bit chosen uniformly from `[0, len - 1)`.
    pub fn mutate(&mut self, genotype: &Genotype) -> Genotype {
        let index = self.rng.gen_range(0..genotype.len() - 1);
        genotype.with_flipped(index)
    }

    /// Single-point crossover with a cut drawn uniformly from `[1, L - 1]`,
    /// `L` being the shorter parent's length.
    ///
    /// Returns `None` when `L < 3`, where no interior cut exists; callers fall
    /// back to mutation.
    pub fn crossover(&mut self, a: &Genotype, b: &Genotype) -> Option<(Genotype, Genotype)> {
        let shorter = a.len().min(b.len());
        if shorter < 3 {
            return None;
        }
        let cut = self.rng.gen_range(1..shorter);
        Some(Genotype::crossover_at(a, b, cut))
    }

    /// Bernoulli trial with probability `p`.
    #[inline]
    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Fisher-Yates shuffle.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}
