//! Generator configuration.
//!
//! Built once per run (usually from the command line) and passed down to
//! every stage of the generator.

use crate::error::{Error, MAX_CHANNELS, Result};

/// Width in bits of one memory word.
pub const MEMORY_WORD_BITS: u32 = 512;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Transform length N (power of two).
    pub n: usize,

    /// Prime modulus q.
    /// Must be NTT-friendly: q ≡ 1 (mod 2N)
    pub modulus: u64,

    /// Coefficient bit-width.
    pub bits: u32,

    /// Spatial parallelism B (power of two).
    pub spatial_width: usize,

    /// Number of memory channels on the input side.
    pub num_channels: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            n: 1024,
            modulus: 12289,
            bits: 32,
            spatial_width: 8,
            num_channels: 4,
        }
    }
}

impl GeneratorConfig {
    /// Check if parameters are valid.
    ///
    /// Only shape is checked here; primality of the modulus is left to the
    /// root finder and divisibility to the feasibility analyzer.
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_CHANNELS).contains(&self.num_channels) {
            return Err(Error::InvalidChannelCount {
                num_channels: self.num_channels,
            });
        }

        if !self.n.is_power_of_two() {
            return Err(Error::invalid_arg("n", format!("{} is not a power of two", self.n)));
        }

        if !self.spatial_width.is_power_of_two() {
            return Err(Error::invalid_arg(
                "spatial_width",
                format!("{} is not a power of two", self.spatial_width),
            ));
        }

        if self.spatial_width > self.n {
            return Err(Error::invalid_arg(
                "spatial_width",
                format!("{} exceeds n = {}", self.spatial_width, self.n),
            ));
        }

        if self.bits == 0 || self.bits > MEMORY_WORD_BITS {
            return Err(Error::invalid_arg(
                "bits",
                format!("{} not in [1, {}]", self.bits, MEMORY_WORD_BITS),
            ));
        }

        Ok(())
    }

    /// Number of coefficients packed into one memory word.
    pub fn vector_len(&self) -> usize {
        (MEMORY_WORD_BITS / self.bits) as usize
    }

    /// Coefficients consumed per cycle by one core: two B-wide lanes.
    pub fn coeff_parallelism(&self) -> usize {
        2 * self.spatial_width
    }

    pub fn log_n(&self) -> u32 {
        self.n.ilog2()
    }

    pub fn log_b(&self) -> u32 {
        self.spatial_width.ilog2()
    }
}
