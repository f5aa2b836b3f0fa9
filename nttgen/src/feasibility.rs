use crate::error::{Error, MAX_CHANNELS, Result};

/// Mapping of the requested coefficient parallelism onto memory channels
/// and transform cores.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParallelismPlan {
    pub num_channels: usize,
    pub vector_len: usize,
    pub coeff_parallelism: usize,
    pub num_cores: usize,
    pub channels_per_core: usize,
}

impl ParallelismPlan {
    /// Checks that `num_channels * vector_len` coefficients per cycle can be
    /// split into whole cores of `coeff_parallelism` coefficients each.
    pub fn analyze(num_channels: usize, vector_len: usize, coeff_parallelism: usize) -> Result<Self> {
        if !(1..=MAX_CHANNELS).contains(&num_channels) {
            return Err(Error::InvalidChannelCount { num_channels });
        }
        if vector_len == 0 {
            return Err(Error::invalid_arg("vector_len", "must be positive"));
        }
        if coeff_parallelism == 0 {
            return Err(Error::invalid_arg("coeff_parallelism", "must be positive"));
        }

        let lanes: usize = num_channels
            .checked_mul(vector_len)
            .ok_or_else(|| {
                Error::invalid_arg(
                    "vector_len",
                    format!("{num_channels} channels * {vector_len} lanes overflows"),
                )
            })?;
        if lanes % coeff_parallelism != 0 {
            return Err(Error::InfeasibleParallelism {
                num_channels,
                vector_len,
                coeff_parallelism,
            });
        }

        Ok(Self {
            num_channels,
            vector_len,
            coeff_parallelism,
            num_cores: lanes / coeff_parallelism,
            channels_per_core: coeff_parallelism / vector_len,
        })
    }
}
