use std::path::PathBuf;
use std::{fmt, io};

/// Highest number of memory channels a device exposes.
pub const MAX_CHANNELS: usize = 16;

/// Errors raised while deriving or emitting accelerator parameters.
#[derive(Debug)]
pub enum Error {
    /// Channel count outside [1, MAX_CHANNELS].
    InvalidChannelCount { num_channels: usize },
    /// Argument passed into the generator is invalid.
    InvalidArgument {
        /// The invalid arg
        arg: &'static str,
        /// Explaining why arg is invalid.
        reason: String,
    },
    /// Coefficient parallelism cannot be spread evenly over channels and vector lanes.
    InfeasibleParallelism {
        num_channels: usize,
        vector_len: usize,
        coeff_parallelism: usize,
    },
    /// Spatial parallelism covers the whole transform; no temporal stage remains.
    NoTemporalStages { log_n: u32, log_b: u32 },
    /// A placeholder the renderer fills is missing from the template.
    MalformedTemplate {
        template: String,
        placeholder: String,
    },
    /// Root finding or twiddle generation failed.
    Math(math::Error),
    /// Reading a template or writing an artifact failed.
    Io { path: PathBuf, source: io::Error },
}

impl Error {
    /// Number of cores the rejected configuration would have needed,
    /// as a real number, for infeasible parallelism.
    pub fn intended_cores(&self) -> Option<f64> {
        match self {
            Error::InfeasibleParallelism {
                num_channels,
                vector_len,
                coeff_parallelism,
            } => Some(*num_channels as f64 * *vector_len as f64 / *coeff_parallelism as f64),
            _ => None,
        }
    }

    pub(crate) fn invalid_arg(arg: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidArgument {
            arg,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidChannelCount { num_channels } => write!(
                f,
                "invalid channel count: {} not in [1, {}]",
                num_channels, MAX_CHANNELS
            ),
            Error::InvalidArgument { arg, reason } => {
                write!(f, "invalid argument `{arg}`: {reason}")
            }
            Error::InfeasibleParallelism {
                num_channels,
                vector_len,
                coeff_parallelism,
            } => write!(
                f,
                "infeasible parallelism: {} channels * {} lanes = {} is not divisible by {} coefficients per core (would need {:.3} cores)",
                num_channels,
                vector_len,
                *num_channels as u128 * *vector_len as u128,
                coeff_parallelism,
                self.intended_cores().unwrap_or_default()
            ),
            Error::NoTemporalStages { log_n, log_b } => write!(
                f,
                "no temporal stages: log2(N) = {} <= log2(B) + 1 = {}",
                log_n,
                log_b + 1
            ),
            Error::MalformedTemplate {
                template,
                placeholder,
            } => write!(
                f,
                "malformed template `{template}`: placeholder {{{placeholder}}} not found"
            ),
            Error::Math(err) => err.fmt(f),
            Error::Io { path, source } => write!(f, "{}: {}", path.display(), source),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Math(err) => Some(err),
            Error::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<math::Error> for Error {
    fn from(err: math::Error) -> Self {
        Error::Math(err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
