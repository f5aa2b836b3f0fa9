use std::fmt;

/// Errors raised by the modular arithmetic engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// The modulus is not a prime greater than 2.
    NotPrime { q: u64 },
    /// The modulus does not leave enough headroom for Montgomery arithmetic.
    ModulusTooLarge { q: u64 },
    /// No primitive 2n-th root of unity exists: n is not a power of two or q != 1 mod 2n.
    InfeasibleModulus { q: u64, n: u64 },
    /// The candidate psi does not have exact order 2n.
    NonPrimitiveRoot { q: u64, n: u64, psi: u64 },
    /// The transform length is not a power of two.
    InvalidLength { n: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotPrime { q } => write!(f, "invalid modulus: q = {} is not a prime > 2", q),
            Error::ModulusTooLarge { q } => {
                write!(f, "invalid modulus: q = {} exceeds 61 bits", q)
            }
            Error::InfeasibleModulus { q, n } => write!(
                f,
                "infeasible modulus: no primitive 2n-th root of unity for n = {} mod q = {} (requires n a power of two and q = 1 mod 2n)",
                n, q
            ),
            Error::NonPrimitiveRoot { q, n, psi } => write!(
                f,
                "non-primitive root: psi = {} does not satisfy psi^{} = -1 mod q = {}",
                psi, n, q
            ),
            Error::InvalidLength { n } => {
                write!(f, "invalid transform length: n = {} is not a power of two", n)
            }
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
