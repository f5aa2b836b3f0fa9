use std::fmt;

use math::TwiddleTable;
use math::modulus::prime::{Prime, RootPair};

use crate::error::{Error, Result};

/// Storage type of one coefficient in the generated kernel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoeffType {
    /// Native 32-bit `int`.
    Int,
    /// Arbitrary precision `ap_uint<bits>`.
    ApUint(u32),
}

impl CoeffType {
    pub fn from_bits(bits: u32) -> Self {
        match bits {
            32 => CoeffType::Int,
            _ => CoeffType::ApUint(bits),
        }
    }
}

impl fmt::Display for CoeffType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoeffType::Int => "int".fmt(f),
            CoeffType::ApUint(bits) => write!(f, "ap_uint<{bits}>"),
        }
    }
}

/// Length, modulus and coefficient width of the transform.
///
/// The modulus is prime and q ≡ 1 (mod 2n), so a primitive 2n-th root of
/// unity exists.
#[derive(Clone, Debug)]
pub struct TransformParameters {
    n: usize,
    prime: Prime<u64>,
    bit_width: u32,
}

impl TransformParameters {
    pub fn new(n: usize, modulus: u64, bit_width: u32) -> Result<Self> {
        if !n.is_power_of_two() {
            return Err(Error::invalid_arg("n", format!("{} is not a power of two", n)));
        }

        let prime: Prime<u64> = Prime::new(modulus)?;
        let nth_root: Option<u64> = (n as u64).checked_mul(2);
        if !nth_root.is_some_and(|nth_root| prime.supports_nth_root(nth_root)) {
            return Err(math::Error::InfeasibleModulus {
                q: modulus,
                n: n as u64,
            }
            .into());
        }

        Ok(Self {
            n,
            prime,
            bit_width,
        })
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn log_n(&self) -> u32 {
        self.n.ilog2()
    }

    pub fn modulus(&self) -> u64 {
        self.prime.q()
    }

    pub fn bit_width(&self) -> u32 {
        self.bit_width
    }

    pub fn coeff_type(&self) -> CoeffType {
        CoeffType::from_bits(self.bit_width)
    }

    pub fn roots(&self) -> Result<RootPair<u64>> {
        Ok(self.prime.roots(self.n as u64)?)
    }

    pub fn twiddle_table(&self, roots: &RootPair<u64>) -> Result<TwiddleTable<u64>> {
        Ok(TwiddleTable::new(&self.prime, roots.psi, self.n)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coeff_type_from_bits() {
        assert_eq!(CoeffType::from_bits(32).to_string(), "int");
        assert_eq!(CoeffType::from_bits(64).to_string(), "ap_uint<64>");
        assert_eq!(CoeffType::from_bits(14).to_string(), "ap_uint<14>");
    }

    #[test]
    fn default_transform() {
        let params = TransformParameters::new(1024, 12289, 32).unwrap();
        assert_eq!(params.log_n(), 10);
        assert_eq!(params.modulus(), 12289);
        assert_eq!(params.coeff_type(), CoeffType::Int);

        let roots = params.roots().unwrap();
        let table = params.twiddle_table(&roots).unwrap();
        assert_eq!(table.n(), 1024);
        assert_eq!(table.as_slice()[0], 1);
    }

    #[test]
    fn rejects_unfriendly_modulus() {
        assert!(matches!(
            TransformParameters::new(4096, 12289, 32),
            Err(Error::Math(math::Error::InfeasibleModulus { q: 12289, n: 4096 }))
        ));
        assert!(matches!(
            TransformParameters::new(1024, 12291, 32),
            Err(Error::Math(math::Error::NotPrime { q: 12291 }))
        ));
    }
}
