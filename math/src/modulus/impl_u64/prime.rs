use crate::error::{Error, Result};
use crate::modulus::ONCE;
use crate::modulus::montgomery::{Montgomery, MontgomeryPrecomp};
use crate::modulus::prime::{Prime, RootPair};
use primality_test::is_prime;
use prime_factorization::Factorization;

impl Prime<u64> {
    /// Returns a new instance of Prime<u64>.
    /// Fails if q is not a prime > 2 or if q does not fit in 61 bits.
    pub fn new(q: u64) -> Result<Self> {
        if q <= 2 || !is_prime(q) {
            return Err(Error::NotPrime { q });
        }
        if q > 1 << 61 {
            return Err(Error::ModulusTooLarge { q });
        }

        let factors: Vec<u64> = Factorization::run(q - 1)
            .prime_factor_repr()
            .iter()
            .map(|factor| factor.0)
            .collect();

        Ok(Self {
            q,
            factors,
            montgomery: MontgomeryPrecomp::new(q),
            phi: q - 1,
        })
    }

    pub fn q(&self) -> u64 {
        self.q
    }

    /// Returns x^exponent mod q.
    #[inline(always)]
    pub fn pow(&self, x: u64, exponent: u64) -> u64 {
        let x_mont: Montgomery<u64> = self.montgomery.prepare::<ONCE>(x);
        self.montgomery
            .unprepare::<ONCE>(self.montgomery.pow(x_mont, exponent))
    }

    /// Returns the smallest generator of the multiplicative group mod q.
    pub fn primitive_root(&self) -> u64 {
        // A generator always exists below q, so the search terminates.
        (2..self.q)
            .find(|&candidate| {
                self.factors
                    .iter()
                    .all(|&factor| self.pow(candidate, self.phi / factor) != 1)
            })
            .unwrap_or(self.q - 1)
    }

    /// Returns true if q = 1 mod nth_root, i.e. the group mod q
    /// contains an element of order nth_root.
    pub fn supports_nth_root(&self, nth_root: u64) -> bool {
        nth_root != 0 && self.phi % nth_root == 0
    }

    /// Returns a primitive nth_root-th root of unity, nth_root a power of two.
    pub fn primitive_nth_root(&self, nth_root: u64) -> Result<u64> {
        let n: u64 = nth_root >> 1;
        if !nth_root.is_power_of_two() || n == 0 || !self.supports_nth_root(nth_root) {
            return Err(Error::InfeasibleModulus { q: self.q, n });
        }

        let g: u64 = self.primitive_root();
        let psi: u64 = self.pow(g, self.phi / nth_root);

        if self.pow(psi, n) != self.q - 1 {
            return Err(Error::NonPrimitiveRoot { q: self.q, n, psi });
        }

        Ok(psi)
    }

    /// Returns the root pair (omega, psi) for a negacyclic transform of length n:
    /// psi of order 2n and omega = psi^2 of order n.
    pub fn roots(&self, n: u64) -> Result<RootPair<u64>> {
        if !n.is_power_of_two() {
            return Err(Error::InfeasibleModulus { q: self.q, n });
        }
        let nth_root: u64 = n
            .checked_mul(2)
            .ok_or(Error::InfeasibleModulus { q: self.q, n })?;
        let psi: u64 = self.primitive_nth_root(nth_root)?;
        let omega: u64 = self.pow(psi, 2);
        Ok(RootPair { omega, psi })
    }
}

/// Returns the root pair for a transform of length n modulo q.
pub fn find_roots(n: u64, q: u64) -> Result<RootPair<u64>> {
    Prime::<u64>::new(q)?.roots(n)
}
