use crate::error::{Error, Result};
use crate::modulus::montgomery::Montgomery;
use crate::modulus::prime::Prime;
use crate::modulus::{ONCE, WordOps};

/// Reverses the `bits` least significant bits of `i`.
/// Indices must lie in [0, 2^bits).
#[inline(always)]
pub fn bit_reverse(i: usize, bits: u32) -> usize {
    debug_assert!(bits <= usize::BITS, "bit width {} exceeds {}", bits, usize::BITS);
    debug_assert!(i.checked_shr(bits).unwrap_or(0) == 0, "index {} does not fit in {} bits", i, bits);
    i.reverse_bits_msb(bits)
}

/// Twiddle factors of a length-n negacyclic transform in bit-reversed order:
/// entry i holds psi^bit_reverse(i, log2(n)) mod q.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TwiddleTable<O> {
    q: O,
    psi: O,
    psi_forward_rev: Vec<O>,
}

impl TwiddleTable<u64> {
    pub fn new(prime: &Prime<u64>, psi: u64, n: usize) -> Result<TwiddleTable<u64>> {
        if !n.is_power_of_two() {
            return Err(Error::InvalidLength { n });
        }

        let log_n: u32 = n.log2() as _;

        let psi_mont: Montgomery<u64> = prime.montgomery.prepare::<ONCE>(psi);

        let mut psi_forward_rev: Vec<u64> = vec![0; n];
        psi_forward_rev[0] = 1;

        let mut powers_forward: u64 = 1u64;

        for i in 1..n {
            prime
                .montgomery
                .mul_external_assign::<ONCE>(psi_mont, &mut powers_forward);
            psi_forward_rev[bit_reverse(i, log_n)] = powers_forward;
        }

        Ok(Self {
            q: prime.q(),
            psi,
            psi_forward_rev,
        })
    }

    pub fn n(&self) -> usize {
        self.psi_forward_rev.len()
    }

    pub fn q(&self) -> u64 {
        self.q
    }

    pub fn psi(&self) -> u64 {
        self.psi
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.psi_forward_rev
    }

    pub fn iter(&self) -> std::slice::Iter<'_, u64> {
        self.psi_forward_rev.iter()
    }
}

impl<'a> IntoIterator for &'a TwiddleTable<u64> {
    type Item = &'a u64;
    type IntoIter = std::slice::Iter<'a, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
