use crate::modulus::ReduceOnce;
use crate::modulus::montgomery::{Montgomery, MontgomeryPrecomp};
use crate::modulus::{NONE, ONCE, REDUCEMOD};

/// MontgomeryPrecomp is a set of methods implemented for MontgomeryPrecomp<u64>
/// enabling Montgomery arithmetic over u64 values.
impl MontgomeryPrecomp<u64> {
    /// Returns an new instance of MontgomeryPrecomp<u64>.
    /// This method will fail if gcd(q, 2^64) != 1.
    #[inline(always)]
    pub fn new(q: u64) -> MontgomeryPrecomp<u64> {
        assert!(q & 1 != 0, "Invalid argument: gcd(q={}, radix=2^64) != 1", q);
        let mut q_inv: u64 = 1;
        let mut q_pow = q;
        for _i in 0..63 {
            q_inv = q_inv.wrapping_mul(q_pow);
            q_pow = q_pow.wrapping_mul(q_pow);
        }
        let mut precomp = Self {
            q,
            q_inv,
            one: 0,
        };

        precomp.one = precomp.prepare::<ONCE>(1);

        precomp
    }

    /// Returns 2^64 mod q as a Montgomery<u64>.
    #[inline(always)]
    pub fn one(&self) -> Montgomery<u64> {
        self.one
    }

    /// Applies a modular reduction on x based on REDUCE:
    /// - NONE: no modular reduction.
    /// - ONCE: subtracts q if x >= q.
    #[inline(always)]
    pub fn reduce_assign<const REDUCE: REDUCEMOD>(&self, x: &mut u64) {
        match REDUCE {
            NONE => {}
            ONCE => x.reduce_once_assign(self.q),
            _ => unreachable!("invalid REDUCE argument"),
        }
    }

    /// Returns lhs * 2^64 mod q as a Montgomery<u64>.
    #[inline(always)]
    pub fn prepare<const REDUCE: REDUCEMOD>(&self, lhs: u64) -> Montgomery<u64> {
        let mut rhs: u64 = ((lhs as u128) << 64).rem_euclid(self.q as u128) as u64;
        self.reduce_assign::<REDUCE>(&mut rhs);
        rhs
    }

    /// Returns lhs * (2^64)^-1 mod q as a u64.
    #[inline(always)]
    pub fn unprepare<const REDUCE: REDUCEMOD>(&self, lhs: Montgomery<u64>) -> u64 {
        self.mul_external::<REDUCE>(lhs, 1)
    }

    /// Returns lhs * rhs * (2^{64})^-1 mod q.
    #[inline(always)]
    pub fn mul_external<const REDUCE: REDUCEMOD>(&self, lhs: Montgomery<u64>, rhs: u64) -> u64 {
        let mut r: u64 = rhs;
        self.mul_external_assign::<REDUCE>(lhs, &mut r);
        r
    }

    /// Assigns lhs * rhs * (2^{64})^-1 mod q to rhs.
    #[inline(always)]
    pub fn mul_external_assign<const REDUCE: REDUCEMOD>(&self, lhs: Montgomery<u64>, rhs: &mut u64) {
        let m: u128 = lhs as u128 * *rhs as u128;
        let (mlo, mhi) = (m as u64, (m >> 64) as u64);
        let hhi: u64 = ((self.q as u128 * mlo.wrapping_mul(self.q_inv) as u128) >> 64) as u64;
        *rhs = mhi.wrapping_sub(hhi).wrapping_add(self.q);
        self.reduce_assign::<REDUCE>(rhs);
    }

    /// Assigns lhs * rhs * (2^{64})^-1 mod q to rhs.
    #[inline(always)]
    pub fn mul_internal_assign<const REDUCE: REDUCEMOD>(
        &self,
        lhs: Montgomery<u64>,
        rhs: &mut Montgomery<u64>,
    ) {
        self.mul_external_assign::<REDUCE>(lhs, rhs);
    }

    /// Returns (x^exponent) * 2^64 mod q.
    #[inline(always)]
    pub fn pow(&self, x: Montgomery<u64>, exponent: u64) -> Montgomery<u64> {
        let mut y: Montgomery<u64> = self.one();
        let mut x_mut: Montgomery<u64> = x;
        let mut i: u64 = exponent;
        while i > 0 {
            if i & 1 == 1 {
                self.mul_internal_assign::<ONCE>(x_mut, &mut y);
            }
            let x_sq: Montgomery<u64> = x_mut;
            self.mul_internal_assign::<ONCE>(x_sq, &mut x_mut);
            i >>= 1;
        }
        y.reduce_once_assign(self.q);
        y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mul_external() {
        let q: u64 = 0x1fffffffffe00001;
        let m_precomp = MontgomeryPrecomp::new(q);
        let x: u64 = 0x5f876e514845cc8b % q;
        let y: u64 = 0xad726f98f24a761a % q;
        let y_mont = m_precomp.prepare::<ONCE>(y);
        assert_eq!(
            m_precomp.mul_external::<ONCE>(y_mont, x),
            (x as u128 * y as u128 % q as u128) as u64
        );
    }

    #[test]
    fn test_prepare_unprepare() {
        let q: u64 = 12289;
        let m_precomp = MontgomeryPrecomp::new(q);
        for x in [0u64, 1, 2, 6144, 12288] {
            let x_mont = m_precomp.prepare::<ONCE>(x);
            assert_eq!(m_precomp.unprepare::<ONCE>(x_mont), x);
        }
        assert_eq!(m_precomp.unprepare::<ONCE>(m_precomp.one()), 1);
    }

    #[test]
    fn test_pow() {
        let q: u64 = 12289;
        let m_precomp = MontgomeryPrecomp::new(q);
        let x_mont = m_precomp.prepare::<ONCE>(11);
        let mut expected: u64 = 1;
        for e in 0..64u64 {
            assert_eq!(m_precomp.unprepare::<ONCE>(m_precomp.pow(x_mont, e)), expected, "11^{}", e);
            expected = expected * 11 % q;
        }
    }
}
