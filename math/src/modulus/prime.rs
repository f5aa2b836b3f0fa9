use crate::modulus::montgomery::MontgomeryPrecomp;

pub use crate::modulus::impl_u64::prime::find_roots;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prime<O> {
    pub q: O,
    /// distinct prime factors of q-1
    pub factors: Vec<O>,
    pub montgomery: MontgomeryPrecomp<O>,
    pub phi: O,
}

/// A primitive 2n-th root of unity psi and its square omega,
/// a primitive n-th root of unity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RootPair<O> {
    pub omega: O,
    pub psi: O,
}
