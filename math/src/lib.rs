pub mod dft;
pub mod error;
pub mod modulus;

pub use dft::table::{TwiddleTable, bit_reverse};
pub use error::{Error, Result};
pub use modulus::prime::{Prime, RootPair, find_roots};
