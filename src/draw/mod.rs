//! Winner selection and its randomness sources.

mod engine;
mod random;

pub use engine::{Draw, EmptyPoolError, draw};
pub use random::{RandomSource, SeededRandom, ThreadRandom, UnitInterval};
