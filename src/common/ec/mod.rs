mod block;
mod encoder;
mod galois;

pub use block::ecc_and_interleave;
