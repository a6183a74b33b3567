//! Contiguous growable array with explicit capacity control.
//!
//! `Vector<T>` owns a single heap block. Appends double the capacity; `reserve`,
//! `resize` and `shrink_to_fit` change it on request. Enable the `logging` feature to
//! trace buffer allocation, relocation and release through the `log` crate.

mod logging;
mod error;
mod raw;
mod vector;
mod cmp;
mod iter;
mod traits;
mod macros;

pub use error::VectorError;
pub use vector::Vector;
pub use iter::IntoIter;
pub use traits::VectorIterator;

#[cfg(test)]
pub mod dropflag;
