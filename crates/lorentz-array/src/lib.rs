//! Columnar arrays of physics vectors.
//!
//! A [`VectorArray`] stores one [`Column`] per coordinate and evaluates the
//! exact dispatch plans and formulas of [`lorentz::Vector`] row by row. With
//! the `parallel` feature the rows are distributed over a rayon pool.
//!
//! ```
//! use lorentz::Vector;
//! use lorentz_array::VectorArray;
//!
//! let jets = VectorArray::repeat(&Vector::ptetaphim(25.0, 0.4, 1.2, 4.0), 3);
//! let mass = jets.tau()?;
//! assert_eq!(mass.data(), &[4.0, 4.0, 4.0]);
//! # Ok::<(), lorentz_array::ArrayError>(())
//! ```

#![no_std]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

mod array;
mod column;
mod error;

pub use array::{VectorArray, VectorArrayParts};
pub use column::Column;
pub use error::{ArrayError, Result};
