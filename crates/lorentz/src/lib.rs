//! lorentz: physics vectors in any coordinate system
//!
//! 2D, 3D and 4D (Lorentz) vectors whose azimuthal, longitudinal and
//! temporal parts are each stored in one of several representations:
//! `XY`/`RhoPhi`, `Z`/`Theta`/`Eta`, `T`/`Tau`. Every formula is written
//! once against canonical components and reached from any of the 20
//! coordinate systems through a dispatch table.
//!
//! # Design principles
//! - Generic over `Scalar` type (f32, f64)
//! - Formulas are plain functions; the [`dispatch`] table picks one per
//!   `(operation, lhs system, rhs system)` and decides what to convert
//! - A resolved [`Plan`] does not care whether it runs once or once per row,
//!   which is how `lorentz-array` reuses the exact same formulas
//! - Errors are values: malformed fields, mismatched operands and
//!   undefined operations each have their own [`ErrorKind`]
//!
//! ```
//! use lorentz::Vector;
//!
//! let a = Vector::xyzt(0.0, 0.0, 0.0, 10.0);
//! let b = Vector::xyzt(0.0, 0.0, 0.0, 5.0);
//! assert_eq!(a.add(&b)?.tau()?, 15.0);
//! # Ok::<(), lorentz::VectorError>(())
//! ```

#![no_std]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("lorentz needs either the `std` or the `libm` feature for float math");

mod scalar;

pub mod compute;
pub mod config;
pub mod convert;
pub mod coords;
pub mod dispatch;
pub mod error;
mod vector;

pub use scalar::Scalar;
pub use compute::{Args, Components, Kernel};
pub use config::Tolerances;
pub use coords::{classify, AzimuthalKind, Dim, Field, Group, Layout, LongitudinalKind, Needs, System, TemporalKind};
pub use dispatch::{DispatchKey, Op, Plan, PredicateOp, ScalarOp, TransformOp};
pub use error::{ErrorKind, Result, VectorError};
pub use vector::{Azimuthal, Longitudinal, Temporal, Vector};
