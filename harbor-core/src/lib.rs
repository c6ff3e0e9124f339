#![deny(rust_2018_idioms)]

//! Domain model, ports and pure decision logic of the berth allocation engine.
//!
//! Everything that touches storage goes through the port traits, the rest of this crate is
//! side-effect free.

mod domain;
mod environment;
pub mod error;
mod ports;
#[cfg(any(test, feature = "test"))]
mod test_helper;

pub use domain::*;
pub use environment::*;
pub use error::{AssignmentError, Error, LifecycleError, Result, ValidationError};
pub use ports::*;
#[cfg(any(test, feature = "test"))]
pub use test_helper::*;
