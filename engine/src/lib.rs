#![deny(rust_2018_idioms)]

//! Services of the berth allocation engine: first-fit allocation, the docking request
//! lifecycle, pricing, reservation tracking and the fleet registry.

mod allocator;
pub mod error;
mod lifecycle;
mod locks;
mod pricing;
mod registry;
mod settings;
mod startup;
mod tracker;

pub use allocator::*;
pub use error::{AllocationError, ApproveError, Error, RegistryError, Result};
pub use lifecycle::*;
pub use locks::*;
pub use pricing::*;
pub use registry::*;
pub use settings::*;
pub use startup::*;
pub use tracker::*;
