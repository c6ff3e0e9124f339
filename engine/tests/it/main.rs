#![deny(warnings)]
#![deny(rust_2018_idioms)]

pub mod concurrency;
pub mod helper;
pub mod lifecycle;
pub mod registry;
