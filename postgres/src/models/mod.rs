mod assignment;
mod berth;
mod request;
mod ship;

pub use assignment::*;
pub use berth::*;
pub use request::*;
pub use ship::*;

use crate::error::{Error, error::UnknownValueSnafu};
use std::str::FromStr;

fn parse_enum<T: FromStr>(entity: &'static str, value: String) -> Result<T, Error> {
    match value.parse() {
        Ok(v) => Ok(v),
        Err(_) => UnknownValueSnafu { entity, value }.fail(),
    }
}
