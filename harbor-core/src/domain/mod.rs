mod assignment;
mod berth;
mod ids;
mod pricing;
mod request;
mod ship;
mod user;
mod window;

pub use assignment::*;
pub use berth::*;
pub use ids::*;
pub use pricing::*;
pub use request::*;
pub use ship::*;
pub use user::*;
pub use window::*;
