mod assignment;
mod berth;
mod docking_request;
mod multiplier;
mod ship;
