//! A fleet of land, air and water vehicles sharing capability contracts
//! (fuel, passengers, cargo, maintenance), plus a manager that runs batch
//! operations over the fleet, reports on it, and saves it to disk.

pub mod config;
pub mod error;
pub mod fleet;
pub mod models;
pub mod render;
pub mod storage;

pub use error::FleetError;
pub use fleet::FleetManager;
