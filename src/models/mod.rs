//! Vehicle models.
//!
//! # Core Concepts
//!
//! ## Vehicles
//!
//! - [`Vehicle`]: A fleet member, one of the five variants below. Carries a
//!   shared [`VehicleBase`] (id, model, max speed, odometer).
//! - [`Car`], [`Truck`], [`Bus`]: Land vehicles. Journey estimates add 10% for traffic.
//! - [`Airplane`]: Air vehicle. Journey estimates save 5% for direct paths.
//! - [`CargoShip`]: Water vehicle, motor or sail. Sail ships move without fuel.
//!
//! ## Capabilities
//!
//! Each variant implements a fixed subset of these contracts, listed by
//! [`VehicleKind::capabilities`]:
//!
//! - [`FuelConsumable`]: refuel and burn fuel by distance.
//! - [`PassengerCarrier`]: board and disembark up to a fixed seat count.
//! - [`CargoCarrier`]: load and unload up to a fixed weight.
//! - [`Maintainable`]: scheduled flag plus a mileage threshold.
//!
//! | Variant | Fuel | Passengers | Cargo | Efficiency |
//! |---|---|---|---|---|
//! | Car | yes | 5 | - | 15.0 |
//! | Truck | yes | - | 5000 | 8.0, 7.2 when over half loaded |
//! | Bus | yes | 50 | 500 | 10.0 |
//! | Airplane | yes | 200 | 10000 | 5.0 |
//! | CargoShip | motor only | - | 50000 | 4.0, 0.0 under sail |

mod airplane;
mod bus;
mod capability;
mod car;
mod cargo_ship;
mod truck;
mod vehicle;

pub use airplane::*;
pub use bus::*;
pub use capability::*;
pub use car::*;
pub use cargo_ship::*;
pub use truck::*;
pub use vehicle::*;
