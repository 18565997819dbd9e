//! One persisted line per vehicle. The column layout depends on the variant:
//!
//! ```text
//! Car,id,model,maxSpeed,numWheels,fuelLevel,passengerCapacity,currentPassengers,currentMileage
//! Truck,id,model,maxSpeed,numWheels,fuelLevel,cargoCapacity,currentCargo,currentMileage
//! Bus,id,model,maxSpeed,numWheels,fuelLevel,passengerCapacity,currentPassengers,cargoCapacity,currentCargo,currentMileage
//! Airplane,id,model,maxSpeed,fuelLevel,maxAltitude,passengerCapacity,currentPassengers,cargoCapacity,currentCargo,currentMileage
//! CargoShip,id,model,maxSpeed,fuelLevel,hasSail,cargoCapacity,currentCargo,currentMileage
//! ```
//!
//! Capacity columns are written for reference but never read back: the
//! constructors own those constants.
//!
//! Text columns (id, model) are taken verbatim. Surrounding whitespace is
//! ignored in the type tag and in numeric and flag columns.

use csv::StringRecord;
use thiserror::Error;

use crate::error::FleetError;
use crate::models::{
    Airplane, Bus, Car, CargoCarrier, CargoShip, FuelConsumable, PassengerCarrier, Truck, Vehicle,
    VehicleKind,
};

/// Why a persisted line could not be turned back into a vehicle.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("empty record")]
    Empty,

    #[error("unreadable line: {0}")]
    Unreadable(String),

    #[error("unknown vehicle type '{0}'")]
    UnknownType(String),

    #[error("missing field '{name}' (column {index})")]
    MissingField { index: usize, name: &'static str },

    #[error("invalid number for '{name}': '{value}'")]
    InvalidNumber { name: &'static str, value: String },

    #[error("invalid flag for '{name}': '{value}'")]
    InvalidFlag { name: &'static str, value: String },

    #[error("duplicate vehicle ID '{0}'")]
    DuplicateId(String),

    #[error("vehicle rejected: {0}")]
    Rejected(#[from] FleetError),
}

// ============================================================
// Encoding
// ============================================================

/// Floats keep a decimal point (`120.0`), matching the saved-fleet layout.
fn num(value: f64) -> String {
    format!("{:?}", value)
}

pub fn encode(vehicle: &Vehicle) -> Vec<String> {
    let base = vehicle.base();
    let mut fields = vec![
        vehicle.kind().as_str().to_string(),
        base.id().to_string(),
        base.model().to_string(),
        num(base.max_speed()),
    ];

    match vehicle {
        Vehicle::Car(c) => fields.extend([
            c.num_wheels().to_string(),
            num(c.fuel_level()),
            c.passenger_capacity().to_string(),
            c.current_passengers().to_string(),
        ]),
        Vehicle::Truck(t) => fields.extend([
            t.num_wheels().to_string(),
            num(t.fuel_level()),
            num(t.cargo_capacity()),
            num(t.current_cargo()),
        ]),
        Vehicle::Bus(b) => fields.extend([
            b.num_wheels().to_string(),
            num(b.fuel_level()),
            b.passenger_capacity().to_string(),
            b.current_passengers().to_string(),
            num(b.cargo_capacity()),
            num(b.current_cargo()),
        ]),
        Vehicle::Airplane(a) => fields.extend([
            num(a.fuel_level()),
            num(a.max_altitude()),
            a.passenger_capacity().to_string(),
            a.current_passengers().to_string(),
            num(a.cargo_capacity()),
            num(a.current_cargo()),
        ]),
        Vehicle::CargoShip(s) => fields.extend([
            num(s.fuel_level()),
            s.has_sail().to_string(),
            num(s.cargo_capacity()),
            num(s.current_cargo()),
        ]),
    }

    fields.push(num(base.current_mileage()));
    fields
}

// ============================================================
// Decoding
// ============================================================

struct Fields<'a>(&'a StringRecord);

impl Fields<'_> {
    fn text(&self, index: usize, name: &'static str) -> Result<&str, RecordError> {
        self.0
            .get(index)
            .ok_or(RecordError::MissingField { index, name })
    }

    fn number(&self, index: usize, name: &'static str) -> Result<f64, RecordError> {
        let raw = self.text(index, name)?.trim();
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| RecordError::InvalidNumber {
                name,
                value: raw.to_string(),
            })
    }

    fn count(&self, index: usize, name: &'static str) -> Result<u32, RecordError> {
        let raw = self.text(index, name)?.trim();
        raw.parse::<u32>().map_err(|_| RecordError::InvalidNumber {
            name,
            value: raw.to_string(),
        })
    }

    fn flag(&self, index: usize, name: &'static str) -> Result<bool, RecordError> {
        let raw = self.text(index, name)?.trim();
        if raw.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if raw.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(RecordError::InvalidFlag {
                name,
                value: raw.to_string(),
            })
        }
    }
}

/// Rebuild a vehicle from one record.
///
/// The vehicle is constructed from its identity columns, then fuel,
/// passengers and cargo are replayed through the capability operations when
/// positive. Mileage is restored directly since loading is not a journey.
pub fn decode(record: &StringRecord) -> Result<Vehicle, RecordError> {
    let f = Fields(record);
    let tag = record.get(0).ok_or(RecordError::Empty)?.trim();
    let kind =
        VehicleKind::from_str(tag).ok_or_else(|| RecordError::UnknownType(tag.to_string()))?;

    let id = f.text(1, "id")?;
    let model = f.text(2, "model")?;
    let max_speed = f.number(3, "maxSpeed")?;

    let (mut vehicle, mileage): (Vehicle, f64) = match kind {
        VehicleKind::Car => {
            let mut car = Car::new(id, model, max_speed, f.count(4, "numWheels")?)?;
            replay_fuel(&mut car, f.number(5, "fuelLevel")?)?;
            car.board_passengers(f.count(7, "currentPassengers")?)?;
            (car.into(), f.number(8, "currentMileage")?)
        }
        VehicleKind::Truck => {
            let mut truck = Truck::new(id, model, max_speed, f.count(4, "numWheels")?)?;
            replay_fuel(&mut truck, f.number(5, "fuelLevel")?)?;
            replay_cargo(&mut truck, f.number(7, "currentCargo")?)?;
            (truck.into(), f.number(8, "currentMileage")?)
        }
        VehicleKind::Bus => {
            let mut bus = Bus::new(id, model, max_speed, f.count(4, "numWheels")?)?;
            replay_fuel(&mut bus, f.number(5, "fuelLevel")?)?;
            bus.board_passengers(f.count(7, "currentPassengers")?)?;
            replay_cargo(&mut bus, f.number(9, "currentCargo")?)?;
            (bus.into(), f.number(10, "currentMileage")?)
        }
        VehicleKind::Airplane => {
            let fuel = f.number(4, "fuelLevel")?;
            let mut plane = Airplane::new(id, model, max_speed, f.number(5, "maxAltitude")?)?;
            replay_fuel(&mut plane, fuel)?;
            plane.board_passengers(f.count(7, "currentPassengers")?)?;
            replay_cargo(&mut plane, f.number(9, "currentCargo")?)?;
            (plane.into(), f.number(10, "currentMileage")?)
        }
        VehicleKind::CargoShip => {
            let fuel = f.number(4, "fuelLevel")?;
            let has_sail = f.flag(5, "hasSail")?;
            let mut ship = CargoShip::new(id, model, max_speed, has_sail)?;
            if !has_sail {
                replay_fuel(&mut ship, fuel)?;
            }
            replay_cargo(&mut ship, f.number(7, "currentCargo")?)?;
            (ship.into(), f.number(8, "currentMileage")?)
        }
    };

    vehicle.base_mut().restore_mileage(mileage)?;
    Ok(vehicle)
}

fn replay_fuel(vehicle: &mut impl FuelConsumable, level: f64) -> Result<(), FleetError> {
    if level > 0.0 {
        vehicle.refuel(level)?;
    }
    Ok(())
}

fn replay_cargo(vehicle: &mut impl CargoCarrier, weight: f64) -> Result<(), FleetError> {
    if weight > 0.0 {
        vehicle.load_cargo(weight)?;
    }
    Ok(())
}
