use serde::Serialize;

use super::capability::{CargoCarrier, FuelConsumable, Maintainable, PassengerCarrier};
use super::{Airplane, Bus, Car, CargoShip, Truck};
use crate::error::{FleetError, Result};

/// Model name used when none is given.
pub const UNKNOWN_MODEL: &str = "Unknown";

/// Identity and odometer shared by every vehicle.
///
/// `id` is fixed at construction. `current_mileage` only grows, and only
/// through a successful move (or a direct restore when loading a saved fleet).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleBase {
    id: String,
    model: String,
    max_speed: f64,
    current_mileage: f64,
}

impl VehicleBase {
    /// Validate and build the shared attributes.
    ///
    /// A blank `model` falls back to [`UNKNOWN_MODEL`].
    pub fn new(id: impl Into<String>, model: impl Into<String>, max_speed: f64) -> Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(FleetError::invalid("Vehicle ID must be non-empty"));
        }
        if !(max_speed >= 0.0) || !max_speed.is_finite() {
            return Err(FleetError::invalid(format!(
                "Max speed must be a non-negative number, got {}",
                max_speed
            )));
        }
        let model = model.into();
        let model = if model.trim().is_empty() {
            UNKNOWN_MODEL.to_string()
        } else {
            model
        };

        Ok(Self {
            id,
            model,
            max_speed,
            current_mileage: 0.0,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    pub fn current_mileage(&self) -> f64 {
        self.current_mileage
    }

    pub(crate) fn add_mileage(&mut self, distance: f64) {
        self.current_mileage += distance;
    }

    /// Set the odometer directly. Only used when rebuilding a saved vehicle.
    pub(crate) fn restore_mileage(&mut self, mileage: f64) -> Result<()> {
        if !(mileage >= 0.0) || !mileage.is_finite() {
            return Err(FleetError::invalid(format!("Invalid mileage {}", mileage)));
        }
        self.current_mileage = mileage;
        Ok(())
    }
}

/// Reject negative or non-numeric distances before any state is touched.
pub(crate) fn check_distance(distance: f64) -> Result<()> {
    if !(distance >= 0.0) || !distance.is_finite() {
        return Err(FleetError::invalid(format!(
            "Distance cannot be negative (got {})",
            distance
        )));
    }
    Ok(())
}

/// The five concrete vehicle variants. This is the closed set the fleet can
/// search by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum VehicleKind {
    Car,
    Truck,
    Bus,
    Airplane,
    CargoShip,
}

impl VehicleKind {
    pub const ALL: [VehicleKind; 5] = [
        Self::Car,
        Self::Truck,
        Self::Bus,
        Self::Airplane,
        Self::CargoShip,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Car => "Car",
            Self::Truck => "Truck",
            Self::Bus => "Bus",
            Self::Airplane => "Airplane",
            Self::CargoShip => "CargoShip",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Car" => Some(Self::Car),
            "Truck" => Some(Self::Truck),
            "Bus" => Some(Self::Bus),
            "Airplane" => Some(Self::Airplane),
            "CargoShip" => Some(Self::CargoShip),
            _ => None,
        }
    }

    pub fn category(&self) -> VehicleCategory {
        match self {
            Self::Car | Self::Truck | Self::Bus => VehicleCategory::Land,
            Self::Airplane => VehicleCategory::Air,
            Self::CargoShip => VehicleCategory::Water,
        }
    }

    /// Capabilities the variant implements.
    pub fn capabilities(&self) -> &'static [Capability] {
        use Capability::*;
        match self {
            Self::Car => &[Fuel, Passengers, Maintenance],
            Self::Truck => &[Fuel, Cargo, Maintenance],
            Self::Bus => &[Fuel, Passengers, Cargo, Maintenance],
            Self::Airplane => &[Fuel, Passengers, Cargo, Maintenance],
            Self::CargoShip => &[Fuel, Cargo, Maintenance],
        }
    }

    pub fn has(&self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }
}

/// Terrain a vehicle travels on. Drives the journey-time estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum VehicleCategory {
    Land,
    Air,
    Water,
}

impl VehicleCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Land => "land",
            Self::Air => "air",
            Self::Water => "water",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "land" => Some(Self::Land),
            "air" => Some(Self::Air),
            "water" => Some(Self::Water),
            _ => None,
        }
    }

    /// Multiplier applied to `distance / max_speed`.
    ///
    /// Land adds 10% for traffic, air saves 5% on direct paths.
    pub fn journey_time_factor(&self) -> f64 {
        match self {
            Self::Land => 1.1,
            Self::Air => 0.95,
            Self::Water => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Capability {
    Fuel,
    Passengers,
    Cargo,
    Maintenance,
}

/// What a vehicle did on a successful move.
///
/// Rendering the narrative is left to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoveOutcome {
    pub narrative: Narrative,
    pub distance: f64,
    /// Fuel burned; zero for sail propulsion.
    pub fuel_used: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Narrative {
    Driving,
    Hauling,
    Transporting,
    Flying { altitude: f64 },
    Sailing { by_sail: bool },
}

/// A fleet member: one of the five variants.
///
/// Behavior common to all variants dispatches on the variant here; the
/// capability accessors (`as_fuel`, `as_cargo_mut`, ...) agree with
/// [`VehicleKind::capabilities`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Vehicle {
    Car(Car),
    Truck(Truck),
    Bus(Bus),
    Airplane(Airplane),
    CargoShip(CargoShip),
}

impl Vehicle {
    pub fn base(&self) -> &VehicleBase {
        match self {
            Self::Car(v) => v.base(),
            Self::Truck(v) => v.base(),
            Self::Bus(v) => v.base(),
            Self::Airplane(v) => v.base(),
            Self::CargoShip(v) => v.base(),
        }
    }

    pub(crate) fn base_mut(&mut self) -> &mut VehicleBase {
        match self {
            Self::Car(v) => &mut v.base,
            Self::Truck(v) => &mut v.base,
            Self::Bus(v) => &mut v.base,
            Self::Airplane(v) => &mut v.base,
            Self::CargoShip(v) => &mut v.base,
        }
    }

    pub fn id(&self) -> &str {
        self.base().id()
    }

    pub fn model(&self) -> &str {
        self.base().model()
    }

    pub fn max_speed(&self) -> f64 {
        self.base().max_speed()
    }

    pub fn current_mileage(&self) -> f64 {
        self.base().current_mileage()
    }

    pub fn kind(&self) -> VehicleKind {
        match self {
            Self::Car(_) => VehicleKind::Car,
            Self::Truck(_) => VehicleKind::Truck,
            Self::Bus(_) => VehicleKind::Bus,
            Self::Airplane(_) => VehicleKind::Airplane,
            Self::CargoShip(_) => VehicleKind::CargoShip,
        }
    }

    pub fn category(&self) -> VehicleCategory {
        self.kind().category()
    }

    pub fn has_capability(&self, capability: Capability) -> bool {
        self.kind().has(capability)
    }

    /// Move `distance` units. All-or-nothing: on error neither mileage nor
    /// fuel changes.
    pub fn move_by(&mut self, distance: f64) -> Result<MoveOutcome> {
        match self {
            Self::Car(v) => v.move_by(distance),
            Self::Truck(v) => v.move_by(distance),
            Self::Bus(v) => v.move_by(distance),
            Self::Airplane(v) => v.move_by(distance),
            Self::CargoShip(v) => v.move_by(distance),
        }
    }

    /// Distance per fuel unit. Exactly `0.0` means fuel-free propulsion.
    pub fn fuel_efficiency(&self) -> f64 {
        match self {
            Self::Car(v) => v.fuel_efficiency(),
            Self::Truck(v) => v.fuel_efficiency(),
            Self::Bus(v) => v.fuel_efficiency(),
            Self::Airplane(v) => v.fuel_efficiency(),
            Self::CargoShip(v) => v.fuel_efficiency(),
        }
    }

    /// Hours to cover `distance` at max speed, adjusted for the category.
    ///
    /// A stationary vehicle (max speed 0) never arrives unless the distance is 0.
    pub fn estimate_journey_time(&self, distance: f64) -> f64 {
        if distance == 0.0 {
            return 0.0;
        }
        let base_time = distance / self.max_speed();
        base_time * self.category().journey_time_factor()
    }

    pub fn as_fuel(&self) -> Option<&dyn FuelConsumable> {
        match self {
            Self::Car(v) => Some(v),
            Self::Truck(v) => Some(v),
            Self::Bus(v) => Some(v),
            Self::Airplane(v) => Some(v),
            Self::CargoShip(v) => Some(v),
        }
    }

    pub fn as_fuel_mut(&mut self) -> Option<&mut dyn FuelConsumable> {
        match self {
            Self::Car(v) => Some(v),
            Self::Truck(v) => Some(v),
            Self::Bus(v) => Some(v),
            Self::Airplane(v) => Some(v),
            Self::CargoShip(v) => Some(v),
        }
    }

    pub fn as_passengers(&self) -> Option<&dyn PassengerCarrier> {
        match self {
            Self::Car(v) => Some(v),
            Self::Bus(v) => Some(v),
            Self::Airplane(v) => Some(v),
            Self::Truck(_) | Self::CargoShip(_) => None,
        }
    }

    pub fn as_passengers_mut(&mut self) -> Option<&mut dyn PassengerCarrier> {
        match self {
            Self::Car(v) => Some(v),
            Self::Bus(v) => Some(v),
            Self::Airplane(v) => Some(v),
            Self::Truck(_) | Self::CargoShip(_) => None,
        }
    }

    pub fn as_cargo(&self) -> Option<&dyn CargoCarrier> {
        match self {
            Self::Truck(v) => Some(v),
            Self::Bus(v) => Some(v),
            Self::Airplane(v) => Some(v),
            Self::CargoShip(v) => Some(v),
            Self::Car(_) => None,
        }
    }

    pub fn as_cargo_mut(&mut self) -> Option<&mut dyn CargoCarrier> {
        match self {
            Self::Truck(v) => Some(v),
            Self::Bus(v) => Some(v),
            Self::Airplane(v) => Some(v),
            Self::CargoShip(v) => Some(v),
            Self::Car(_) => None,
        }
    }

    pub fn as_maintainable(&self) -> Option<&dyn Maintainable> {
        match self {
            Self::Car(v) => Some(v),
            Self::Truck(v) => Some(v),
            Self::Bus(v) => Some(v),
            Self::Airplane(v) => Some(v),
            Self::CargoShip(v) => Some(v),
        }
    }

    pub fn as_maintainable_mut(&mut self) -> Option<&mut dyn Maintainable> {
        match self {
            Self::Car(v) => Some(v),
            Self::Truck(v) => Some(v),
            Self::Bus(v) => Some(v),
            Self::Airplane(v) => Some(v),
            Self::CargoShip(v) => Some(v),
        }
    }

    pub fn needs_maintenance(&self) -> bool {
        self.as_maintainable()
            .is_some_and(|m| m.needs_maintenance())
    }
}

impl From<Car> for Vehicle {
    fn from(v: Car) -> Self {
        Self::Car(v)
    }
}

impl From<Truck> for Vehicle {
    fn from(v: Truck) -> Self {
        Self::Truck(v)
    }
}

impl From<Bus> for Vehicle {
    fn from(v: Bus) -> Self {
        Self::Bus(v)
    }
}

impl From<Airplane> for Vehicle {
    fn from(v: Airplane) -> Self {
        Self::Airplane(v)
    }
}

impl From<CargoShip> for Vehicle {
    fn from(v: CargoShip) -> Self {
        Self::CargoShip(v)
    }
}
