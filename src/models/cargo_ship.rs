use serde::Serialize;

use super::capability::{
    CargoCarrier, CargoHold, FuelConsumable, FuelTank, Maintainable, MaintenanceState,
};
use super::vehicle::{check_distance, MoveOutcome, Narrative, VehicleBase};
use crate::error::{FleetError, Result};

/// A freighter, either motor-driven or sail-equipped.
///
/// Sail ships report an efficiency of exactly `0.0`, move without touching
/// fuel, and refuse every fuel operation. Their tank stays empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CargoShip {
    #[serde(flatten)]
    pub(crate) base: VehicleBase,
    has_sail: bool,
    fuel: FuelTank,
    cargo: CargoHold,
    maintenance: MaintenanceState,
}

impl CargoShip {
    pub const CARGO_CAPACITY: f64 = 50_000.0;
    pub const MOTOR_FUEL_EFFICIENCY: f64 = 4.0;

    pub fn new(
        id: impl Into<String>,
        model: impl Into<String>,
        max_speed: f64,
        has_sail: bool,
    ) -> Result<Self> {
        Ok(Self {
            base: VehicleBase::new(id, model, max_speed)?,
            has_sail,
            fuel: FuelTank::default(),
            cargo: CargoHold::new(Self::CARGO_CAPACITY),
            maintenance: MaintenanceState::default(),
        })
    }

    pub fn base(&self) -> &VehicleBase {
        &self.base
    }

    pub fn has_sail(&self) -> bool {
        self.has_sail
    }

    pub fn fuel_efficiency(&self) -> f64 {
        if self.has_sail {
            0.0
        } else {
            Self::MOTOR_FUEL_EFFICIENCY
        }
    }

    pub fn move_by(&mut self, distance: f64) -> Result<MoveOutcome> {
        check_distance(distance)?;
        if self.has_sail {
            self.base.add_mileage(distance);
            return Ok(MoveOutcome {
                narrative: Narrative::Sailing { by_sail: true },
                distance,
                fuel_used: 0.0,
            });
        }

        let needed = FuelTank::required(distance, self.fuel_efficiency())?;
        let fuel_used = self.fuel.draw(needed, "Insufficient fuel for sailing")?;
        self.base.add_mileage(distance);
        Ok(MoveOutcome {
            narrative: Narrative::Sailing { by_sail: false },
            distance,
            fuel_used,
        })
    }
}

impl FuelConsumable for CargoShip {
    fn refuel(&mut self, amount: f64) -> Result<()> {
        if self.has_sail {
            return Err(FleetError::invalid(
                "This ship has sail; refuel not applicable",
            ));
        }
        self.fuel.fill(amount)
    }

    fn fuel_level(&self) -> f64 {
        if self.has_sail {
            0.0
        } else {
            self.fuel.level()
        }
    }

    fn consume_fuel(&mut self, distance: f64) -> Result<f64> {
        check_distance(distance)?;
        if self.has_sail {
            return Err(FleetError::insufficient_fuel(
                "Ship uses sail; no fuel consumed",
            ));
        }
        let needed = FuelTank::required(distance, self.fuel_efficiency())?;
        self.fuel.draw(needed, "Insufficient fuel")
    }
}

impl CargoCarrier for CargoShip {
    fn load_cargo(&mut self, weight: f64) -> Result<()> {
        self.cargo.load(weight, "CargoShip")
    }

    fn unload_cargo(&mut self, weight: f64) -> Result<()> {
        self.cargo.unload(weight)
    }

    fn cargo_capacity(&self) -> f64 {
        self.cargo.capacity()
    }

    fn current_cargo(&self) -> f64 {
        self.cargo.current()
    }
}

impl Maintainable for CargoShip {
    fn schedule_maintenance(&mut self) {
        self.maintenance.schedule();
    }

    fn needs_maintenance(&self) -> bool {
        self.maintenance.is_due(self.base.current_mileage())
    }

    fn perform_maintenance(&mut self) {
        self.maintenance.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sail_ship_moves_without_fuel() {
        let mut ship = CargoShip::new("S001", "Maersk", 50.0, true).unwrap();
        assert_eq!(ship.fuel_efficiency(), 0.0);

        let outcome = ship.move_by(100.0).unwrap();
        assert_eq!(outcome.narrative, Narrative::Sailing { by_sail: true });
        assert_eq!(outcome.fuel_used, 0.0);
        assert_eq!(ship.base().current_mileage(), 100.0);
        assert_eq!(ship.fuel_level(), 0.0);

        assert!(matches!(ship.refuel(10.0), Err(FleetError::InvalidOperation(_))));
        assert!(matches!(
            ship.consume_fuel(10.0),
            Err(FleetError::InsufficientFuel(_))
        ));
    }

    #[test]
    fn test_motor_ship_burns_a_quarter_per_unit() {
        let mut ship = CargoShip::new("S002", "Evergreen", 40.0, false).unwrap();
        ship.refuel(30.0).unwrap();
        let outcome = ship.move_by(100.0).unwrap();
        assert_eq!(outcome.narrative, Narrative::Sailing { by_sail: false });
        assert_eq!(outcome.fuel_used, 25.0);
        assert_eq!(ship.fuel_level(), 5.0);

        assert!(matches!(
            ship.move_by(100.0),
            Err(FleetError::InsufficientFuel(_))
        ));
        assert_eq!(ship.base().current_mileage(), 100.0);
    }
}
