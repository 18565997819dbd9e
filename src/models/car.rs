use serde::Serialize;

use super::capability::{
    FuelConsumable, FuelTank, Maintainable, MaintenanceState, PassengerCabin, PassengerCarrier,
};
use super::vehicle::{check_distance, MoveOutcome, Narrative, VehicleBase};
use crate::error::Result;

/// A passenger car. Constant efficiency, five seats.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Car {
    #[serde(flatten)]
    pub(crate) base: VehicleBase,
    num_wheels: u32,
    fuel: FuelTank,
    passengers: PassengerCabin,
    maintenance: MaintenanceState,
}

impl Car {
    pub const PASSENGER_CAPACITY: u32 = 5;
    pub const FUEL_EFFICIENCY: f64 = 15.0;

    pub fn new(
        id: impl Into<String>,
        model: impl Into<String>,
        max_speed: f64,
        num_wheels: u32,
    ) -> Result<Self> {
        Ok(Self {
            base: VehicleBase::new(id, model, max_speed)?,
            num_wheels,
            fuel: FuelTank::default(),
            passengers: PassengerCabin::new(Self::PASSENGER_CAPACITY),
            maintenance: MaintenanceState::default(),
        })
    }

    pub fn base(&self) -> &VehicleBase {
        &self.base
    }

    pub fn num_wheels(&self) -> u32 {
        self.num_wheels
    }

    pub fn fuel_efficiency(&self) -> f64 {
        Self::FUEL_EFFICIENCY
    }

    pub fn move_by(&mut self, distance: f64) -> Result<MoveOutcome> {
        check_distance(distance)?;
        let needed = FuelTank::required(distance, self.fuel_efficiency())?;
        let fuel_used = self.fuel.draw(needed, "Not enough fuel for the trip")?;
        self.base.add_mileage(distance);
        Ok(MoveOutcome {
            narrative: Narrative::Driving,
            distance,
            fuel_used,
        })
    }
}

impl FuelConsumable for Car {
    fn refuel(&mut self, amount: f64) -> Result<()> {
        self.fuel.fill(amount)
    }

    fn fuel_level(&self) -> f64 {
        self.fuel.level()
    }

    fn consume_fuel(&mut self, distance: f64) -> Result<f64> {
        check_distance(distance)?;
        let needed = FuelTank::required(distance, self.fuel_efficiency())?;
        self.fuel.draw(needed, "Insufficient fuel")
    }
}

impl PassengerCarrier for Car {
    fn board_passengers(&mut self, count: u32) -> Result<()> {
        self.passengers.board(count, "Car")
    }

    fn disembark_passengers(&mut self, count: u32) -> Result<()> {
        self.passengers.disembark(count)
    }

    fn passenger_capacity(&self) -> u32 {
        self.passengers.capacity()
    }

    fn current_passengers(&self) -> u32 {
        self.passengers.current()
    }
}

impl Maintainable for Car {
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
    use crate::error::FleetError;

    #[test]
    fn test_move_burns_distance_over_fifteen() {
        let mut car = Car::new("C001", "Toyota", 120.0, 4).unwrap();
        car.refuel(50.0).unwrap();
        let outcome = car.move_by(100.0).unwrap();

        assert_eq!(outcome.narrative, Narrative::Driving);
        assert!((outcome.fuel_used - 100.0 / 15.0).abs() < 1e-9);
        assert!((car.fuel_level() - (50.0 - 100.0 / 15.0)).abs() < 1e-9);
        assert_eq!(car.base().current_mileage(), 100.0);
    }

    #[test]
    fn test_move_without_fuel_changes_nothing() {
        let mut car = Car::new("C002", "Honda", 120.0, 4).unwrap();
        let err = car.move_by(10.0).unwrap_err();
        assert!(matches!(err, FleetError::InsufficientFuel(_)));
        assert_eq!(car.base().current_mileage(), 0.0);
        assert_eq!(car.fuel_level(), 0.0);
    }
}
