use serde::Serialize;

use super::capability::{
    CargoCarrier, CargoHold, FuelConsumable, FuelTank, Maintainable, MaintenanceState,
    PassengerCabin, PassengerCarrier,
};
use super::vehicle::{check_distance, MoveOutcome, Narrative, VehicleBase};
use crate::error::Result;

/// A bus: 50 seats and a small luggage hold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bus {
    #[serde(flatten)]
    pub(crate) base: VehicleBase,
    num_wheels: u32,
    fuel: FuelTank,
    passengers: PassengerCabin,
    cargo: CargoHold,
    maintenance: MaintenanceState,
}

impl Bus {
    pub const PASSENGER_CAPACITY: u32 = 50;
    pub const CARGO_CAPACITY: f64 = 500.0;
    pub const FUEL_EFFICIENCY: f64 = 10.0;

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
            cargo: CargoHold::new(Self::CARGO_CAPACITY),
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
        let fuel_used = self
            .fuel
            .draw(needed, "Insufficient fuel for the bus journey")?;
        self.base.add_mileage(distance);
        Ok(MoveOutcome {
            narrative: Narrative::Transporting,
            distance,
            fuel_used,
        })
    }
}

impl FuelConsumable for Bus {
    fn refuel(&mut self, amount: f64) -> Result<()> {
        self.fuel.fill(amount)
    }

    fn fuel_level(&self) -> f64 {
        self.fuel.level()
    }

    fn consume_fuel(&mut self, distance: f64) -> Result<f64> {
        check_distance(distance)?;
        let needed = FuelTank::required(distance, self.fuel_efficiency())?;
        self.fuel.draw(needed, "Not enough fuel")
    }
}

impl PassengerCarrier for Bus {
    fn board_passengers(&mut self, count: u32) -> Result<()> {
        self.passengers.board(count, "Bus")
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

impl CargoCarrier for Bus {
    fn load_cargo(&mut self, weight: f64) -> Result<()> {
        self.cargo.load(weight, "Bus")
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

impl Maintainable for Bus {
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
