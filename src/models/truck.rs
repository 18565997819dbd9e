use serde::Serialize;

use super::capability::{
    CargoCarrier, CargoHold, FuelConsumable, FuelTank, Maintainable, MaintenanceState,
};
use super::vehicle::{check_distance, MoveOutcome, Narrative, VehicleBase};
use crate::error::Result;

/// A freight truck. Efficiency drops by 10% once the hold is more than half full.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Truck {
    #[serde(flatten)]
    pub(crate) base: VehicleBase,
    num_wheels: u32,
    fuel: FuelTank,
    cargo: CargoHold,
    maintenance: MaintenanceState,
}

impl Truck {
    pub const CARGO_CAPACITY: f64 = 5000.0;
    pub const BASE_FUEL_EFFICIENCY: f64 = 8.0;
    /// Efficiency multiplier applied above [`Self::HEAVY_LOAD_FACTOR`].
    pub const HEAVY_LOAD_PENALTY: f64 = 0.9;
    pub const HEAVY_LOAD_FACTOR: f64 = 0.5;

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
        if self.cargo.current() > Self::HEAVY_LOAD_FACTOR * self.cargo.capacity() {
            Self::BASE_FUEL_EFFICIENCY * Self::HEAVY_LOAD_PENALTY
        } else {
            Self::BASE_FUEL_EFFICIENCY
        }
    }

    pub fn move_by(&mut self, distance: f64) -> Result<MoveOutcome> {
        check_distance(distance)?;
        let needed = FuelTank::required(distance, self.fuel_efficiency())?;
        let fuel_used = self.fuel.draw(needed, "Insufficient fuel for the trip")?;
        self.base.add_mileage(distance);
        Ok(MoveOutcome {
            narrative: Narrative::Hauling,
            distance,
            fuel_used,
        })
    }
}

impl FuelConsumable for Truck {
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

impl CargoCarrier for Truck {
    fn load_cargo(&mut self, weight: f64) -> Result<()> {
        self.cargo.load(weight, "Truck")
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

impl Maintainable for Truck {
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
