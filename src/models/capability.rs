//! Capability contracts and the state blocks that back them.
//!
//! A variant opts into a capability by holding the matching state block and
//! implementing the trait over it. The blocks own every bounds check so the
//! variants only decide policy (capacity constants, efficiency, error wording).

use serde::Serialize;

use crate::error::{FleetError, Result};

/// Mileage above which a vehicle needs maintenance regardless of its flag.
pub const MAINTENANCE_MILEAGE_THRESHOLD: f64 = 10_000.0;

/// Vehicles that burn fuel to move.
pub trait FuelConsumable {
    /// Add `amount` to the tank. Fails with `InvalidOperation` when `amount <= 0`.
    fn refuel(&mut self, amount: f64) -> Result<()>;

    fn fuel_level(&self) -> f64;

    /// Burn the fuel needed for `distance` and return the amount burned.
    ///
    /// Fails with `InsufficientFuel` when the tank holds less than required;
    /// the tank is untouched in that case.
    fn consume_fuel(&mut self, distance: f64) -> Result<f64>;
}

/// Vehicles that carry people.
pub trait PassengerCarrier {
    /// Board `count` passengers. Zero is a no-op.
    fn board_passengers(&mut self, count: u32) -> Result<()>;

    fn disembark_passengers(&mut self, count: u32) -> Result<()>;

    fn passenger_capacity(&self) -> u32;

    fn current_passengers(&self) -> u32;
}

/// Vehicles that carry freight, measured by weight.
pub trait CargoCarrier {
    /// Load `weight` units of cargo. Non-positive weights are a no-op.
    fn load_cargo(&mut self, weight: f64) -> Result<()>;

    fn unload_cargo(&mut self, weight: f64) -> Result<()>;

    fn cargo_capacity(&self) -> f64;

    fn current_cargo(&self) -> f64;
}

/// Vehicles with a service schedule.
pub trait Maintainable {
    fn schedule_maintenance(&mut self);

    /// True if maintenance was scheduled or the mileage threshold was crossed.
    fn needs_maintenance(&self) -> bool;

    /// Clear the scheduled flag. Mileage is not reset.
    fn perform_maintenance(&mut self);
}

// ============================================================
// State blocks
// ============================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FuelTank {
    level: f64,
}

impl FuelTank {
    pub fn level(&self) -> f64 {
        self.level
    }

    pub(crate) fn fill(&mut self, amount: f64) -> Result<()> {
        if !(amount > 0.0) || !amount.is_finite() {
            return Err(FleetError::invalid("Refuel amount must be > 0"));
        }
        let level = self.level + amount;
        if !level.is_finite() {
            return Err(FleetError::invalid(format!(
                "Refuel of {} would overflow the tank ({} on board)",
                amount, self.level
            )));
        }
        self.level = level;
        Ok(())
    }

    /// Fuel needed to cover `distance` at `efficiency` distance units per fuel unit.
    pub(crate) fn required(distance: f64, efficiency: f64) -> Result<f64> {
        if !(efficiency > 0.0) {
            return Err(FleetError::invalid("Invalid fuel efficiency"));
        }
        Ok(distance / efficiency)
    }

    /// Check that `needed` is available without touching the tank.
    pub(crate) fn ensure(&self, needed: f64, shortfall: &str) -> Result<()> {
        if needed > self.level {
            return Err(FleetError::insufficient_fuel(format!(
                "{} (need {:.2}, have {:.2})",
                shortfall, needed, self.level
            )));
        }
        Ok(())
    }

    pub(crate) fn draw(&mut self, needed: f64, shortfall: &str) -> Result<f64> {
        self.ensure(needed, shortfall)?;
        self.level -= needed;
        Ok(needed)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassengerCabin {
    capacity: u32,
    current: u32,
}

impl PassengerCabin {
    pub(crate) fn new(capacity: u32) -> Self {
        Self {
            capacity,
            current: 0,
        }
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub(crate) fn board(&mut self, count: u32, owner: &str) -> Result<()> {
        if count == 0 {
            return Ok(());
        }
        match self.current.checked_add(count) {
            Some(total) if total <= self.capacity => {
                self.current = total;
                Ok(())
            }
            _ => Err(FleetError::overload(format!(
                "Passenger overload for {} ({} aboard, {} boarding, capacity {})",
                owner, self.current, count, self.capacity
            ))),
        }
    }

    pub(crate) fn disembark(&mut self, count: u32) -> Result<()> {
        if count > self.current {
            return Err(FleetError::invalid(format!(
                "Cannot disembark {} passengers, only {} aboard",
                count, self.current
            )));
        }
        self.current -= count;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CargoHold {
    capacity: f64,
    current: f64,
}

impl CargoHold {
    pub(crate) fn new(capacity: f64) -> Self {
        Self {
            capacity,
            current: 0.0,
        }
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    /// Share of capacity currently in use, 0.0 to 1.0.
    pub fn load_factor(&self) -> f64 {
        if self.capacity > 0.0 {
            self.current / self.capacity
        } else {
            0.0
        }
    }

    pub(crate) fn load(&mut self, weight: f64, owner: &str) -> Result<()> {
        if !(weight > 0.0) {
            return Ok(());
        }
        if !weight.is_finite() || self.current + weight > self.capacity {
            return Err(FleetError::overload(format!(
                "Cargo overload for {} ({} loaded, {} incoming, capacity {})",
                owner, self.current, weight, self.capacity
            )));
        }
        self.current += weight;
        Ok(())
    }

    pub(crate) fn unload(&mut self, weight: f64) -> Result<()> {
        if !(weight >= 0.0) {
            return Err(FleetError::invalid("Invalid unload weight"));
        }
        if weight > self.current {
            return Err(FleetError::invalid(format!(
                "Cannot unload {} with only {} aboard",
                weight, self.current
            )));
        }
        self.current -= weight;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MaintenanceState {
    scheduled: bool,
}

impl MaintenanceState {
    pub fn is_scheduled(&self) -> bool {
        self.scheduled
    }

    pub(crate) fn schedule(&mut self) {
        self.scheduled = true;
    }

    pub(crate) fn clear(&mut self) {
        self.scheduled = false;
    }

    pub(crate) fn is_due(&self, mileage: f64) -> bool {
        self.scheduled || mileage > MAINTENANCE_MILEAGE_THRESHOLD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tank_rejects_non_positive_refuel() {
        let mut tank = FuelTank::default();
        assert!(matches!(tank.fill(0.0), Err(FleetError::InvalidOperation(_))));
        assert!(matches!(tank.fill(-3.0), Err(FleetError::InvalidOperation(_))));
        assert!(matches!(tank.fill(f64::NAN), Err(FleetError::InvalidOperation(_))));
        assert_eq!(tank.level(), 0.0);
    }

    #[test]
    fn test_tank_rejects_refuel_that_overflows() {
        let mut tank = FuelTank::default();
        tank.fill(f64::MAX).unwrap();
        assert!(matches!(tank.fill(f64::MAX), Err(FleetError::InvalidOperation(_))));
        assert_eq!(tank.level(), f64::MAX);
    }

    #[test]
    fn test_tank_draw_is_all_or_nothing() {
        let mut tank = FuelTank::default();
        tank.fill(5.0).unwrap();
        assert!(matches!(
            tank.draw(6.0, "short"),
            Err(FleetError::InsufficientFuel(_))
        ));
        assert_eq!(tank.level(), 5.0);
        assert_eq!(tank.draw(5.0, "short").unwrap(), 5.0);
        assert_eq!(tank.level(), 0.0);
    }

    #[test]
    fn test_cabin_boarding_up_to_capacity() {
        let mut cabin = PassengerCabin::new(5);
        cabin.board(0, "Car").unwrap();
        assert_eq!(cabin.current(), 0);
        cabin.board(5, "Car").unwrap();
        assert!(matches!(cabin.board(1, "Car"), Err(FleetError::Overload(_))));
        assert_eq!(cabin.current(), 5);
        assert!(matches!(cabin.disembark(6), Err(FleetError::InvalidOperation(_))));
        cabin.disembark(5).unwrap();
        assert_eq!(cabin.current(), 0);
    }

    #[test]
    fn test_hold_ignores_non_positive_loads() {
        let mut hold = CargoHold::new(100.0);
        hold.load(-5.0, "Truck").unwrap();
        hold.load(0.0, "Truck").unwrap();
        assert_eq!(hold.current(), 0.0);
        assert!(matches!(hold.unload(-1.0), Err(FleetError::InvalidOperation(_))));
    }

    #[test]
    fn test_maintenance_due_on_flag_or_mileage() {
        let mut state = MaintenanceState::default();
        assert!(!state.is_due(MAINTENANCE_MILEAGE_THRESHOLD));
        assert!(state.is_due(MAINTENANCE_MILEAGE_THRESHOLD + 1.0));
        state.schedule();
        assert!(state.is_due(0.0));
        state.clear();
        assert!(!state.is_due(0.0));
    }
}
