//! The fleet: an ordered, ID-unique collection of vehicles and the batch
//! operations that run over it.
//!
//! Batch operations (`start_all_journeys`, `total_fuel_consumption`,
//! `refuel_all`) never fail as a whole. Each vehicle's failure is logged and
//! returned in the summary, and processing continues with the next vehicle.

mod report;

use std::path::Path;

use crate::error::{FleetError, Result};
use crate::models::{Vehicle, VehicleCategory, VehicleKind};
use crate::storage::{self, LoadSummary, StorageError};

pub use report::*;

#[derive(Debug, Clone, Default)]
pub struct FleetManager {
    vehicles: Vec<Vehicle>,
}

impl FleetManager {
    pub fn new() -> Self {
        Self::default()
    }

    // ============================================================
    // Membership
    // ============================================================

    /// All vehicles in fleet order.
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.vehicles.iter().any(|v| v.id() == id)
    }

    pub fn get(&self, id: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id() == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Vehicle> {
        self.vehicles.iter_mut().find(|v| v.id() == id)
    }

    /// Append a vehicle. Fails with `InvalidOperation` if the ID is taken.
    pub fn add_vehicle(&mut self, vehicle: impl Into<Vehicle>) -> Result<()> {
        let vehicle = vehicle.into();
        if self.contains(vehicle.id()) {
            return Err(FleetError::invalid(format!(
                "Vehicle ID already exists: {}",
                vehicle.id()
            )));
        }
        tracing::debug!(id = vehicle.id(), kind = vehicle.kind().as_str(), "vehicle added");
        self.vehicles.push(vehicle);
        Ok(())
    }

    /// Remove and return the vehicle with `id`.
    pub fn remove_vehicle(&mut self, id: &str) -> Result<Vehicle> {
        let index = self
            .vehicles
            .iter()
            .position(|v| v.id() == id)
            .ok_or_else(|| FleetError::invalid(format!("Vehicle ID not found: {}", id)))?;
        tracing::debug!(id, "vehicle removed");
        Ok(self.vehicles.remove(index))
    }

    /// Swap in a freshly loaded collection. Callers guarantee unique IDs.
    pub(crate) fn replace_vehicles(&mut self, vehicles: Vec<Vehicle>) {
        self.vehicles = vehicles;
    }

    // ============================================================
    // Batch operations
    // ============================================================

    pub fn start_all_journeys(&mut self, distance: f64) -> JourneySummary {
        let results = self
            .vehicles
            .iter_mut()
            .map(|v| {
                let outcome = v.move_by(distance);
                if let Err(ref e) = outcome {
                    tracing::warn!(id = v.id(), kind = e.kind(), "journey failed: {}", e);
                }
                JourneyResult {
                    vehicle_id: v.id().to_string(),
                    outcome,
                }
            })
            .collect();

        JourneySummary { distance, results }
    }

    /// Burn fuel for `distance` on every fuel-capable vehicle and sum it.
    ///
    /// Vehicles that cannot cover the distance (including sail ships) are
    /// excluded from the total and listed in `failures`.
    pub fn total_fuel_consumption(&mut self, distance: f64) -> FuelConsumption {
        let mut total = 0.0;
        let mut failures = Vec::new();

        for v in self.vehicles.iter_mut() {
            let id = v.id().to_string();
            let Some(fuel) = v.as_fuel_mut() else {
                continue;
            };
            match fuel.consume_fuel(distance) {
                Ok(burned) => total += burned,
                Err(error) => {
                    tracing::warn!(id = %id, "not enough fuel: {}", error);
                    failures.push(BatchFailure {
                        vehicle_id: id,
                        error,
                    });
                }
            }
        }

        FuelConsumption { total, failures }
    }

    /// Add `amount` of fuel to every fuel-capable vehicle.
    pub fn refuel_all(&mut self, amount: f64) -> RefuelSummary {
        let mut refueled = Vec::new();
        let mut failures = Vec::new();

        for v in self.vehicles.iter_mut() {
            let id = v.id().to_string();
            let Some(fuel) = v.as_fuel_mut() else {
                continue;
            };
            match fuel.refuel(amount) {
                Ok(()) => refueled.push(id),
                Err(error) => {
                    tracing::warn!(id = %id, "refuel failed: {}", error);
                    failures.push(BatchFailure {
                        vehicle_id: id,
                        error,
                    });
                }
            }
        }

        RefuelSummary { refueled, failures }
    }

    /// Refuel one vehicle and return its new fuel level.
    pub fn refuel_vehicle(&mut self, id: &str, amount: f64) -> Result<f64> {
        let vehicle = self
            .get_mut(id)
            .ok_or_else(|| FleetError::invalid(format!("Vehicle ID not found: {}", id)))?;
        let fuel = vehicle
            .as_fuel_mut()
            .ok_or_else(|| FleetError::invalid(format!("Vehicle {} does not use fuel", id)))?;
        fuel.refuel(amount)?;
        Ok(fuel.fuel_level())
    }

    /// Service every vehicle that needs it. Returns the IDs serviced.
    pub fn maintain_all(&mut self) -> Vec<String> {
        let mut serviced = Vec::new();
        for v in self.vehicles.iter_mut() {
            let id = v.id().to_string();
            if let Some(m) = v.as_maintainable_mut() {
                if m.needs_maintenance() {
                    m.perform_maintenance();
                    tracing::debug!(id = %id, "maintenance performed");
                    serviced.push(id);
                }
            }
        }
        serviced
    }

    // ============================================================
    // Queries
    // ============================================================

    pub fn search_by_type(&self, kind: VehicleKind) -> Vec<&Vehicle> {
        self.vehicles.iter().filter(|v| v.kind() == kind).collect()
    }

    /// Search by variant name (`"Car"`, `"CargoShip"`, ...).
    ///
    /// Names outside the five variants fail with `InvalidOperation`.
    pub fn search_by_type_name(&self, name: &str) -> Result<Vec<&Vehicle>> {
        let kind = VehicleKind::from_str(name.trim())
            .ok_or_else(|| FleetError::invalid(format!("Unknown vehicle type: {}", name)))?;
        Ok(self.search_by_type(kind))
    }

    pub fn search_by_category(&self, category: VehicleCategory) -> Vec<&Vehicle> {
        self.vehicles
            .iter()
            .filter(|v| v.category() == category)
            .collect()
    }

    /// Stable sort, ascending by fuel efficiency.
    pub fn sort_fleet_by_efficiency(&mut self) {
        self.vehicles
            .sort_by(|a, b| a.fuel_efficiency().total_cmp(&b.fuel_efficiency()));
    }

    pub fn vehicles_needing_maintenance(&self) -> Vec<&Vehicle> {
        self.vehicles
            .iter()
            .filter(|v| v.needs_maintenance())
            .collect()
    }

    pub fn generate_report(&self) -> FleetReport {
        FleetReport::from_vehicles(&self.vehicles)
    }

    // ============================================================
    // Persistence
    // ============================================================

    pub fn save_to_file(&self, path: &Path) -> Result<(), StorageError> {
        storage::save_fleet(&self.vehicles, path)
    }

    /// Replace the fleet with the contents of `path`.
    ///
    /// On error the current fleet is left untouched.
    pub fn load_from_file(&mut self, path: &Path) -> Result<LoadSummary, StorageError> {
        let (vehicles, summary) = storage::load_fleet(path)?;
        self.replace_vehicles(vehicles);
        Ok(summary)
    }
}
