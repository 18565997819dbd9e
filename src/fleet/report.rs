use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::FleetError;
use crate::models::{MoveOutcome, Vehicle, VehicleKind};

/// Aggregate snapshot of a fleet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FleetReport {
    pub total_vehicles: usize,
    /// Vehicles per variant. Variants with no vehicles are omitted.
    pub counts_by_kind: BTreeMap<VehicleKind, usize>,
    /// Mean efficiency over vehicles whose efficiency is strictly positive.
    /// `None` when no such vehicle exists.
    pub average_fuel_efficiency: Option<f64>,
    pub total_mileage: f64,
    pub needing_maintenance: usize,
}

impl FleetReport {
    pub fn from_vehicles(vehicles: &[Vehicle]) -> Self {
        let mut counts_by_kind = BTreeMap::new();
        for v in vehicles {
            *counts_by_kind.entry(v.kind()).or_insert(0) += 1;
        }

        // Fuel-free vehicles (efficiency 0) are left out of the mean entirely.
        let (efficiency_sum, efficiency_count) = vehicles
            .iter()
            .map(Vehicle::fuel_efficiency)
            .filter(|eff| *eff > 0.0)
            .fold((0.0, 0usize), |(sum, n), eff| (sum + eff, n + 1));
        let average_fuel_efficiency = if efficiency_count > 0 {
            Some(efficiency_sum / efficiency_count as f64)
        } else {
            None
        };

        Self {
            total_vehicles: vehicles.len(),
            counts_by_kind,
            average_fuel_efficiency,
            total_mileage: vehicles.iter().map(Vehicle::current_mileage).sum(),
            needing_maintenance: vehicles.iter().filter(|v| v.needs_maintenance()).count(),
        }
    }

    pub fn count_of(&self, kind: VehicleKind) -> usize {
        self.counts_by_kind.get(&kind).copied().unwrap_or(0)
    }
}

/// A per-vehicle failure inside a batch operation.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchFailure {
    pub vehicle_id: String,
    pub error: FleetError,
}

/// Result of moving every vehicle the same distance.
#[derive(Debug, Clone, PartialEq)]
pub struct JourneySummary {
    pub distance: f64,
    /// One entry per vehicle, in fleet order.
    pub results: Vec<JourneyResult>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JourneyResult {
    pub vehicle_id: String,
    pub outcome: Result<MoveOutcome, FleetError>,
}

impl JourneySummary {
    pub fn completed(&self) -> impl Iterator<Item = (&str, &MoveOutcome)> {
        self.results
            .iter()
            .filter_map(|r| r.outcome.as_ref().ok().map(|o| (r.vehicle_id.as_str(), o)))
    }

    pub fn failed(&self) -> impl Iterator<Item = (&str, &FleetError)> {
        self.results
            .iter()
            .filter_map(|r| r.outcome.as_ref().err().map(|e| (r.vehicle_id.as_str(), e)))
    }

    pub fn total_fuel_used(&self) -> f64 {
        self.completed().map(|(_, o)| o.fuel_used).sum()
    }
}

/// Fuel burned across the fleet for one distance, with the vehicles that
/// could not contribute.
#[derive(Debug, Clone, PartialEq)]
pub struct FuelConsumption {
    pub total: f64,
    pub failures: Vec<BatchFailure>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RefuelSummary {
    pub refueled: Vec<String>,
    pub failures: Vec<BatchFailure>,
}
