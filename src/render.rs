//! Plain-text rendering of vehicles, journeys and reports.

use std::fmt::{self, Write};

use crate::fleet::{FleetReport, JourneySummary};
use crate::models::{Narrative, Vehicle};

impl fmt::Display for Narrative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Driving => write!(f, "Driving on road..."),
            Self::Hauling => write!(f, "Hauling cargo..."),
            Self::Transporting => write!(f, "Transporting passengers and cargo..."),
            Self::Flying { altitude } => write!(f, "Flying at {} meters...", altitude),
            Self::Sailing { by_sail: true } => write!(f, "Sailing with cargo... (by sail)"),
            Self::Sailing { by_sail: false } => write!(f, "Sailing with cargo..."),
        }
    }
}

impl fmt::Display for FleetReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Fleet Report ===")?;
        writeln!(f, "Total vehicles: {}", self.total_vehicles)?;
        for (kind, count) in &self.counts_by_kind {
            writeln!(f, "{}: {}", kind.as_str(), count)?;
        }
        if let Some(avg) = self.average_fuel_efficiency {
            writeln!(f, "Average fuel efficiency: {:.2} km/l", avg)?;
        }
        writeln!(f, "Total mileage: {:.1} km", self.total_mileage)?;
        writeln!(f, "Vehicles needing maintenance: {}", self.needing_maintenance)
    }
}

/// Multi-line description of one vehicle, including whichever capabilities
/// it carries.
pub fn vehicle_info(vehicle: &Vehicle) -> String {
    let mut out = String::new();
    let base = vehicle.base();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "----- Vehicle Info -----");
    let _ = writeln!(out, "Type: {}", vehicle.kind().as_str());
    let _ = writeln!(out, "ID: {}", base.id());
    let _ = writeln!(out, "Model: {}", base.model());
    let _ = writeln!(out, "Max Speed: {} km/h", base.max_speed());
    let _ = writeln!(out, "Mileage: {} km", base.current_mileage());

    match vehicle {
        Vehicle::Car(c) => {
            let _ = writeln!(out, "Wheels: {}", c.num_wheels());
        }
        Vehicle::Truck(t) => {
            let _ = writeln!(out, "Wheels: {}", t.num_wheels());
        }
        Vehicle::Bus(b) => {
            let _ = writeln!(out, "Wheels: {}", b.num_wheels());
        }
        Vehicle::Airplane(a) => {
            let _ = writeln!(out, "Max Altitude: {} m", a.max_altitude());
        }
        Vehicle::CargoShip(s) => {
            let propulsion = if s.has_sail() { "sail" } else { "motor" };
            let _ = writeln!(out, "Propulsion: {}", propulsion);
        }
    }

    if let Some(fuel) = vehicle.as_fuel() {
        let _ = writeln!(out, "Fuel: {:.2}", fuel.fuel_level());
    }
    if let Some(p) = vehicle.as_passengers() {
        let _ = writeln!(
            out,
            "Passengers: {}/{}",
            p.current_passengers(),
            p.passenger_capacity()
        );
    }
    if let Some(c) = vehicle.as_cargo() {
        let _ = writeln!(out, "Cargo: {}/{}", c.current_cargo(), c.cargo_capacity());
    }
    if vehicle.needs_maintenance() {
        let _ = writeln!(out, "Needs maintenance: yes");
    }
    out
}

/// One line per vehicle: the narrative on success, the error otherwise.
pub fn journey_lines(summary: &JourneySummary) -> String {
    let mut out = String::new();
    for result in &summary.results {
        let _ = match &result.outcome {
            Ok(outcome) => writeln!(out, "{}: {}", result.vehicle_id, outcome.narrative),
            Err(e) => writeln!(out, "{}: {}", result.vehicle_id, e),
        };
    }
    out
}
