use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fleet_manager::config::{self, FleetConfig};
use fleet_manager::models::{
    Airplane, Bus, Car, CargoCarrier, CargoShip, FuelConsumable, PassengerCarrier, Truck,
    VehicleCategory,
};
use fleet_manager::{render, FleetError, FleetManager};

#[derive(Parser)]
#[command(name = "fleet")]
#[command(about = "Manage a fleet of cars, trucks, buses, airplanes and cargo ships")]
struct Cli {
    /// Fleet data file (overrides FLEET_DATA_FILE and the config file)
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the config file, or change it with the options below
    Config {
        /// Fleet data file used when neither --file nor FLEET_DATA_FILE is set
        #[arg(long)]
        data_file: Option<PathBuf>,
        /// Log filter used when RUST_LOG is unset
        #[arg(long)]
        log_filter: Option<String>,
    },
    #[command(flatten)]
    Fleet(FleetCommand),
}

#[derive(Subcommand)]
enum FleetCommand {
    /// Replace the fleet with the demo fleet and send it on a 100 km journey
    Demo,
    /// Add a vehicle
    Add {
        #[command(subcommand)]
        vehicle: NewVehicle,
    },
    /// Remove a vehicle by ID
    Remove { id: String },
    /// Show every vehicle
    List,
    /// Move every vehicle the same distance
    Journey {
        #[arg(allow_negative_numbers = true)]
        distance: f64,
    },
    /// Burn fuel for a distance on every fuel-using vehicle and print the total
    Consume {
        #[arg(allow_negative_numbers = true)]
        distance: f64,
    },
    /// Refuel one vehicle
    Refuel {
        id: String,
        #[arg(allow_negative_numbers = true)]
        amount: f64,
    },
    /// Refuel every fuel-using vehicle
    RefuelAll {
        #[arg(allow_negative_numbers = true)]
        amount: f64,
    },
    /// Service every vehicle that needs maintenance
    Maintain,
    /// List vehicles that need maintenance
    NeedsMaintenance,
    /// Print the fleet report
    Report {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Find vehicles by type (Car, Truck, Bus, Airplane, CargoShip) or
    /// category (land, air, water)
    Search { query: String },
    /// Sort the fleet by fuel efficiency, ascending
    Sort,
    /// Write the fleet to another file
    Export { path: PathBuf },
    /// Replace the fleet with the contents of another file
    Import { path: PathBuf },
}

#[derive(Args)]
struct Identity {
    id: String,
    #[arg(long, default_value = "")]
    model: String,
    #[arg(long)]
    max_speed: f64,
}

#[derive(Args)]
struct Land {
    #[command(flatten)]
    identity: Identity,
    #[arg(long, default_value_t = 4)]
    wheels: u32,
}

#[derive(Subcommand)]
enum NewVehicle {
    Car(Land),
    Truck(Land),
    Bus(Land),
    Airplane {
        #[command(flatten)]
        identity: Identity,
        #[arg(long)]
        max_altitude: f64,
    },
    CargoShip {
        #[command(flatten)]
        identity: Identity,
        /// Sail-powered: moves without fuel
        #[arg(long)]
        sail: bool,
    },
}

/// Logs go to stderr so stdout carries only command output.
fn init_tracing(default_filter: &str) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.to_string()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = FleetConfig::load();
    init_tracing(&config.log_filter);

    let command = match cli.command {
        Commands::Config {
            data_file,
            log_filter,
        } => return configure(data_file, log_filter),
        Commands::Fleet(command) => command,
    };

    let data_file = cli.file.unwrap_or(config.data_file);
    let mut fleet = open_fleet(&data_file)?;

    if run(command, &mut fleet)? {
        fleet
            .save_to_file(&data_file)
            .with_context(|| format!("Failed to save fleet to {}", data_file.display()))?;
    }

    Ok(())
}

/// Print the stored config, writing any requested changes first.
fn configure(data_file: Option<PathBuf>, log_filter: Option<String>) -> anyhow::Result<()> {
    let path = config::config_path()?;
    let stored = if data_file.is_none() && log_filter.is_none() {
        FleetConfig::load_from(&path)?
    } else {
        FleetConfig::update(&path, |config| {
            if let Some(data_file) = data_file {
                config.data_file = data_file;
            }
            if let Some(log_filter) = log_filter {
                config.log_filter = log_filter;
            }
        })?
    };

    println!("Config file: {}", path.display());
    println!("{}", serde_json::to_string_pretty(&stored)?);
    Ok(())
}

/// An absent data file is an empty fleet.
fn open_fleet(path: &Path) -> anyhow::Result<FleetManager> {
    let mut fleet = FleetManager::new();
    if path.exists() {
        let summary = fleet
            .load_from_file(path)
            .with_context(|| format!("Failed to load fleet from {}", path.display()))?;
        for skipped in &summary.skipped {
            eprintln!("Skipped line {}: {}", skipped.line, skipped.reason);
        }
    }
    Ok(fleet)
}

/// Run one command. Returns whether the fleet changed and must be saved.
fn run(command: FleetCommand, fleet: &mut FleetManager) -> anyhow::Result<bool> {
    match command {
        FleetCommand::Demo => {
            *fleet = demo_fleet()?;
            let journeys = fleet.start_all_journeys(100.0);
            print!("{}", render::journey_lines(&journeys));
            println!();
            print!("{}", fleet.generate_report());
            Ok(true)
        }
        FleetCommand::Add { vehicle } => {
            let id = add_vehicle(fleet, vehicle)?;
            println!("Added {}", id);
            Ok(true)
        }
        FleetCommand::Remove { id } => {
            let removed = fleet.remove_vehicle(&id)?;
            println!("Removed {} ({})", removed.id(), removed.kind().as_str());
            Ok(true)
        }
        FleetCommand::List => {
            if fleet.is_empty() {
                println!("Fleet is empty.");
            }
            for vehicle in fleet.vehicles() {
                print!("{}", render::vehicle_info(vehicle));
            }
            Ok(false)
        }
        FleetCommand::Journey { distance } => {
            let journeys = fleet.start_all_journeys(distance);
            print!("{}", render::journey_lines(&journeys));
            println!(
                "{} of {} vehicles completed, {:.2} fuel used",
                journeys.completed().count(),
                journeys.results.len(),
                journeys.total_fuel_used()
            );
            let moved = journeys.completed().next().is_some();
            Ok(moved)
        }
        FleetCommand::Consume { distance } => {
            let consumption = fleet.total_fuel_consumption(distance);
            for failure in &consumption.failures {
                println!("{}: {}", failure.vehicle_id, failure.error);
            }
            println!("Total fuel consumed: {:.2}", consumption.total);
            Ok(consumption.total > 0.0)
        }
        FleetCommand::Refuel { id, amount } => {
            let level = fleet.refuel_vehicle(&id, amount)?;
            println!("{} fuel level: {:.2}", id, level);
            Ok(true)
        }
        FleetCommand::RefuelAll { amount } => {
            let summary = fleet.refuel_all(amount);
            for failure in &summary.failures {
                println!("{}: {}", failure.vehicle_id, failure.error);
            }
            println!("Refueled {} vehicles", summary.refueled.len());
            Ok(!summary.refueled.is_empty())
        }
        FleetCommand::Maintain => {
            let serviced = fleet.maintain_all();
            if serviced.is_empty() {
                println!("No vehicles needed maintenance.");
            } else {
                println!("Serviced: {}", serviced.join(", "));
            }
            Ok(!serviced.is_empty())
        }
        FleetCommand::NeedsMaintenance => {
            for vehicle in fleet.vehicles_needing_maintenance() {
                println!(
                    "{} ({}), {:.1} km",
                    vehicle.id(),
                    vehicle.kind().as_str(),
                    vehicle.current_mileage()
                );
            }
            Ok(false)
        }
        FleetCommand::Report { json } => {
            let report = fleet.generate_report();
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report);
            }
            Ok(false)
        }
        FleetCommand::Search { query } => {
            let found = match VehicleCategory::from_str(&query.to_lowercase()) {
                Some(category) => fleet.search_by_category(category),
                None => fleet.search_by_type_name(&query)?,
            };
            if found.is_empty() {
                println!("No vehicles found.");
            }
            for vehicle in found {
                print!("{}", render::vehicle_info(vehicle));
            }
            Ok(false)
        }
        FleetCommand::Sort => {
            fleet.sort_fleet_by_efficiency();
            for vehicle in fleet.vehicles() {
                println!("{}: {:.2} km/l", vehicle.id(), vehicle.fuel_efficiency());
            }
            Ok(true)
        }
        FleetCommand::Export { path } => {
            fleet
                .save_to_file(&path)
                .with_context(|| format!("Failed to export fleet to {}", path.display()))?;
            println!("Exported {} vehicles to {}", fleet.len(), path.display());
            Ok(false)
        }
        FleetCommand::Import { path } => {
            let summary = fleet
                .load_from_file(&path)
                .with_context(|| format!("Failed to import fleet from {}", path.display()))?;
            for skipped in &summary.skipped {
                eprintln!("Skipped line {}: {}", skipped.line, skipped.reason);
            }
            println!("Imported {} vehicles", summary.loaded);
            Ok(true)
        }
    }
}

fn add_vehicle(fleet: &mut FleetManager, vehicle: NewVehicle) -> Result<String, FleetError> {
    let id = match vehicle {
        NewVehicle::Car(land) => {
            let Identity { id, model, max_speed } = land.identity;
            fleet.add_vehicle(Car::new(id.clone(), model, max_speed, land.wheels)?)?;
            id
        }
        NewVehicle::Truck(land) => {
            let Identity { id, model, max_speed } = land.identity;
            fleet.add_vehicle(Truck::new(id.clone(), model, max_speed, land.wheels)?)?;
            id
        }
        NewVehicle::Bus(land) => {
            let Identity { id, model, max_speed } = land.identity;
            fleet.add_vehicle(Bus::new(id.clone(), model, max_speed, land.wheels)?)?;
            id
        }
        NewVehicle::Airplane {
            identity,
            max_altitude,
        } => {
            let Identity { id, model, max_speed } = identity;
            fleet.add_vehicle(Airplane::new(id.clone(), model, max_speed, max_altitude)?)?;
            id
        }
        NewVehicle::CargoShip { identity, sail } => {
            let Identity { id, model, max_speed } = identity;
            fleet.add_vehicle(CargoShip::new(id.clone(), model, max_speed, sail)?)?;
            id
        }
    };
    Ok(id)
}

/// One vehicle of each variant, fuelled and partly loaded.
fn demo_fleet() -> Result<FleetManager, FleetError> {
    let mut fleet = FleetManager::new();

    let mut car = Car::new("C001", "Toyota", 120.0, 4)?;
    car.refuel(50.0)?;
    car.board_passengers(2)?;
    fleet.add_vehicle(car)?;

    let mut truck = Truck::new("T001", "Volvo", 100.0, 6)?;
    truck.refuel(200.0)?;
    truck.load_cargo(2000.0)?;
    fleet.add_vehicle(truck)?;

    let mut bus = Bus::new("B001", "Mercedes", 90.0, 6)?;
    bus.refuel(300.0)?;
    bus.board_passengers(20)?;
    bus.load_cargo(200.0)?;
    fleet.add_vehicle(bus)?;

    let mut plane = Airplane::new("A001", "Boeing", 850.0, 10_000.0)?;
    plane.refuel(1000.0)?;
    plane.board_passengers(150)?;
    plane.load_cargo(2000.0)?;
    fleet.add_vehicle(plane)?;

    let mut ship = CargoShip::new("S001", "Maersk", 50.0, false)?;
    ship.refuel(500.0)?;
    ship.load_cargo(10_000.0)?;
    fleet.add_vehicle(ship)?;

    Ok(fleet)
}
