use fleet_manager::models::*;
use fleet_manager::FleetError;
use speculate2::speculate;

fn fuelled_car(fuel: f64) -> Car {
    let mut car = Car::new("C001", "Toyota", 120.0, 4).expect("Failed to create car");
    car.refuel(fuel).expect("Failed to refuel");
    car
}

fn one_of_each() -> Vec<Vehicle> {
    vec![
        Car::new("C1", "Toyota", 120.0, 4).unwrap().into(),
        Truck::new("T1", "Volvo", 100.0, 6).unwrap().into(),
        Bus::new("B1", "Mercedes", 90.0, 6).unwrap().into(),
        Airplane::new("A1", "Boeing", 850.0, 10_000.0).unwrap().into(),
        CargoShip::new("S1", "Maersk", 50.0, false).unwrap().into(),
    ]
}

speculate! {
    describe "construction" {
        it "defaults a blank model to Unknown" {
            let car = Car::new("C1", "  ", 100.0, 4).unwrap();
            assert_eq!(car.base().model(), "Unknown");
        }

        it "rejects an empty id" {
            let result = Truck::new("", "Volvo", 100.0, 6);
            assert!(matches!(result, Err(FleetError::InvalidOperation(_))));
        }

        it "rejects a negative max speed" {
            let result = Airplane::new("A1", "Boeing", -1.0, 10_000.0);
            assert!(matches!(result, Err(FleetError::InvalidOperation(_))));
        }

        it "starts every vehicle empty with zero mileage" {
            for vehicle in one_of_each() {
                assert_eq!(vehicle.current_mileage(), 0.0);
                assert_eq!(vehicle.as_fuel().map_or(0.0, |f| f.fuel_level()), 0.0);
                assert!(!vehicle.needs_maintenance());
            }
        }
    }

    describe "capabilities" {
        it "agrees with the capability table for every variant" {
            for vehicle in one_of_each() {
                let kind = vehicle.kind();
                assert_eq!(vehicle.as_fuel().is_some(), kind.has(Capability::Fuel));
                assert_eq!(vehicle.as_passengers().is_some(), kind.has(Capability::Passengers));
                assert_eq!(vehicle.as_cargo().is_some(), kind.has(Capability::Cargo));
                assert_eq!(vehicle.as_maintainable().is_some(), kind.has(Capability::Maintenance));
            }
        }

        it "gives cars passengers but no cargo" {
            let vehicle = Vehicle::from(Car::new("C1", "Toyota", 120.0, 4).unwrap());
            assert!(vehicle.as_passengers().is_some());
            assert!(vehicle.as_cargo().is_none());
        }

        it "gives trucks cargo but no passengers" {
            let vehicle = Vehicle::from(Truck::new("T1", "Volvo", 100.0, 6).unwrap());
            assert!(vehicle.as_cargo().is_some());
            assert!(vehicle.as_passengers().is_none());
        }

        it "places each variant in its category" {
            let categories: Vec<_> = one_of_each().iter().map(|v| v.category()).collect();
            assert_eq!(categories, vec![
                VehicleCategory::Land,
                VehicleCategory::Land,
                VehicleCategory::Land,
                VehicleCategory::Air,
                VehicleCategory::Water,
            ]);
        }
    }

    describe "moving" {
        it "burns distance over efficiency and adds mileage" {
            let mut car = fuelled_car(50.0);
            assert_eq!(car.fuel_level(), 50.0);

            let outcome = car.move_by(100.0).expect("Move failed");
            assert!((outcome.fuel_used - 100.0 / 15.0).abs() < 1e-9);
            assert!((car.fuel_level() - 43.333).abs() < 1e-3);
            assert_eq!(car.base().current_mileage(), 100.0);
            assert_eq!(outcome.narrative, Narrative::Driving);
        }

        it "rejects negative distances for every variant without side effects" {
            for mut vehicle in one_of_each() {
                if let Some(fuel) = vehicle.as_fuel_mut() {
                    fuel.refuel(100.0).unwrap();
                }
                let result = vehicle.move_by(-1.0);
                assert!(matches!(result, Err(FleetError::InvalidOperation(_))));
                assert_eq!(vehicle.current_mileage(), 0.0);
                assert_eq!(vehicle.as_fuel().unwrap().fuel_level(), 100.0);
            }
        }

        it "runs out of fuel atomically for every fuel-based variant" {
            for mut vehicle in one_of_each() {
                vehicle.as_fuel_mut().unwrap().refuel(30.0).unwrap();

                let mut error = None;
                for _ in 0..20 {
                    let fuel = vehicle.as_fuel().unwrap().fuel_level();
                    let mileage = vehicle.current_mileage();
                    if let Err(e) = vehicle.move_by(100.0) {
                        assert_eq!(vehicle.as_fuel().unwrap().fuel_level(), fuel);
                        assert_eq!(vehicle.current_mileage(), mileage);
                        error = Some(e);
                        break;
                    }
                }
                assert!(
                    matches!(error, Some(FleetError::InsufficientFuel(_))),
                    "{} never ran dry",
                    vehicle.id()
                );
            }
        }

        it "fails atomically when fuel runs short" {
            let mut car = fuelled_car(10.0);
            car.move_by(100.0).expect("First leg should succeed");
            let fuel = car.fuel_level();
            let mileage = car.base().current_mileage();

            let result = car.move_by(100.0);
            assert!(matches!(result, Err(FleetError::InsufficientFuel(_))));
            assert_eq!(car.fuel_level(), fuel);
            assert_eq!(car.base().current_mileage(), mileage);
        }

        it "allows a zero distance move" {
            let mut plane = Airplane::new("A1", "Boeing", 850.0, 10_000.0).unwrap();
            let outcome = plane.move_by(0.0).unwrap();
            assert_eq!(outcome.fuel_used, 0.0);
            assert_eq!(outcome.narrative, Narrative::Flying { altitude: 10_000.0 });
        }
    }

    describe "sail ships" {
        before {
            let mut ship = CargoShip::new("S001", "Maersk", 50.0, true).unwrap();
        }

        it "have zero efficiency" {
            assert_eq!(ship.fuel_efficiency(), 0.0);
        }

        it "move without fuel" {
            let outcome = ship.move_by(100.0).unwrap();
            assert_eq!(outcome.fuel_used, 0.0);
            assert_eq!(outcome.narrative, Narrative::Sailing { by_sail: true });
            assert_eq!(ship.base().current_mileage(), 100.0);
            assert_eq!(ship.fuel_level(), 0.0);
        }

        it "cannot be refuelled" {
            assert!(matches!(ship.refuel(10.0), Err(FleetError::InvalidOperation(_))));
        }

        it "cannot consume fuel" {
            assert!(matches!(ship.consume_fuel(10.0), Err(FleetError::InsufficientFuel(_))));
        }
    }

    describe "trucks" {
        it "lose efficiency when loaded past half capacity" {
            let mut truck = Truck::new("T1", "Volvo", 100.0, 6).unwrap();
            truck.load_cargo(2500.0).unwrap();
            assert_eq!(truck.fuel_efficiency(), 8.0);

            truck.load_cargo(1.0).unwrap();
            assert!((truck.fuel_efficiency() - 7.2).abs() < 1e-9);
        }
    }

    describe "loading" {
        it "refuses passengers beyond capacity and keeps the count" {
            let mut bus = Bus::new("B1", "Mercedes", 90.0, 6).unwrap();
            bus.board_passengers(45).unwrap();

            let result = bus.board_passengers(6);
            assert!(matches!(result, Err(FleetError::Overload(_))));
            assert_eq!(bus.current_passengers(), 45);

            bus.board_passengers(5).unwrap();
            assert_eq!(bus.current_passengers(), Bus::PASSENGER_CAPACITY);
        }

        it "refuses cargo beyond capacity and keeps the weight" {
            let mut ship = CargoShip::new("S1", "Maersk", 50.0, false).unwrap();
            ship.load_cargo(49_000.0).unwrap();

            let result = ship.load_cargo(1_001.0);
            assert!(matches!(result, Err(FleetError::Overload(_))));
            assert_eq!(ship.current_cargo(), 49_000.0);
        }

        it "caps passengers at capacity for every variant" {
            for mut vehicle in one_of_each() {
                let Some(cabin) = vehicle.as_passengers_mut() else {
                    continue;
                };
                let capacity = cabin.passenger_capacity();
                cabin.board_passengers(capacity).unwrap();

                let result = cabin.board_passengers(1);
                assert!(matches!(result, Err(FleetError::Overload(_))));
                assert_eq!(cabin.current_passengers(), capacity);
            }
        }

        it "caps cargo at capacity for every variant" {
            for mut vehicle in one_of_each() {
                let Some(hold) = vehicle.as_cargo_mut() else {
                    continue;
                };
                let capacity = hold.cargo_capacity();
                hold.load_cargo(capacity).unwrap();

                let result = hold.load_cargo(1.0);
                assert!(matches!(result, Err(FleetError::Overload(_))));
                assert_eq!(hold.current_cargo(), capacity);
            }
        }

        it "declares the fixed capacities" {
            let passengers: Vec<_> = one_of_each()
                .iter()
                .map(|v| v.as_passengers().map(|p| p.passenger_capacity()))
                .collect();
            assert_eq!(passengers, vec![Some(5), None, Some(50), Some(200), None]);

            let cargo: Vec<_> = one_of_each()
                .iter()
                .map(|v| v.as_cargo().map(|c| c.cargo_capacity()))
                .collect();
            assert_eq!(cargo, vec![None, Some(5000.0), Some(500.0), Some(10_000.0), Some(50_000.0)]);
        }

        it "refuses to unload more than is carried" {
            let mut car = Car::new("C1", "Toyota", 120.0, 4).unwrap();
            car.board_passengers(2).unwrap();
            assert!(matches!(car.disembark_passengers(3), Err(FleetError::InvalidOperation(_))));
            assert_eq!(car.current_passengers(), 2);
        }
    }

    describe "maintenance" {
        it "is due once mileage passes the threshold" {
            let mut car = fuelled_car(1_000.0);
            car.move_by(10_000.0).unwrap();
            assert!(!car.needs_maintenance());

            car.move_by(1.0).unwrap();
            assert!(car.needs_maintenance());
        }

        it "is due when scheduled and cleared once performed" {
            let mut plane = Airplane::new("A1", "Boeing", 850.0, 10_000.0).unwrap();
            plane.schedule_maintenance();
            assert!(plane.needs_maintenance());

            plane.perform_maintenance();
            assert!(!plane.needs_maintenance());
        }
    }

    describe "journey time" {
        it "scales by category" {
            let car = Vehicle::from(Car::new("C1", "Toyota", 100.0, 4).unwrap());
            let plane = Vehicle::from(Airplane::new("A1", "Boeing", 100.0, 10_000.0).unwrap());
            let ship = Vehicle::from(CargoShip::new("S1", "Maersk", 100.0, false).unwrap());

            assert!((car.estimate_journey_time(200.0) - 2.2).abs() < 1e-9);
            assert!((plane.estimate_journey_time(200.0) - 1.9).abs() < 1e-9);
            assert!((ship.estimate_journey_time(200.0) - 2.0).abs() < 1e-9);
        }
    }
}
