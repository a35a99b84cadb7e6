/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */
#![allow(unused)]

use uom::si::f64::Length;
use uom::si::length::meter;

use transit_common::datetime;
use transit_common::geo::GeoPoint;
use transit_track::entities::{Stop, VehicleKind};
use transit_track::eta::{estimate, eta_minutes, INDETERMINATE_ETA_MINUTES};
use transit_track::report::{Direction, TripStatus, VehicleStatus};
use transit_track::vehicles::Vehicle;

fn stop (id: &str, lon: f64, lat: f64)->Stop {
    Stop {
        id: id.to_string(),
        name: id.to_string(),
        location: GeoPoint::from_lon_lat_degrees( lon, lat),
        address: "1 Test St".to_string(),
        city: "Testville".to_string(),
        facilities: Vec::new(),
        is_active: true,
        routes: Vec::new(),
    }
}

fn vehicle (lon: f64, lat: f64, speed: f64)->Vehicle {
    Vehicle {
        id: "v1".to_string(),
        vehicle_number: "BUS-001".to_string(),
        kind: VehicleKind::Bus,
        route: "r1".to_string(),
        capacity: 40,
        location: GeoPoint::from_lon_lat_degrees( lon, lat),
        speed,
        heading: 0.0,
        occupancy: 0,
        status: VehicleStatus::Active,
        current_stop: None,
        next_stop: None,
        direction: Direction::Forward,
        last_updated: datetime::utc_now(),
    }
}

#[test]
fn test_eta_minutes () {
    // 1km at 60km/h is one minute
    let m = eta_minutes( Length::new::<meter>(1000.0), 60.0);
    assert!( (m - 1.0).abs() < 1e-9);

    // 2km at 30km/h is four minutes
    let m = eta_minutes( Length::new::<meter>(2000.0), 30.0);
    assert!( (m - 4.0).abs() < 1e-9);
}

#[test]
fn test_zero_speed_is_indeterminate_not_an_error () {
    let m = eta_minutes( Length::new::<meter>(5000.0), 0.0);
    assert_eq!( m, INDETERMINATE_ETA_MINUTES);

    // and a zero distance at zero speed as well
    let m = eta_minutes( Length::new::<meter>(0.0), 0.0);
    assert_eq!( m, INDETERMINATE_ETA_MINUTES);
}

#[test]
fn test_estimate_follows_target_order () {
    let v = vehicle( -74.0, 40.70, 30.0);
    let now = datetime::utc_now();

    // targets deliberately not sorted by distance
    let targets = vec![
        (stop( "far", -74.0, 40.72), 7),
        (stop( "near", -74.0, 40.701), 3),
    ];

    let etas = estimate( &v, &targets, now);
    assert_eq!( etas.len(), 2);
    assert_eq!( etas[0].stop_id, "far");
    assert_eq!( etas[1].stop_id, "near");
    assert!( etas[0].distance > etas[1].distance);
    assert!( etas[0].eta_minutes > etas[1].eta_minutes);
    assert_eq!( etas[0].stop_sequence, 7);

    // arrival instant is now + eta
    let dt = (etas[1].estimated_arrival - now).num_seconds() as f64;
    assert!( (dt - etas[1].eta_minutes * 60.0).abs() < 1.0);
}
