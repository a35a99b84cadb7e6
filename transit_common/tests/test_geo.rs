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

use uom::si::length::meter;
use transit_common::angle::*;
use transit_common::geo::*;

// run with "cargo test -p transit_common -- --nocapture"

#[test]
fn test_haversine_distance () {
    let p = GeoPoint::from_lon_lat_degrees( 0.0, 0.0);
    let q = GeoPoint::from_lon_lat_degrees( 0.0, 0.001); // ~111m north

    assert_eq!( p.haversine_distance(&p).get::<meter>(), 0.0);

    let d = p.haversine_distance(&q).get::<meter>();
    println!("distance over 0.001 deg latitude: {d}m");
    assert!( (d - 111.19).abs() < 0.1);

    // symmetric
    let d1 = q.haversine_distance(&p).get::<meter>();
    assert!( (d - d1).abs() < 1e-9);
}

#[test]
fn test_bearing () {
    let p = GeoPoint::from_lon_lat_degrees( -122.0, 37.0);
    let north = GeoPoint::from_lon_lat_degrees( -122.0, 37.1);
    let east = GeoPoint::from_lon_lat_degrees( -121.9, 37.0);

    let b = p.bearing_to( &north).degrees();
    println!("bearing north: {b}");
    assert!( b.abs() < 0.01 || (b - 360.0).abs() < 0.01);

    let b = p.bearing_to( &east).degrees();
    println!("bearing east: {b}");
    assert!( (b - 90.0).abs() < 0.1);
}

#[test]
fn test_range_check () {
    assert!( GeoPoint::try_from_lon_lat_degrees( -74.0059, 40.7128).is_some());
    assert!( GeoPoint::try_from_lon_lat_degrees( 180.0, 90.0).is_some());
    assert!( GeoPoint::try_from_lon_lat_degrees( 180.1, 0.0).is_none());
    assert!( GeoPoint::try_from_lon_lat_degrees( 0.0, -90.01).is_none());
    assert!( GeoPoint::try_from_lon_lat_degrees( f64::NAN, 0.0).is_none());
    assert!( GeoPoint::try_from_lon_lat_degrees( f64::INFINITY, 0.0).is_none());
}

#[test]
fn test_serde () {
    let p = GeoPoint::from_lon_lat_degrees( -74.0059, 40.7128);

    let json = serde_json::to_string(&p).unwrap();
    println!("serialized GeoPoint: {json}");
    assert_eq!( json, "[-74.0059,40.7128]");

    let p1: GeoPoint = serde_json::from_str(&json).unwrap();
    assert_eq!( p, p1);

    // out of range input is rejected, not normalized
    assert!( serde_json::from_str::<GeoPoint>("[200.0,10.0]").is_err());
    assert!( serde_json::from_str::<GeoPoint>("[10.0]").is_err());
    assert!( serde_json::from_str::<GeoPoint>("[10.0,10.0,10.0]").is_err());
}

#[test]
fn test_angle_normalization () {
    assert_eq!( Longitude::from_degrees( 200.0).degrees(), -160.0);
    assert_eq!( Latitude::from_degrees( 100.0).degrees(), 80.0);
    assert_eq!( Angle360::from_degrees( -90.0).degrees(), 270.0);
    assert_eq!( Angle360::from_degrees( 360.0).degrees(), 0.0);
}
