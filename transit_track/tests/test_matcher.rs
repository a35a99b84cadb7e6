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

use transit_common::geo::GeoPoint;
use transit_track::entities::Stop;
use transit_track::matcher::nearest_stop;

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

#[test]
fn test_closest_candidate_wins () {
    let p = GeoPoint::from_lon_lat_degrees( -74.0, 40.70);
    let candidates = vec![
        (stop("far", -74.0, 40.7008), 1),   // ~89m
        (stop("near", -74.0, 40.7004), 2),  // ~44m
    ];

    let m = nearest_stop( &p, &candidates, Length::new::<meter>(100.0)).expect("no match");
    assert_eq!( m.stop.id, "near");
    assert_eq!( m.sequence, 2);
}

#[test]
fn test_threshold_is_inclusive () {
    let p = GeoPoint::from_lon_lat_degrees( -74.0, 40.70);
    let s = stop("a", -74.0, 40.7008);
    let d = p.haversine_distance( &s.location);
    println!("candidate distance: {}m", d.get::<meter>());

    let candidates = vec![ (s, 1)];

    // a stop at exactly the threshold distance matches
    assert!( nearest_stop( &p, &candidates, d).is_some());

    // a hair below the distance does not
    let below = Length::new::<meter>( d.get::<meter>() - 0.01);
    assert!( nearest_stop( &p, &candidates, below).is_none());
}

#[test]
fn test_equidistant_tie_breaks_to_earlier_sequence () {
    // point halfway between two stops on the same meridian - both 50m-ish away
    let p = GeoPoint::from_lon_lat_degrees( -74.0, 40.7005);
    let candidates = vec![
        (stop("s2", -74.0, 40.7010), 2),
        (stop("s5", -74.0, 40.7000), 5),
    ];

    let m = nearest_stop( &p, &candidates, Length::new::<meter>(100.0)).expect("no match");
    assert_eq!( m.stop.id, "s2");
    assert_eq!( m.sequence, 2);
}

#[test]
fn test_out_of_range_and_empty () {
    let p = GeoPoint::from_lon_lat_degrees( -74.0, 40.70);
    let candidates = vec![ (stop("a", -74.0, 40.71), 1)]; // ~1.1km

    assert!( nearest_stop( &p, &candidates, Length::new::<meter>(100.0)).is_none());
    assert!( nearest_stop( &p, &[], Length::new::<meter>(100.0)).is_none());
}
