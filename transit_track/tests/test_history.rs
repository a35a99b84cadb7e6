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

use chrono::{DateTime, Utc};

use transit_common::datetime::{self, days, hours};
use transit_common::geo::GeoPoint;
use transit_track::history::{HistoryStore, TrackingRecord};
use transit_track::report::TripStatus;

fn record (vehicle: &str, timestamp: DateTime<Utc>, speed: f64)->TrackingRecord {
    TrackingRecord {
        vehicle: vehicle.to_string(),
        route: "r1".to_string(),
        location: GeoPoint::from_lon_lat_degrees( -74.0, 40.7),
        speed,
        heading: 0.0,
        accuracy: 10.0,
        occupancy: 0,
        status: TripStatus::Moving,
        stop: None,
        distance_from_stop: 0.0,
        timestamp,
        estimated_arrival: None,
    }
}

#[test]
fn test_query_is_descending_and_capped () {
    let store = HistoryStore::new( days(30), 1000);
    let now = datetime::utc_now();

    for i in 0..5 {
        store.append( record( "v1", now - hours(5 - i), i as f64));
    }

    let records = store.query( "v1", now - days(1), 100);
    assert_eq!( records.len(), 5);
    assert_eq!( records[0].speed, 4.0); // newest first
    assert_eq!( records[4].speed, 0.0);

    let records = store.query( "v1", now - days(1), 2);
    assert_eq!( records.len(), 2);
    assert_eq!( records[0].speed, 4.0);

    // time range narrows the result
    let records = store.query( "v1", now - hours(3) - datetime::secs(1), 100);
    assert_eq!( records.len(), 3);

    assert!( store.query( "unknown", now - days(1), 100).is_empty());
}

#[test]
fn test_retention_window_excludes_old_records () {
    let store = HistoryStore::new( days(30), 1000);
    let now = datetime::utc_now();

    store.append( record( "v1", now - days(31), 1.0)); // beyond retention
    store.append( record( "v1", now - days(2), 2.0));

    // even a wide-open query does not see past the retention window
    let records = store.query( "v1", now - days(365), 100);
    assert_eq!( records.len(), 1);
    assert_eq!( records[0].speed, 2.0);

    // and the purge reclaims the expired record
    assert_eq!( store.purge_expired(), 1);
    assert_eq!( store.query( "v1", now - days(365), 100).len(), 1);
}

#[test]
fn test_per_vehicle_ring_bound () {
    let store = HistoryStore::new( days(30), 3);
    let now = datetime::utc_now();

    for i in 0..5 {
        store.append( record( "v1", now - datetime::secs(10 - i), i as f64));
    }

    let records = store.query( "v1", now - days(1), 100);
    assert_eq!( records.len(), 3); // oldest two were dropped
    assert_eq!( records[0].speed, 4.0);
    assert_eq!( records[2].speed, 2.0);
}
