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

/// the live vehicle state store. There is exactly one authoritative live record
/// per vehicle, mutated only through accepted reports. Per-vehicle mutual
/// exclusion comes from the DashMap entry guard - mutations for different
/// vehicles proceed in parallel, there is no store wide lock.
/// None of the store methods suspends: callers resolve entity lookups before,
/// and the commit hooks passed into the mutators only enqueue - history and
/// observer I/O drain elsewhere, on cloned snapshots.

use std::fmt;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;
use uom::si::f64::Length;
use uom::si::length::meter;

use transit_common::geo::GeoPoint;
use crate::entities::{RouteId, StopId, VehicleId, VehicleKind, VehicleRecord};
use crate::matcher::StopMatch;
use crate::report::{Direction, LocationReport, VehicleStatus};

/// the current materialized state of one vehicle. Clones of this are what gets
/// acknowledged, recorded and broadcast ("snapshots")
#[derive(Debug,Clone,Serialize)]
#[serde(rename_all="camelCase")]
pub struct Vehicle {
    pub id: VehicleId,
    pub vehicle_number: String,
    pub kind: VehicleKind,
    pub route: RouteId,
    pub capacity: u32,
    pub location: GeoPoint,
    pub speed: f64,   // km/h
    pub heading: f64, // degrees clockwise from north
    pub occupancy: u32,
    pub status: VehicleStatus,
    pub current_stop: Option<StopId>,
    pub next_stop: Option<StopId>,
    pub direction: Direction,
    pub last_updated: DateTime<Utc>,
}

impl Vehicle {
    fn from_record (rec: &VehicleRecord)->Self {
        Vehicle {
            id: rec.id.clone(),
            vehicle_number: rec.vehicle_number.clone(),
            kind: rec.kind,
            route: rec.route.clone(),
            capacity: rec.capacity,
            location: GeoPoint::from_lon_lat_degrees( 0.0, 0.0),
            speed: 0.0,
            heading: 0.0,
            occupancy: 0,
            status: rec.status,
            current_stop: None,
            next_stop: None,
            direction: rec.direction,
            last_updated: DateTime::<Utc>::UNIX_EPOCH, // any first report passes the stale guard
        }
    }
}

impl fmt::Display for Vehicle {
    fn fmt (&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "Vehicle( id: {}, route: {}, pos: {}, spd: {:.1}, hdg: {:.0}, occ: {}/{}, status: {}",
                self.id, self.route, self.location, self.speed, self.heading, self.occupancy, self.capacity, self.status);
        if let Some(stop) = &self.current_stop { write!( f, ", stop: {}", stop); }
        write!( f, ", time: {})", self.last_updated)
    }
}

/// a vehicle snapshot together with its distance from a query point
#[derive(Debug,Clone,Serialize)]
#[serde(rename_all="camelCase")]
pub struct NearbyVehicle {
    #[serde(flatten)]
    pub vehicle: Vehicle,
    pub distance: f64, // meters
}

/// how a location report affected the live state
#[derive(Debug)]
pub enum ReportOutcome {
    /// state transition happened; `arrival` is set if the matched stop differs
    /// from the previously recorded one
    Applied { snapshot: Vehicle, arrival: Option<StopMatch> },

    /// report was older than the recorded state and left it untouched
    Stale { snapshot: Vehicle },
}

pub struct VehicleStore {
    vehicles: DashMap<VehicleId,Vehicle>,
}

impl VehicleStore {
    pub fn new ()->Self {
        VehicleStore { vehicles: DashMap::new() }
    }

    /// apply a validated location report as one atomic state transition.
    /// Reports older than the recorded state are not applied (stale guard) -
    /// the caller gets the unchanged snapshot back, `on_commit` never runs.
    /// A matched stop is sticky: it replaces the previous one but moving out of
    /// match range clears nothing.
    /// `on_commit` runs while the entry guard is still held, which makes
    /// mutate-then-enqueue atomic per vehicle - it must only enqueue, never block
    pub fn apply_report<F> (&self, rec: &VehicleRecord, position: GeoPoint, timestamp: DateTime<Utc>,
                            report: &LocationReport, matched: &Option<StopMatch>, next_stop: Option<StopId>,
                            on_commit: F)->ReportOutcome
        where F: FnOnce(&Vehicle, Option<&StopMatch>)
    {
        let mut entry = self.vehicles.entry( rec.id.clone()).or_insert_with( || Vehicle::from_record(rec));
        let v = entry.value_mut();

        if timestamp < v.last_updated {
            return ReportOutcome::Stale { snapshot: v.clone() };
        }

        let arrival = match matched {
            Some(m) if v.current_stop.as_deref() != Some( m.stop.id.as_str()) => Some( m.clone()),
            _ => None,
        };

        v.location = position;
        v.speed = report.speed;
        v.heading = report.heading;
        v.occupancy = report.occupancy;
        v.last_updated = timestamp;
        if let Some(m) = matched {
            v.current_stop = Some( m.stop.id.clone());
            v.next_stop = next_stop;
        }

        on_commit( v, arrival.as_ref());
        ReportOutcome::Applied { snapshot: v.clone(), arrival }
    }

    /// set the operating status, creating the live record if this vehicle never reported.
    /// `on_commit` runs under the entry guard, same rules as in [`Self::apply_report`]
    pub fn set_status<F> (&self, rec: &VehicleRecord, status: VehicleStatus, timestamp: DateTime<Utc>, on_commit: F)->Vehicle
        where F: FnOnce(&Vehicle)
    {
        let mut entry = self.vehicles.entry( rec.id.clone()).or_insert_with( || Vehicle::from_record(rec));
        let v = entry.value_mut();
        v.status = status;
        v.last_updated = timestamp;
        on_commit( v);
        v.clone()
    }

    /// set the occupancy - bounds against capacity are the caller's responsibility.
    /// `on_commit` runs under the entry guard, same rules as in [`Self::apply_report`]
    pub fn set_occupancy<F> (&self, rec: &VehicleRecord, occupancy: u32, timestamp: DateTime<Utc>, on_commit: F)->Vehicle
        where F: FnOnce(&Vehicle)
    {
        let mut entry = self.vehicles.entry( rec.id.clone()).or_insert_with( || Vehicle::from_record(rec));
        let v = entry.value_mut();
        v.occupancy = occupancy;
        v.last_updated = timestamp;
        on_commit( v);
        v.clone()
    }

    pub fn snapshot (&self, id: &str)->Option<Vehicle> {
        self.vehicles.get(id).map( |e| e.value().clone())
    }

    /// snapshots of all vehicles with operating status `active`, optionally
    /// restricted to one route
    pub fn active_vehicles (&self, route: Option<&str>, limit: usize)->Vec<Vehicle> {
        let mut result = Vec::new();
        for e in self.vehicles.iter() {
            if result.len() >= limit { break }
            let v = e.value();
            if v.status != VehicleStatus::Active { continue }
            if let Some(route) = route {
                if v.route != route { continue }
            }
            result.push( v.clone());
        }
        result
    }

    /// active vehicles within `radius` of `position`, closest first
    pub fn nearby (&self, position: &GeoPoint, radius: Length, limit: usize)->Vec<NearbyVehicle> {
        let mut result = Vec::new();
        for e in self.vehicles.iter() {
            let v = e.value();
            if v.status != VehicleStatus::Active { continue }
            let d = position.haversine_distance( &v.location);
            if d <= radius {
                result.push( NearbyVehicle { vehicle: v.clone(), distance: d.get::<meter>() });
            }
        }
        result.sort_by( |a,b| a.distance.total_cmp( &b.distance));
        result.truncate( limit);
        result
    }
}
