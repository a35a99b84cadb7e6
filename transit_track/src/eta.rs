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

/// straight-line arrival estimates of a vehicle against stops of its route.
/// Pure functions - no store access, no mutation

use chrono::{DateTime, Utc};
use serde::Serialize;
use uom::si::f64::Length;
use uom::si::length::{kilometer, meter};

use transit_common::datetime::minutes_f64;
use crate::entities::{Stop, StopId, VehicleId};
use crate::vehicles::Vehicle;

/// ETA sentinel for a vehicle that is not moving - "not arriving at the current
/// rate", deliberately not an error
pub const INDETERMINATE_ETA_MINUTES: f64 = 999.0;

#[derive(Debug,Clone,Serialize)]
#[serde(rename_all="camelCase")]
pub struct EtaEntry {
    pub vehicle_id: VehicleId,
    pub vehicle_number: String,
    pub stop_id: StopId,
    pub stop_sequence: u32,
    pub distance: f64, // meters
    pub eta_minutes: f64,
    pub estimated_arrival: DateTime<Utc>,
    pub speed: f64, // km/h
}

impl EtaEntry {
    pub fn is_indeterminate (&self)->bool {
        self.eta_minutes >= INDETERMINATE_ETA_MINUTES
    }
}

/// minutes to cover `distance` at `speed_kmh`, the indeterminate sentinel for a
/// standing vehicle (no division by zero)
pub fn eta_minutes (distance: Length, speed_kmh: f64)->f64 {
    if speed_kmh <= 0.0 {
        INDETERMINATE_ETA_MINUTES
    } else {
        distance.get::<kilometer>() / (speed_kmh / 60.0)
    }
}

/// estimates of one vehicle against the given target stops, in target order -
/// callers that need nearest-first have to sort explicitly
pub fn estimate (vehicle: &Vehicle, targets: &[(Stop,u32)], now: DateTime<Utc>)->Vec<EtaEntry> {
    targets.iter().map( |(stop,sequence)| {
        let distance = vehicle.location.haversine_distance( &stop.location);
        let minutes = eta_minutes( distance, vehicle.speed);

        EtaEntry {
            vehicle_id: vehicle.id.clone(),
            vehicle_number: vehicle.vehicle_number.clone(),
            stop_id: stop.id.clone(),
            stop_sequence: *sequence,
            distance: distance.get::<meter>(),
            eta_minutes: minutes,
            estimated_arrival: now + minutes_f64( minutes),
            speed: vehicle.speed,
        }
    }).collect()
}
