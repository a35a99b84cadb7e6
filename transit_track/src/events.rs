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

/// the typed broadcast vocabulary of the tracking core: topics observers can
/// subscribe to and the events published into them. The tracking side only ever
/// enqueues these - fan-out to the observer channels is the subscriber
/// registry's business (message passing, no shared mutable state)

use std::fmt;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entities::{RouteId, Stop, StopId, VehicleId};
use crate::report::VehicleStatus;
use crate::vehicles::Vehicle;

/// a named broadcast channel. The string forms `route:<id>`, `stop:<id>` and
/// `vehicle:<id>` appear in logs and the subscription surface
#[derive(Debug,Clone,PartialEq,Eq,Hash)]
pub enum Topic {
    Route(RouteId),
    Stop(StopId),
    Vehicle(VehicleId),
}

impl fmt::Display for Topic {
    fn fmt (&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Topic::Route(id) => write!(f, "route:{}", id),
            Topic::Stop(id) => write!(f, "stop:{}", id),
            Topic::Vehicle(id) => write!(f, "vehicle:{}", id),
        }
    }
}

/// payload of a `vehicle-arrival` event
#[derive(Debug,Clone,Serialize)]
#[serde(rename_all="camelCase")]
pub struct ArrivalNotice {
    pub vehicle: Vehicle,
    pub stop: Stop,
    pub distance: f64, // meters from the stop
}

/// payload of a `vehicle-status-update` event
#[derive(Debug,Clone,Serialize)]
#[serde(rename_all="camelCase")]
pub struct StatusNotice {
    pub id: VehicleId,
    pub vehicle_number: String,
    pub status: VehicleStatus,
    pub last_updated: DateTime<Utc>,
}

/// payload of a `vehicle-occupancy-update` event
#[derive(Debug,Clone,Serialize)]
#[serde(rename_all="camelCase")]
pub struct OccupancyNotice {
    pub id: VehicleId,
    pub vehicle_number: String,
    pub occupancy: u32,
    pub capacity: u32,
    pub last_updated: DateTime<Utc>,
}

/// an event emitted by the tracking core, addressed to a single topic
#[derive(Debug,Clone)]
pub enum TrackEvent {
    /// a vehicle moved - to the route topic
    LocationUpdate { route: RouteId, vehicle: Vehicle },

    /// acknowledgment style per-vehicle update - to the vehicle topic
    LocationAck { vehicle_id: VehicleId, vehicle: Vehicle },

    /// a report matched a stop the vehicle was not at before - to the stop topic
    Arrival { stop_id: StopId, notice: ArrivalNotice },

    /// operating status changed - to the route topic
    StatusUpdate { route: RouteId, notice: StatusNotice },

    /// occupancy changed - to the route topic
    OccupancyUpdate { route: RouteId, notice: OccupancyNotice },
}

impl TrackEvent {
    pub fn topic (&self)->Topic {
        match self {
            TrackEvent::LocationUpdate { route, .. } => Topic::Route( route.clone()),
            TrackEvent::LocationAck { vehicle_id, .. } => Topic::Vehicle( vehicle_id.clone()),
            TrackEvent::Arrival { stop_id, .. } => Topic::Stop( stop_id.clone()),
            TrackEvent::StatusUpdate { route, .. } => Topic::Route( route.clone()),
            TrackEvent::OccupancyUpdate { route, .. } => Topic::Route( route.clone()),
        }
    }

    /// the event name on the observer wire
    pub fn event_name (&self)->&'static str {
        match self {
            TrackEvent::LocationUpdate {..} => "vehicle-location-update",
            TrackEvent::LocationAck {..} => "location-updated",
            TrackEvent::Arrival {..} => "vehicle-arrival",
            TrackEvent::StatusUpdate {..} => "vehicle-status-update",
            TrackEvent::OccupancyUpdate {..} => "vehicle-occupancy-update",
        }
    }

    /// the payload to serialize for observers
    pub fn payload_json (&self)->serde_json::Result<serde_json::Value> {
        match self {
            TrackEvent::LocationUpdate { vehicle, .. } => serde_json::to_value( vehicle),
            TrackEvent::LocationAck { vehicle, .. } => serde_json::to_value( vehicle),
            TrackEvent::Arrival { notice, .. } => serde_json::to_value( notice),
            TrackEvent::StatusUpdate { notice, .. } => serde_json::to_value( notice),
            TrackEvent::OccupancyUpdate { notice, .. } => serde_json::to_value( notice),
        }
    }
}
