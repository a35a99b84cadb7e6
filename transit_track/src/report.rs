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

/// the inbound report payloads of the tracking core - one observation of a single
/// vehicle at a single instant, plus the smaller status/occupancy mutations.
/// All bounds validation happens here so that downstream components only ever see
/// range-valid values

use std::fmt;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use transit_common::{datetime::{self, EpochMillis}, geo::GeoPoint};
use crate::entities::VehicleId;
use crate::errors::{invalid_input, Result, TransitTrackError};

/// movement state reported by the vehicle, recorded with each history entry
#[derive(Debug,Clone,Copy,PartialEq,Eq,Default,Serialize,Deserialize)]
#[serde(rename_all="lowercase")]
pub enum TripStatus {
    #[default]
    Moving,
    Stopped,
    Boarding,
    Alighting,
}

/// operating status of a vehicle (part of the live state)
#[derive(Debug,Clone,Copy,PartialEq,Eq,Default,Serialize,Deserialize)]
#[serde(rename_all="lowercase")]
pub enum VehicleStatus {
    Active,
    #[default]
    Inactive,
    Maintenance,
    Offline,
}

impl fmt::Display for VehicleStatus {
    fn fmt (&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VehicleStatus::Active => write!(f, "active"),
            VehicleStatus::Inactive => write!(f, "inactive"),
            VehicleStatus::Maintenance => write!(f, "maintenance"),
            VehicleStatus::Offline => write!(f, "offline"),
        }
    }
}

#[derive(Debug,Clone,Copy,PartialEq,Eq,Default,Serialize,Deserialize)]
#[serde(rename_all="lowercase")]
pub enum Direction {
    #[default]
    Forward,
    Reverse,
}

fn default_accuracy ()->f64 { 10.0 }

/// a single location/speed/heading/occupancy observation for one vehicle.
/// Coordinates are [longitude,latitude] degrees, speed is km/h, heading degrees
/// clockwise from north, accuracy meters. A missing timestamp means "now"
#[derive(Debug,Clone,Serialize,Deserialize)]
#[serde(rename_all="camelCase")]
pub struct LocationReport {
    pub vehicle_id: VehicleId,
    pub coordinates: [f64;2],
    #[serde(default)]
    pub speed: f64,
    #[serde(default)]
    pub heading: f64,
    #[serde(default="default_accuracy")]
    pub accuracy: f64,
    #[serde(default)]
    pub occupancy: u32,
    #[serde(default)]
    pub status: TripStatus,
    #[serde(default)]
    pub timestamp: Option<EpochMillis>,
}

impl LocationReport {
    /// bounds check the report against the vehicle's capacity and resolve the
    /// validated position and report instant
    pub fn validate (&self, capacity: u32)->Result<(GeoPoint,DateTime<Utc>)> {
        let [lon,lat] = self.coordinates;
        let position = GeoPoint::try_from_lon_lat_degrees( lon, lat)
            .ok_or_else(|| TransitTrackError::InvalidLocation( format!("[{},{}]", lon, lat)))?;

        if !self.speed.is_finite() || self.speed < 0.0 {
            return Err( invalid_input( format!("speed out of range: {}", self.speed)));
        }
        if !self.heading.is_finite() || !(0.0..=360.0).contains( &self.heading) {
            return Err( invalid_input( format!("heading out of range: {}", self.heading)));
        }
        if !self.accuracy.is_finite() || self.accuracy < 0.0 {
            return Err( invalid_input( format!("accuracy out of range: {}", self.accuracy)));
        }
        if self.occupancy > capacity {
            return Err( TransitTrackError::InvalidOccupancy(
                format!("occupancy {} exceeds capacity {}", self.occupancy, capacity)));
        }

        let timestamp = match &self.timestamp {
            Some(ts) => DateTime::from_timestamp_millis( ts.millis())
                .ok_or_else(|| invalid_input( format!("timestamp out of range: {}", ts.millis())))?,
            None => datetime::utc_now()
        };
        Ok( (position, timestamp))
    }
}

/// operating status change for a vehicle
#[derive(Debug,Clone,Serialize,Deserialize)]
#[serde(rename_all="camelCase")]
pub struct StatusReport {
    pub vehicle_id: VehicleId,
    pub status: VehicleStatus,
}

/// occupancy change for a vehicle
#[derive(Debug,Clone,Serialize,Deserialize)]
#[serde(rename_all="camelCase")]
pub struct OccupancyReport {
    pub vehicle_id: VehicleId,
    pub occupancy: u32,
}
