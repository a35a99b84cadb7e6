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

/// the static transit network entities (stops, routes, vehicle records) and the
/// store adapter they are read through. These records are owned and maintained by
/// the external entity management system - the tracking core only reads them and
/// keeps its own live state per vehicle (see [`crate::vehicles`])

use std::{fs, path::Path};
use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use transit_common::geo::GeoPoint;
use crate::report::{Direction, VehicleStatus};
use crate::errors::{invalid_input, Result, TransitTrackError};

pub type StopId = String;
pub type RouteId = String;
pub type VehicleId = String;

#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
#[serde(rename_all="snake_case")]
pub enum Facility {
    Shelter,
    Bench,
    Lighting,
    Accessibility,
    TicketBooth,
    Wifi,
}

#[derive(Debug,Clone,Serialize,Deserialize)]
#[serde(rename_all="camelCase")]
pub struct Stop {
    pub id: StopId,
    pub name: String,
    pub location: GeoPoint,
    pub address: String,
    pub city: String,
    #[serde(default)]
    pub facilities: Vec<Facility>,
    #[serde(default="default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub routes: Vec<RouteId>, // back references maintained by the entity management system
}

/// one entry of the ordered stop sequence of a route
#[derive(Debug,Clone,Serialize,Deserialize)]
#[serde(rename_all="camelCase")]
pub struct RouteStop {
    pub stop: StopId,
    pub sequence: u32, // 1-based, strictly increasing along the route
    #[serde(default)]
    pub scheduled_offset: u32, // minutes from route start
}

#[derive(Debug,Clone,Serialize,Deserialize)]
#[serde(rename_all="camelCase")]
pub struct OperatingHours {
    pub start: String, // "HH:MM"
    pub end: String,
}

#[derive(Debug,Clone,Serialize,Deserialize)]
#[serde(rename_all="camelCase")]
pub struct Route {
    pub id: RouteId,
    pub name: String,
    pub number: String,
    pub stops: Vec<RouteStop>,
    pub operating_hours: OperatingHours,
    pub frequency: u32, // minutes between vehicles
    pub fare: f64,
    #[serde(default="default_color")]
    pub color: String,
    #[serde(default="default_true")]
    pub is_active: bool,
}

impl Route {
    /// sequence numbers have to be >= 1, unique and strictly increasing along the stop list
    pub fn validate (&self)->Result<()> {
        let mut last = 0;
        for rs in &self.stops {
            if rs.sequence < 1 || rs.sequence <= last {
                return Err( invalid_input( format!(
                    "route {} has non-increasing stop sequence {} after {}", self.id, rs.sequence, last)));
            }
            last = rs.sequence;
        }
        Ok(())
    }
}

#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
#[serde(rename_all="lowercase")]
pub enum VehicleKind {
    Bus,
    Minibus,
    Van,
    Trolley,
}

/// the static part of a vehicle - the live state is owned by [`crate::vehicles::VehicleStore`]
#[derive(Debug,Clone,Serialize,Deserialize)]
#[serde(rename_all="camelCase")]
pub struct VehicleRecord {
    pub id: VehicleId,
    pub vehicle_number: String,
    pub kind: VehicleKind,
    pub capacity: u32,
    pub route: RouteId,
    #[serde(default)]
    pub status: VehicleStatus, // operating status at registration time
    #[serde(default)]
    pub direction: Direction,
    #[serde(default="default_true")]
    pub is_active: bool, // soft delete flag
}

fn default_true ()->bool { true }
fn default_color ()->String { "#007bff".to_string() }

/* #region entity store ******************************************************************/

/// read access to the transit network entities. Implementations are external
/// collaborators (a document store in production) - the tracking core never
/// writes through this interface and re-queries instead of holding object graphs
#[async_trait]
pub trait EntityStore: Send + Sync {
    async fn stop (&self, id: &str)->Result<Option<Stop>>;
    async fn route (&self, id: &str)->Result<Option<Route>>;
    async fn vehicle (&self, id: &str)->Result<Option<VehicleRecord>>;

    /// the active stops of a route with their sequence number, ordered by ascending sequence.
    /// Returns RouteNotFound for unknown route ids
    async fn route_stops (&self, route_id: &str)->Result<Vec<(Stop,u32)>>;
}

/// seed file content for a MemEntityStore
#[derive(Debug,Deserialize)]
#[serde(rename_all="camelCase")]
pub struct EntitySeed {
    #[serde(default)]
    pub stops: Vec<Stop>,
    #[serde(default)]
    pub routes: Vec<Route>,
    #[serde(default)]
    pub vehicles: Vec<VehicleRecord>,
}

/// in-memory EntityStore used by the standalone server and by tests
pub struct MemEntityStore {
    stops: DashMap<StopId,Stop>,
    routes: DashMap<RouteId,Route>,
    vehicles: DashMap<VehicleId,VehicleRecord>,
}

impl MemEntityStore {
    pub fn new ()->Self {
        MemEntityStore {
            stops: DashMap::new(),
            routes: DashMap::new(),
            vehicles: DashMap::new(),
        }
    }

    pub fn from_seed (seed: EntitySeed)->Result<Self> {
        let store = Self::new();
        for stop in seed.stops { store.add_stop( stop); }
        for route in seed.routes { store.add_route( route)?; }
        for vehicle in seed.vehicles { store.add_vehicle( vehicle); }
        Ok(store)
    }

    /// load seed entities from a RON file
    pub fn load (path: impl AsRef<Path>)->Result<Self> {
        let input = fs::read_to_string( path)?;
        let seed: EntitySeed = ron::from_str( &input)?;
        Self::from_seed( seed)
    }

    pub fn add_stop (&self, stop: Stop) {
        self.stops.insert( stop.id.clone(), stop);
    }

    pub fn add_route (&self, route: Route)->Result<()> {
        route.validate()?;
        for rs in &route.stops {
            if !self.stops.contains_key( &rs.stop) {
                return Err( TransitTrackError::StopNotFound( rs.stop.clone()));
            }
        }
        self.routes.insert( route.id.clone(), route);
        Ok(())
    }

    pub fn add_vehicle (&self, vehicle: VehicleRecord) {
        self.vehicles.insert( vehicle.id.clone(), vehicle);
    }
}

#[async_trait]
impl EntityStore for MemEntityStore {
    async fn stop (&self, id: &str)->Result<Option<Stop>> {
        Ok( self.stops.get(id).map(|e| e.value().clone()))
    }

    async fn route (&self, id: &str)->Result<Option<Route>> {
        Ok( self.routes.get(id).map(|e| e.value().clone()))
    }

    async fn vehicle (&self, id: &str)->Result<Option<VehicleRecord>> {
        Ok( self.vehicles.get(id).map(|e| e.value().clone()))
    }

    async fn route_stops (&self, route_id: &str)->Result<Vec<(Stop,u32)>> {
        let route = self.routes.get( route_id)
            .ok_or_else(|| TransitTrackError::RouteNotFound( route_id.to_string()))?;

        let mut stops: Vec<(Stop,u32)> = Vec::with_capacity( route.stops.len());
        for rs in &route.stops {
            if let Some(stop) = self.stops.get( &rs.stop) {
                if stop.is_active {
                    stops.push( (stop.value().clone(), rs.sequence));
                }
            }
        }
        stops.sort_by_key( |(_,seq)| *seq);
        Ok(stops)
    }
}

/* #endregion entity store */
