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

/// the tracking facade. `submit_report` is the single write entry point that
/// drives matching, state mutation, history append and broadcast as one logical
/// unit; the read paths expose snapshots, nearby/history queries and ETA tables.
///
/// Ordering is fetch-candidates -> mutate + enqueue (per-vehicle lock, channel
/// sends only, no I/O under it) -> release. History append and broadcast drain
/// their queues outside the lock and are fire-and-forget: failures are logged,
/// never rolled back into the committed transition, and never fail the
/// acknowledgment

use std::{sync::Arc, time::Duration};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, warn};
use uom::si::f64::Length;
use uom::si::length::meter;

use transit_common::datetime::{self, deserialize_duration, minutes_f64};
use transit_common::geo::GeoPoint;

use crate::entities::{EntityStore, Stop, StopId, VehicleRecord};
use crate::errors::{Result, TransitTrackError};
use crate::eta::{self, EtaEntry};
use crate::events::{ArrivalNotice, OccupancyNotice, StatusNotice, TrackEvent};
use crate::history::{HistoryRecorder, HistoryStore, TrackingRecord};
use crate::matcher::{self, StopMatch};
use crate::report::{Direction, LocationReport, OccupancyReport, StatusReport};
use crate::vehicles::{NearbyVehicle, ReportOutcome, Vehicle, VehicleStore};

#[derive(Debug,Clone,Deserialize)]
#[serde(default, rename_all="camelCase")]
pub struct TrackConfig {
    pub stop_match_radius_m: f64, // a report within this of a stop counts as "at the stop"

    #[serde(deserialize_with="deserialize_duration")]
    pub retention_window: Duration, // history records older than this are dropped

    #[serde(deserialize_with="deserialize_duration")]
    pub purge_interval: Duration,

    pub max_history_records: usize, // per vehicle

    pub route_query_limit: usize,
    pub all_query_limit: usize,
    pub nearby_radius_m: f64,
    pub nearby_limit: usize,
    pub history_hours: u64,
    pub history_limit: usize,
}

impl Default for TrackConfig {
    fn default ()->Self {
        TrackConfig {
            stop_match_radius_m: 100.0,
            retention_window: datetime::days(30),
            purge_interval: datetime::minutes(10),
            max_history_records: 10_000,
            route_query_limit: 50,
            all_query_limit: 100,
            nearby_radius_m: 2000.0,
            nearby_limit: 20,
            history_hours: 24,
            history_limit: 200,
        }
    }
}

/// acknowledgment returned to a report source. A stale report is acknowledged
/// with `applied: false` and the unchanged snapshot - idempotent retry semantics
#[derive(Debug,Clone,Serialize)]
#[serde(rename_all="camelCase")]
pub struct ReportAck {
    pub applied: bool,
    pub vehicle: Vehicle,
}

pub struct Tracker {
    config: TrackConfig,
    entities: Arc<dyn EntityStore>,
    vehicles: VehicleStore,
    history: Arc<HistoryStore>,
    recorder: HistoryRecorder,
    events: mpsc::UnboundedSender<TrackEvent>,
}

impl Tracker {
    pub fn new (config: TrackConfig, entities: Arc<dyn EntityStore>,
                history: Arc<HistoryStore>, recorder: HistoryRecorder,
                events: mpsc::UnboundedSender<TrackEvent>)->Self {
        Tracker { config, entities, vehicles: VehicleStore::new(), history, recorder, events }
    }

    pub fn config (&self)->&TrackConfig { &self.config }

    /* #region write operations **********************************************************/

    /// apply a location report. Rejections (unknown vehicle, malformed values)
    /// are returned to the source; a stale report is acknowledged but changes
    /// nothing, writes no history and broadcasts nothing
    pub async fn submit_report (&self, report: LocationReport)->Result<ReportAck> {
        let rec = self.active_record( &report.vehicle_id).await?;
        let (position, timestamp) = report.validate( rec.capacity)?;

        // resolve candidates before taking the per-vehicle lock
        let candidates = self.entities.route_stops( &rec.route).await?;
        let max_distance = Length::new::<meter>( self.config.stop_match_radius_m);
        let matched = matcher::nearest_stop( &position, &candidates, max_distance);

        let direction = self.vehicles.snapshot( &rec.id).map( |v| v.direction).unwrap_or( rec.direction);
        let next_stop = matched.as_ref().and_then( |m| next_stop_id( &candidates, m.sequence, direction));

        // the commit hook runs under the per-vehicle guard: history and broadcast
        // are enqueued in transition order, the actual I/O happens elsewhere
        let outcome = self.vehicles.apply_report( &rec, position, timestamp, &report, &matched, next_stop, |v, arrival| {
            self.recorder.record( tracking_record( v, &report, &matched, timestamp));

            self.publish( TrackEvent::LocationUpdate { route: v.route.clone(), vehicle: v.clone() });
            self.publish( TrackEvent::LocationAck { vehicle_id: v.id.clone(), vehicle: v.clone() });

            if let Some(m) = arrival {
                self.publish( TrackEvent::Arrival {
                    stop_id: m.stop.id.clone(),
                    notice: ArrivalNotice {
                        vehicle: v.clone(),
                        stop: m.stop.clone(),
                        distance: m.distance.get::<meter>(),
                    }
                });
            }
        });

        match outcome {
            ReportOutcome::Stale { snapshot } => {
                debug!("stale report for vehicle {} ({} < {}) ignored", rec.id, timestamp, snapshot.last_updated);
                Ok( ReportAck { applied: false, vehicle: snapshot })
            }
            ReportOutcome::Applied { snapshot, .. } => {
                Ok( ReportAck { applied: true, vehicle: snapshot })
            }
        }
    }

    /// change the operating status of a vehicle
    pub async fn update_status (&self, report: StatusReport)->Result<Vehicle> {
        let rec = self.active_record( &report.vehicle_id).await?;
        let snapshot = self.vehicles.set_status( &rec, report.status, datetime::utc_now(), |v| {
            self.publish( TrackEvent::StatusUpdate {
                route: v.route.clone(),
                notice: StatusNotice {
                    id: v.id.clone(),
                    vehicle_number: v.vehicle_number.clone(),
                    status: v.status,
                    last_updated: v.last_updated,
                }
            });
        });
        Ok(snapshot)
    }

    /// change the occupancy of a vehicle
    pub async fn update_occupancy (&self, report: OccupancyReport)->Result<Vehicle> {
        let rec = self.active_record( &report.vehicle_id).await?;
        if report.occupancy > rec.capacity {
            return Err( TransitTrackError::InvalidOccupancy(
                format!("occupancy {} exceeds capacity {}", report.occupancy, rec.capacity)));
        }
        let snapshot = self.vehicles.set_occupancy( &rec, report.occupancy, datetime::utc_now(), |v| {
            self.publish( TrackEvent::OccupancyUpdate {
                route: v.route.clone(),
                notice: OccupancyNotice {
                    id: v.id.clone(),
                    vehicle_number: v.vehicle_number.clone(),
                    occupancy: v.occupancy,
                    capacity: v.capacity,
                    last_updated: v.last_updated,
                }
            });
        });
        Ok(snapshot)
    }

    /* #endregion write operations */

    /* #region read operations ***********************************************************/

    pub fn vehicle_snapshot (&self, id: &str)->Option<Vehicle> {
        self.vehicles.snapshot( id)
    }

    /// snapshots of all vehicles with operating status active
    pub fn active_vehicles (&self, limit: Option<usize>)->Vec<Vehicle> {
        self.vehicles.active_vehicles( None, limit.unwrap_or( self.config.all_query_limit))
    }

    /// active vehicles of one route
    pub fn route_vehicles (&self, route: &str, limit: Option<usize>)->Vec<Vehicle> {
        self.vehicles.active_vehicles( Some(route), limit.unwrap_or( self.config.route_query_limit))
    }

    /// active vehicles within `radius_m` of a point, closest first
    pub fn nearby (&self, lon: f64, lat: f64, radius_m: Option<f64>, limit: Option<usize>)->Result<Vec<NearbyVehicle>> {
        let position = GeoPoint::try_from_lon_lat_degrees( lon, lat)
            .ok_or_else(|| TransitTrackError::InvalidLocation( format!("[{},{}]", lon, lat)))?;
        let radius = Length::new::<meter>( radius_m.unwrap_or( self.config.nearby_radius_m));
        Ok( self.vehicles.nearby( &position, radius, limit.unwrap_or( self.config.nearby_limit)))
    }

    /// history of one vehicle over the last `hours`, newest first
    pub fn history (&self, vehicle: &str, hours: Option<u64>, limit: Option<usize>)->Vec<TrackingRecord> {
        let since = datetime::utc_now() - datetime::hours( hours.unwrap_or( self.config.history_hours));
        self.history.query( vehicle, since, limit.unwrap_or( self.config.history_limit))
    }

    /// ETA table of all active vehicles of a route, optionally restricted to one stop.
    /// Entries follow the route's stop order per vehicle, not distance
    pub async fn route_etas (&self, route_id: &str, stop_id: Option<&str>)->Result<Vec<EtaEntry>> {
        let route = self.entities.route( route_id).await?
            .ok_or_else(|| TransitTrackError::RouteNotFound( route_id.to_string()))?;
        let mut targets = self.entities.route_stops( &route.id).await?;

        if let Some(stop_id) = stop_id {
            if self.entities.stop( stop_id).await?.is_none() {
                return Err( TransitTrackError::StopNotFound( stop_id.to_string()));
            }
            targets.retain( |(stop,_)| stop.id == stop_id);
        }

        let now = datetime::utc_now();
        let mut entries = Vec::new();
        for vehicle in self.vehicles.active_vehicles( Some(&route.id), usize::MAX) {
            entries.extend( eta::estimate( &vehicle, &targets, now));
        }
        Ok(entries)
    }

    /* #endregion read operations */

    async fn active_record (&self, vehicle_id: &str)->Result<VehicleRecord> {
        self.entities.vehicle( vehicle_id).await?
            .filter( |rec| rec.is_active) // soft deleted records count as missing
            .ok_or_else(|| TransitTrackError::VehicleNotFound( vehicle_id.to_string()))
    }

    /// enqueue for the broadcaster; delivery is best effort and never blocks us
    fn publish (&self, event: TrackEvent) {
        if self.events.send( event).is_err() {
            warn!("event channel closed, dropping broadcast");
        }
    }
}

/// the stop following `sequence` in travel direction, if any
fn next_stop_id (candidates: &[(Stop,u32)], sequence: u32, direction: Direction)->Option<StopId> {
    match direction {
        Direction::Forward => candidates.iter().find( |(_,seq)| *seq > sequence),
        Direction::Reverse => candidates.iter().rev().find( |(_,seq)| *seq < sequence),
    }.map( |(stop,_)| stop.id.clone())
}

fn tracking_record (snapshot: &Vehicle, report: &LocationReport, matched: &Option<StopMatch>, timestamp: DateTime<Utc>)->TrackingRecord {
    let estimated_arrival = matched.as_ref()
        .filter( |_| report.speed > 0.0)
        .map( |m| timestamp + minutes_f64( eta::eta_minutes( m.distance, report.speed)));

    TrackingRecord {
        vehicle: snapshot.id.clone(),
        route: snapshot.route.clone(),
        location: snapshot.location,
        speed: report.speed,
        heading: report.heading,
        accuracy: report.accuracy,
        occupancy: report.occupancy,
        status: report.status,
        stop: matched.as_ref().map( |m| m.stop.id.clone()),
        distance_from_stop: matched.as_ref().map( |m| m.distance.get::<meter>()).unwrap_or(0.0),
        timestamp,
        estimated_arrival,
    }
}
