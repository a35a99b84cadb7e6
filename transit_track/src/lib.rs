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

/// the real-time vehicle tracking core: report ingestion, nearest-stop matching,
/// live state mutation, bounded tracking history and ETA estimation, fanned out
/// to topic subscribers through typed events.
///
/// The write pipeline for one report is
///   ingest -> match -> mutate (per-vehicle lock) -> record -> broadcast
/// with history and broadcast decoupled from the acknowledgment (see
/// [`tracker::Tracker`]). Fan-out itself lives in the server crate - this crate
/// only enqueues [`events::TrackEvent`]s

pub mod entities;
pub mod report;
pub mod matcher;
pub mod vehicles;
pub mod history;
pub mod eta;
pub mod events;
pub mod tracker;
pub mod errors;

pub use entities::{EntityStore, MemEntityStore, Route, RouteId, RouteStop, Stop, StopId, VehicleId, VehicleRecord};
pub use events::{Topic, TrackEvent};
pub use report::{LocationReport, OccupancyReport, StatusReport, TripStatus, VehicleStatus};
pub use tracker::{ReportAck, TrackConfig, Tracker};
pub use vehicles::{NearbyVehicle, Vehicle};
pub use errors::{Result, TransitTrackError};
