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

/// the append-only tracking history. Records are immutable once written and
/// become invisible/reclaimed once older than the retention window - that policy
/// is enforced here in the store, not recomputed by readers.
/// Writes go through the [`HistoryRecorder`] queue so that ingestion is never
/// blocked on the history path (queued best-effort - a closed or broken queue
/// drops the record with a log line)

use std::{cmp, collections::VecDeque, sync::Arc, time::Duration};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use transit_common::{collections::push_to_ringbuffer, datetime, geo::GeoPoint};
use crate::entities::{RouteId, StopId, VehicleId};
use crate::report::TripStatus;

/// one accepted report as it went into the history - never updated after creation
#[derive(Debug,Clone,Serialize)]
#[serde(rename_all="camelCase")]
pub struct TrackingRecord {
    pub vehicle: VehicleId,
    pub route: RouteId,
    pub location: GeoPoint,
    pub speed: f64,
    pub heading: f64,
    pub accuracy: f64,
    pub occupancy: u32,
    pub status: TripStatus,
    pub stop: Option<StopId>,
    pub distance_from_stop: f64, // meters, 0 if no stop matched
    pub timestamp: DateTime<Utc>,
    pub estimated_arrival: Option<DateTime<Utc>>,
}

/// bounded, retention-windowed time series of TrackingRecords per vehicle
pub struct HistoryStore {
    records: DashMap<VehicleId,VecDeque<TrackingRecord>>,
    retention: Duration,
    max_records: usize, // per-vehicle ring bound
}

impl HistoryStore {
    pub fn new (retention: Duration, max_records: usize)->Self {
        HistoryStore {
            records: DashMap::new(),
            retention,
            max_records,
        }
    }

    pub fn append (&self, rec: TrackingRecord) {
        let mut entry = self.records.entry( rec.vehicle.clone()).or_insert_with( VecDeque::new);
        push_to_ringbuffer( entry.value_mut(), self.max_records, rec);
    }

    /// records of a vehicle not older than `since`, newest first, capped at `limit`.
    /// Records beyond the retention window are excluded even if still buffered
    pub fn query (&self, vehicle: &str, since: DateTime<Utc>, limit: usize)->Vec<TrackingRecord> {
        let cutoff = cmp::max( since, datetime::utc_now() - self.retention);

        match self.records.get( vehicle) {
            Some(entry) => {
                entry.value().iter().rev()
                    .take_while( |r| r.timestamp >= cutoff)
                    .take( limit)
                    .cloned()
                    .collect()
            }
            None => Vec::new()
        }
    }

    /// reclaim records older than the retention window; returns how many were dropped
    pub fn purge_expired (&self)->usize {
        let cutoff = datetime::utc_now() - self.retention;
        let mut n_dropped = 0;

        for mut entry in self.records.iter_mut() {
            let records = entry.value_mut();
            while let Some(first) = records.front() {
                if first.timestamp < cutoff {
                    records.pop_front();
                    n_dropped += 1;
                } else {
                    break;
                }
            }
        }
        n_dropped
    }
}

/// the write handle of the history path. `record()` only enqueues and returns
/// immediately - the spawned task performs the appends and the periodic
/// retention purge
#[derive(Clone)]
pub struct HistoryRecorder {
    tx: mpsc::UnboundedSender<TrackingRecord>,
}

impl HistoryRecorder {
    pub fn spawn (store: Arc<HistoryStore>, purge_interval: Duration)->Self {
        let (tx,rx) = mpsc::unbounded_channel();
        tokio::spawn( run_recorder( store, rx, purge_interval));
        HistoryRecorder { tx }
    }

    /// queue a record for appending; never blocks the caller
    pub fn record (&self, rec: TrackingRecord) {
        if self.tx.send( rec).is_err() {
            warn!("history recorder gone, dropping tracking record");
        }
    }
}

async fn run_recorder (store: Arc<HistoryStore>, mut rx: mpsc::UnboundedReceiver<TrackingRecord>, purge_interval: Duration) {
    let mut purge = tokio::time::interval( purge_interval);
    purge.set_missed_tick_behavior( tokio::time::MissedTickBehavior::Delay);
    purge.tick().await; // first tick fires immediately

    loop {
        tokio::select! {
            rec = rx.recv() => {
                match rec {
                    Some(rec) => store.append( rec),
                    None => break // all senders dropped
                }
            }
            _ = purge.tick() => {
                let n = store.purge_expired();
                if n > 0 {
                    debug!("purged {} expired tracking records", n);
                }
            }
        }
    }
}
