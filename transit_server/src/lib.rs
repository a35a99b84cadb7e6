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

/// the transport surface of the tracking core: a websocket endpoint for
/// subscription/ingestion, REST routes for ingestion and queries, and the
/// client hub that owns topic membership and fans tracking events out to
/// subscribed observers.
///
/// Ownership split: the tracking core (transit_track) never sees observer
/// connections - it enqueues typed events which the [`hub::ClientHub`] task
/// delivers. All registry mutation goes through the hub mailbox, so there is no
/// shared subscription state to lock

use std::{fs, net::SocketAddr, path::Path, sync::{atomic::{AtomicU64, Ordering}, Arc}};
use serde::{de::DeserializeOwned, Deserialize};
use tokio::sync::mpsc;

use transit_track::Tracker;
use crate::hub::{ClientId, HubMsg};
use crate::errors::TransitServerResult;

pub mod errors;
pub mod hub;
pub mod routes;
pub mod ws;

#[derive(Debug,Clone,Deserialize)]
#[serde(default, rename_all="camelCase")]
pub struct ServerConfig {
    pub sock_addr: SocketAddr,
    pub hub_mailbox: usize, // bound of the hub control channel
    pub route_snapshot_limit: usize, // max vehicles pushed on a route subscription
}

impl Default for ServerConfig {
    fn default ()->Self {
        ServerConfig {
            sock_addr: SocketAddr::from( ([127,0,0,1], 5000)),
            hub_mailbox: 64,
            route_snapshot_limit: 50,
        }
    }
}

/// load a RON config file
pub fn load_config<C> (path: impl AsRef<Path>)->TransitServerResult<C> where C: DeserializeOwned {
    let input = fs::read_to_string( path)?;
    Ok( ron::from_str( &input)?)
}

/// the state axum handlers run with - note this has to clone efficiently
#[derive(Clone)]
pub struct ServerState {
    pub tracker: Arc<Tracker>,
    pub hub: mpsc::Sender<HubMsg>,
    next_client_id: Arc<AtomicU64>,
}

impl ServerState {
    pub fn new (tracker: Arc<Tracker>, hub: mpsc::Sender<HubMsg>)->Self {
        ServerState { tracker, hub, next_client_id: Arc::new( AtomicU64::new(1)) }
    }

    pub fn next_client_id (&self)->ClientId {
        self.next_client_id.fetch_add( 1, Ordering::Relaxed)
    }
}
