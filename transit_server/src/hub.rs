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

/// the subscription registry / broadcaster. One hub task owns the connection
/// map and the topic membership - connects, disconnects and (un)subscribes
/// arrive through the control mailbox, tracking events through the event queue.
///
/// Delivery is best effort: a publish goes to whoever is subscribed at that
/// moment, nothing is replayed to later subscribers, nothing is retried, and a
/// client whose outbound channel is gone is dropped silently. Per client the
/// publish order is preserved (single writer queue per connection)

use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use transit_track::{Topic, TrackEvent, Tracker};
use crate::ws::WsMsg;

pub type ClientId = u64;

/// a connected observer - `tx` feeds the connection's outbound writer task
#[derive(Debug)]
pub struct ClientConnection {
    pub remote_addr: SocketAddr,
    pub tx: mpsc::UnboundedSender<String>,
}

#[derive(Debug)]
pub enum HubMsg {
    Connect { id: ClientId, remote_addr: SocketAddr, tx: mpsc::UnboundedSender<String> },
    Disconnect { id: ClientId },
    Subscribe { id: ClientId, topic: Topic },
    Unsubscribe { id: ClientId, topic: Topic },
}

pub struct ClientHub {
    tracker: Arc<Tracker>,
    snapshot_limit: usize,

    clients: HashMap<ClientId,ClientConnection>,
    topics: HashMap<Topic,HashSet<ClientId>>,
}

impl ClientHub {
    pub fn new (tracker: Arc<Tracker>, snapshot_limit: usize)->Self {
        ClientHub {
            tracker,
            snapshot_limit,
            clients: HashMap::new(),
            topics: HashMap::new(),
        }
    }

    /// the hub task body - drains the control mailbox and the tracking event
    /// queue until both ends are gone
    pub async fn run (mut self, mut ctrl: mpsc::Receiver<HubMsg>, mut events: mpsc::UnboundedReceiver<TrackEvent>) {
        loop {
            tokio::select! {
                msg = ctrl.recv() => {
                    match msg {
                        Some(msg) => self.handle_ctrl( msg),
                        None => break
                    }
                }
                event = events.recv() => {
                    match event {
                        Some(event) => self.publish( event),
                        None => break
                    }
                }
            }
        }
        debug!("client hub terminated");
    }

    fn handle_ctrl (&mut self, msg: HubMsg) {
        match msg {
            HubMsg::Connect { id, remote_addr, tx } => {
                debug!("client {} connected from {}", id, remote_addr);
                self.clients.insert( id, ClientConnection { remote_addr, tx });
            }
            HubMsg::Disconnect { id } => { // idempotent - also removes all subscriptions
                if self.clients.remove( &id).is_some() {
                    debug!("client {} disconnected", id);
                }
                self.topics.retain( |_,members| {
                    members.remove( &id);
                    !members.is_empty()
                });
            }
            HubMsg::Subscribe { id, topic } => {
                if !self.clients.contains_key( &id) { return }
                debug!("client {} subscribed to {}", id, topic);
                self.topics.entry( topic.clone()).or_default().insert( id);

                // joining a route topic gets a one-time snapshot of its active
                // vehicles - a reply to the new subscriber, not a broadcast
                if let Topic::Route(route) = &topic {
                    self.send_route_snapshot( id, route);
                }
            }
            HubMsg::Unsubscribe { id, topic } => {
                if let Some(members) = self.topics.get_mut( &topic) {
                    members.remove( &id);
                    if members.is_empty() {
                        self.topics.remove( &topic);
                    }
                }
            }
        }
    }

    /// deliver to everybody subscribed to the event's topic at this moment
    fn publish (&mut self, event: TrackEvent) {
        let topic = event.topic();
        let Some(members) = self.topics.get( &topic) else { return };

        let msg = match event.payload_json().and_then( |payload| WsMsg::json( event.event_name(), &payload)) {
            Ok(msg) => msg,
            Err(e) => {
                warn!("dropping undeliverable {} event: {}", event.event_name(), e);
                return
            }
        };

        for id in members {
            if let Some(conn) = self.clients.get( id) {
                // a closed channel means the client is on its way out - drop silently
                let _ = conn.tx.send( msg.clone());
            }
        }
    }

    fn send_route_snapshot (&self, id: ClientId, route: &str) {
        let vehicles = self.tracker.route_vehicles( route, Some(self.snapshot_limit));
        match WsMsg::json( "route-vehicles", &vehicles) {
            Ok(msg) => {
                if let Some(conn) = self.clients.get( &id) {
                    let _ = conn.tx.send( msg);
                }
            }
            Err(e) => warn!("could not serialize route snapshot for {}: {}", route, e)
        }
    }
}
