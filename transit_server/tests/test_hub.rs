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

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use transit_common::{datetime, geo::GeoPoint};
use transit_track::entities::{MemEntityStore, EntityStore, Stop, VehicleKind};
use transit_track::events::{ArrivalNotice, TrackEvent, Topic};
use transit_track::history::{HistoryRecorder, HistoryStore};
use transit_track::report::{Direction, VehicleStatus};
use transit_track::tracker::{TrackConfig, Tracker};
use transit_track::vehicles::Vehicle;
use transit_server::hub::{ClientHub, HubMsg};

fn test_vehicle (id: &str, route: &str)->Vehicle {
    Vehicle {
        id: id.to_string(),
        vehicle_number: id.to_uppercase(),
        kind: VehicleKind::Bus,
        route: route.to_string(),
        capacity: 40,
        location: GeoPoint::from_lon_lat_degrees( -74.0, 40.7),
        speed: 20.0,
        heading: 0.0,
        occupancy: 5,
        status: VehicleStatus::Active,
        current_stop: None,
        next_stop: None,
        direction: Direction::Forward,
        last_updated: datetime::utc_now(),
    }
}

fn test_stop (id: &str)->Stop {
    Stop {
        id: id.to_string(),
        name: id.to_string(),
        location: GeoPoint::from_lon_lat_degrees( -74.0, 40.7),
        address: "1 Test St".to_string(),
        city: "Testville".to_string(),
        facilities: Vec::new(),
        is_active: true,
        routes: Vec::new(),
    }
}

struct HubFixture {
    ctrl: mpsc::Sender<HubMsg>,
    events: UnboundedSender<TrackEvent>,
}

impl HubFixture {
    /// a running hub over an empty tracker - events are injected directly
    fn spawn ()->Self {
        let entities: Arc<dyn EntityStore> = Arc::new( MemEntityStore::new());
        let config = TrackConfig::default();
        let history = Arc::new( HistoryStore::new( config.retention_window, config.max_history_records));
        let recorder = HistoryRecorder::spawn( history.clone(), config.purge_interval);
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let tracker = Arc::new( Tracker::new( config, entities, history, recorder, event_tx.clone()));

        let (ctrl_tx, ctrl_rx) = mpsc::channel(16);
        tokio::spawn( ClientHub::new( tracker, 50).run( ctrl_rx, event_rx));

        HubFixture { ctrl: ctrl_tx, events: event_tx }
    }

    async fn connect (&self, id: u64)->UnboundedReceiver<String> {
        let (tx,rx) = mpsc::unbounded_channel();
        let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
        self.ctrl.send( HubMsg::Connect { id, remote_addr: addr, tx }).await.unwrap();
        rx
    }

    async fn subscribe (&self, id: u64, topic: Topic) {
        self.ctrl.send( HubMsg::Subscribe { id, topic }).await.unwrap();
    }

    async fn settle (&self) {
        // let the hub task drain its mailboxes
        tokio::time::sleep( Duration::from_millis(50)).await;
    }
}

fn event_name (msg: &str)->String {
    let v: serde_json::Value = serde_json::from_str( msg).unwrap();
    v["event"].as_str().unwrap().to_string()
}

fn drain (rx: &mut UnboundedReceiver<String>)->Vec<String> {
    let mut msgs = Vec::new();
    while let Ok(msg) = rx.try_recv() {
        msgs.push(msg);
    }
    msgs
}

fn arrival_event (stop_id: &str)->TrackEvent {
    TrackEvent::Arrival {
        stop_id: stop_id.to_string(),
        notice: ArrivalNotice {
            vehicle: test_vehicle( "v1", "r1"),
            stop: test_stop( stop_id),
            distance: 42.0,
        }
    }
}

#[tokio::test]
async fn test_publish_is_scoped_to_the_topic () {
    let hub = HubFixture::spawn();

    let mut rx_a = hub.connect(1).await;
    let mut rx_b = hub.connect(2).await;
    hub.subscribe( 1, Topic::Stop("a".to_string())).await;
    hub.subscribe( 2, Topic::Stop("b".to_string())).await;
    hub.settle().await;

    hub.events.send( arrival_event( "a")).unwrap();
    hub.settle().await;

    let msgs = drain( &mut rx_a);
    assert_eq!( msgs.len(), 1);
    assert_eq!( event_name( &msgs[0]), "vehicle-arrival");

    // an observer of stop b never sees an arrival at stop a
    assert!( drain( &mut rx_b).is_empty());
}

#[tokio::test]
async fn test_late_subscriber_gets_snapshot_not_replay () {
    let hub = HubFixture::spawn();

    // three updates broadcast before anyone subscribes
    for _ in 0..3 {
        hub.events.send( TrackEvent::LocationUpdate { route: "r1".to_string(), vehicle: test_vehicle( "v1", "r1") }).unwrap();
    }
    hub.settle().await;

    let mut rx = hub.connect(1).await;
    hub.subscribe( 1, Topic::Route("r1".to_string())).await;
    hub.settle().await;

    // exactly the one-time snapshot reply, none of the three historical events
    let msgs = drain( &mut rx);
    assert_eq!( msgs.len(), 1);
    assert_eq!( event_name( &msgs[0]), "route-vehicles");

    // from now on the observer is in the fan-out
    hub.events.send( TrackEvent::LocationUpdate { route: "r1".to_string(), vehicle: test_vehicle( "v1", "r1") }).unwrap();
    hub.settle().await;
    let msgs = drain( &mut rx);
    assert_eq!( msgs.len(), 1);
    assert_eq!( event_name( &msgs[0]), "vehicle-location-update");
}

#[tokio::test]
async fn test_vehicle_topic_receives_acks () {
    let hub = HubFixture::spawn();

    let mut rx = hub.connect(1).await;
    hub.subscribe( 1, Topic::Vehicle("v1".to_string())).await;
    hub.settle().await;

    hub.events.send( TrackEvent::LocationAck { vehicle_id: "v1".to_string(), vehicle: test_vehicle( "v1", "r1") }).unwrap();
    hub.events.send( TrackEvent::LocationAck { vehicle_id: "v2".to_string(), vehicle: test_vehicle( "v2", "r1") }).unwrap();
    hub.settle().await;

    let msgs = drain( &mut rx);
    assert_eq!( msgs.len(), 1); // only v1, not v2
    assert_eq!( event_name( &msgs[0]), "location-updated");
}

#[tokio::test]
async fn test_disconnect_drops_all_subscriptions () {
    let hub = HubFixture::spawn();

    let mut rx = hub.connect(1).await;
    hub.subscribe( 1, Topic::Route("r1".to_string())).await;
    hub.subscribe( 1, Topic::Stop("a".to_string())).await;
    hub.settle().await;
    drain( &mut rx); // the route snapshot

    hub.ctrl.send( HubMsg::Disconnect { id: 1 }).await.unwrap();
    hub.ctrl.send( HubMsg::Disconnect { id: 1 }).await.unwrap(); // idempotent
    hub.settle().await;

    hub.events.send( TrackEvent::LocationUpdate { route: "r1".to_string(), vehicle: test_vehicle( "v1", "r1") }).unwrap();
    hub.events.send( arrival_event( "a")).unwrap();
    hub.settle().await;

    assert!( drain( &mut rx).is_empty());
}

#[tokio::test]
async fn test_unsubscribe_is_idempotent () {
    let hub = HubFixture::spawn();

    let mut rx = hub.connect(1).await;
    hub.subscribe( 1, Topic::Stop("a".to_string())).await;
    hub.settle().await;

    hub.ctrl.send( HubMsg::Unsubscribe { id: 1, topic: Topic::Stop("a".to_string()) }).await.unwrap();
    hub.ctrl.send( HubMsg::Unsubscribe { id: 1, topic: Topic::Stop("a".to_string()) }).await.unwrap();
    hub.ctrl.send( HubMsg::Unsubscribe { id: 1, topic: Topic::Stop("never-joined".to_string()) }).await.unwrap();
    hub.settle().await;

    hub.events.send( arrival_event( "a")).unwrap();
    hub.settle().await;

    assert!( drain( &mut rx).is_empty());
}
