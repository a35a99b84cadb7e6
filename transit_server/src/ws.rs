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

/// the websocket side of the subscription surface. Each connection gets an
/// outbound writer task fed by an unbounded channel (the send side lives in the
/// hub) and an inbound loop that dispatches client frames: topic joins/leaves
/// and the streaming variants of the ingestion operations.
/// Disconnect tears down all of the connection's subscriptions in the hub

use std::net::SocketAddr;
use axum::{
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    extract::connect_info::ConnectInfo,
    extract::State,
    response::{IntoResponse, Response},
};
use futures::{sink::SinkExt, stream::StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use transit_track::{LocationReport, OccupancyReport, StatusReport, Topic};
use crate::hub::{ClientId, HubMsg};
use crate::ServerState;

/* #region wire messages *****************************************************************/

/// the outbound event envelope: `{"event": <name>, "data": <payload>}`
#[derive(Serialize)]
pub struct WsMsg<'a,T> where T: Serialize {
    pub event: &'a str,
    pub data: &'a T,
}

impl<'a,T> WsMsg<'a,T> where T: Serialize {
    pub fn json (event: &'a str, data: &'a T)->serde_json::Result<String> {
        serde_json::to_string( &WsMsg { event, data })
    }
}

/// inbound client frames, dispatched on their "action" tag
#[derive(Debug,Deserialize)]
#[serde(tag="action", rename_all="kebab-case", rename_all_fields="camelCase")]
enum ClientCmd {
    JoinRoute { route_id: String },
    LeaveRoute { route_id: String },
    JoinStop { stop_id: String },
    LeaveStop { stop_id: String },
    JoinVehicle { vehicle_id: String },
    LeaveVehicle { vehicle_id: String },
    LocationUpdate( LocationReport),
    StatusUpdate( StatusReport),
    OccupancyUpdate( OccupancyReport),
}

/* #endregion wire messages */

pub async fn ws_handler (ws: WebSocketUpgrade, ConnectInfo(addr): ConnectInfo<SocketAddr>, State(state): State<ServerState>)->Response {
    ws.on_upgrade( move |socket| handle_socket( socket, addr, state)).into_response()
}

async fn handle_socket (ws: WebSocket, remote_addr: SocketAddr, state: ServerState) {
    let id = state.next_client_id();
    let (mut ws_sender, mut ws_receiver) = ws.split();

    // the outbound writer - everything the hub (or we) push to this connection
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    let writer = tokio::spawn( async move {
        while let Some(msg) = rx.recv().await {
            if ws_sender.send( Message::Text( msg.into())).await.is_err() {
                break // peer gone, inbound loop will see the close
            }
        }
    });

    if state.hub.send( HubMsg::Connect { id, remote_addr, tx: tx.clone() }).await.is_err() {
        warn!("client hub unavailable, closing connection from {}", remote_addr);
        return
    }

    while let Some(Ok(msg)) = ws_receiver.next().await {
        if let Message::Text(text) = msg {
            handle_client_frame( &state, id, &tx, text.as_str()).await;
        }
    }

    // observer went away - its subscriptions go with it
    let _ = state.hub.send( HubMsg::Disconnect { id }).await;
    writer.abort();
    debug!("connection from {} closed", remote_addr);
}

async fn handle_client_frame (state: &ServerState, id: ClientId, tx: &mpsc::UnboundedSender<String>, frame: &str) {
    let cmd: ClientCmd = match serde_json::from_str( frame) {
        Ok(cmd) => cmd,
        Err(e) => {
            debug!("invalid frame from client {}: {}", id, e);
            send_error( tx, format!("invalid message: {}", e));
            return
        }
    };

    match cmd {
        ClientCmd::JoinRoute { route_id } => { subscribe( state, id, Topic::Route(route_id)).await }
        ClientCmd::LeaveRoute { route_id } => { unsubscribe( state, id, Topic::Route(route_id)).await }
        ClientCmd::JoinStop { stop_id } => { subscribe( state, id, Topic::Stop(stop_id)).await }
        ClientCmd::LeaveStop { stop_id } => { unsubscribe( state, id, Topic::Stop(stop_id)).await }
        ClientCmd::JoinVehicle { vehicle_id } => { subscribe( state, id, Topic::Vehicle(vehicle_id)).await }
        ClientCmd::LeaveVehicle { vehicle_id } => { unsubscribe( state, id, Topic::Vehicle(vehicle_id)).await }

        ClientCmd::LocationUpdate(report) => {
            match state.tracker.submit_report( report).await {
                Ok(ack) => send_event( tx, "location-updated", &ack.vehicle),
                Err(e) => send_error( tx, e.to_string())
            }
        }
        ClientCmd::StatusUpdate(report) => {
            match state.tracker.update_status( report).await {
                Ok(v) => send_event( tx, "status-updated", &json!({ "vehicleId": v.id, "status": v.status })),
                Err(e) => send_error( tx, e.to_string())
            }
        }
        ClientCmd::OccupancyUpdate(report) => {
            match state.tracker.update_occupancy( report).await {
                Ok(v) => send_event( tx, "occupancy-updated", &json!({ "vehicleId": v.id, "occupancy": v.occupancy })),
                Err(e) => send_error( tx, e.to_string())
            }
        }
    }
}

async fn subscribe (state: &ServerState, id: ClientId, topic: Topic) {
    let _ = state.hub.send( HubMsg::Subscribe { id, topic }).await;
}

async fn unsubscribe (state: &ServerState, id: ClientId, topic: Topic) {
    let _ = state.hub.send( HubMsg::Unsubscribe { id, topic }).await;
}

fn send_event<T> (tx: &mpsc::UnboundedSender<String>, event: &str, data: &T) where T: Serialize {
    match WsMsg::json( event, data) {
        Ok(msg) => { let _ = tx.send( msg); }
        Err(e) => warn!("could not serialize {} event: {}", event, e)
    }
}

fn send_error (tx: &mpsc::UnboundedSender<String>, message: String) {
    send_event( tx, "error", &json!({ "message": message }));
}
