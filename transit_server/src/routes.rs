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

/// REST surface: the request/response variant of report ingestion plus the read
/// queries (snapshots, nearby, history, ETA tables). Rejections map to 4xx with
/// a reason, internal failures to 500; successful responses carry the
/// `{success, data, timestamp}` envelope

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use transit_common::datetime;
use transit_track::{LocationReport, TransitTrackError};
use crate::ws::ws_handler;
use crate::ServerState;

pub fn router (state: ServerState)->Router {
    Router::new()
        .route( "/health", get( health))
        .route( "/tracking/ws", get( ws_handler))
        .route( "/tracking/location", post( post_location))
        .route( "/tracking/all", get( get_all))
        .route( "/tracking/route/{route_id}", get( get_route_vehicles))
        .route( "/tracking/nearby", get( get_nearby))
        .route( "/tracking/history/{vehicle_id}", get( get_history))
        .route( "/tracking/eta/{route_id}", get( get_eta))
        .with_state( state)
}

/* #region request/response shapes *******************************************************/

#[derive(Debug,Deserialize)]
struct LimitQuery {
    limit: Option<usize>,
}

#[derive(Debug,Deserialize)]
struct NearbyQuery {
    lng: f64,
    lat: f64,
    radius: Option<f64>, // meters
    limit: Option<usize>,
}

#[derive(Debug,Deserialize)]
struct HistoryQuery {
    hours: Option<u64>,
    limit: Option<usize>,
}

#[derive(Debug,Deserialize)]
#[serde(rename_all="camelCase")]
struct EtaQuery {
    stop_id: Option<String>,
}

fn ok_envelope<T> (data: &T)->Response where T: Serialize {
    Json( json!({
        "success": true,
        "data": data,
        "timestamp": datetime::utc_now(),
    })).into_response()
}

fn error_response (e: TransitTrackError)->Response {
    use TransitTrackError::*;
    let status = match &e {
        VehicleNotFound(_) | RouteNotFound(_) | StopNotFound(_) => StatusCode::NOT_FOUND,
        InvalidLocation(_) | InvalidOccupancy(_) | InvalidInput(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json( json!({ "success": false, "message": e.to_string() }))).into_response()
}

/* #endregion request/response shapes */

/* #region handlers **********************************************************************/

async fn health ()->Response {
    Json( json!({
        "success": true,
        "message": "transit tracking hub is running",
        "timestamp": datetime::utc_now(),
    })).into_response()
}

/// report ingestion for GPS devices that speak plain HTTP
async fn post_location (State(state): State<ServerState>, Json(report): Json<LocationReport>)->Response {
    match state.tracker.submit_report( report).await {
        Ok(ack) => ok_envelope( &ack),
        Err(e) => error_response( e)
    }
}

async fn get_all (State(state): State<ServerState>, Query(q): Query<LimitQuery>)->Response {
    ok_envelope( &state.tracker.active_vehicles( q.limit))
}

async fn get_route_vehicles (State(state): State<ServerState>, Path(route_id): Path<String>, Query(q): Query<LimitQuery>)->Response {
    ok_envelope( &state.tracker.route_vehicles( &route_id, q.limit))
}

async fn get_nearby (State(state): State<ServerState>, Query(q): Query<NearbyQuery>)->Response {
    match state.tracker.nearby( q.lng, q.lat, q.radius, q.limit) {
        Ok(vehicles) => ok_envelope( &vehicles),
        Err(e) => error_response( e)
    }
}

async fn get_history (State(state): State<ServerState>, Path(vehicle_id): Path<String>, Query(q): Query<HistoryQuery>)->Response {
    ok_envelope( &state.tracker.history( &vehicle_id, q.hours, q.limit))
}

async fn get_eta (State(state): State<ServerState>, Path(route_id): Path<String>, Query(q): Query<EtaQuery>)->Response {
    match state.tracker.route_etas( &route_id, q.stop_id.as_deref()).await {
        Ok(etas) => ok_envelope( &etas),
        Err(e) => error_response( e)
    }
}

/* #endregion handlers */
