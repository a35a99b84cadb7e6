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

/// standalone real-time transit tracking hub: report ingestion + query REST
/// routes and the websocket subscription surface, backed by an in-memory
/// entity store seeded from a RON file

use std::{net::SocketAddr, path::Path, sync::Arc};
use clap::Parser;
use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use transit_track::{
    entities::{EntityStore, MemEntityStore},
    history::{HistoryRecorder, HistoryStore},
    TrackConfig, Tracker,
};
use transit_server::{hub::ClientHub, load_config, routes, ServerConfig, ServerState};

#[derive(Parser)]
#[command(about="real-time transit tracking hub")]
struct Args {
    /// hub configuration (RON)
    #[arg(long, default_value="config/transit_hub.ron")]
    config: String,

    /// entity seed data (RON) - without it the hub starts with an empty network
    #[arg(long)]
    seed: Option<String>,
}

#[derive(Debug,Default,Deserialize)]
#[serde(default, rename_all="camelCase")]
struct HubConfig {
    server: ServerConfig,
    track: TrackConfig,
}

#[tokio::main]
async fn main ()->anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter( EnvFilter::from_default_env()) // use RUST_LOG to set max level
        .init();

    let args = Args::parse();

    let config: HubConfig = if Path::new( &args.config).is_file() {
        load_config( &args.config)?
    } else {
        info!("no config file at {}, using defaults", args.config);
        HubConfig::default()
    };

    let entities: Arc<dyn EntityStore> = match &args.seed {
        Some(path) => {
            info!("loading entities from {}", path);
            Arc::new( MemEntityStore::load( path)?)
        }
        None => Arc::new( MemEntityStore::new())
    };

    //--- the tracking core
    let history = Arc::new( HistoryStore::new( config.track.retention_window, config.track.max_history_records));
    let recorder = HistoryRecorder::spawn( history.clone(), config.track.purge_interval);
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let tracker = Arc::new( Tracker::new( config.track, entities, history, recorder, event_tx));

    //--- the fan-out hub
    let (hub_tx, hub_rx) = mpsc::channel( config.server.hub_mailbox);
    tokio::spawn( ClientHub::new( tracker.clone(), config.server.route_snapshot_limit).run( hub_rx, event_rx));

    //--- the server
    let state = ServerState::new( tracker, hub_tx);
    let router = routes::router( state).into_make_service_with_connect_info::<SocketAddr>();

    info!("serving http://{}", config.server.sock_addr);
    let listener = tokio::net::TcpListener::bind( config.server.sock_addr).await?;
    axum::serve( listener, router).await?;

    Ok(())
}
