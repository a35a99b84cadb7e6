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

use thiserror::Error;

pub type Result<T> = std::result::Result<T,TransitTrackError>;

#[derive(Error,Debug)]
pub enum TransitTrackError {

    #[error("vehicle not found: {0}")]
    VehicleNotFound(String),

    #[error("route not found: {0}")]
    RouteNotFound(String),

    #[error("stop not found: {0}")]
    StopNotFound(String),

    #[error("invalid location: {0}")]
    InvalidLocation(String),

    #[error("invalid occupancy: {0}")]
    InvalidOccupancy(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    IOError( #[from] std::io::Error),

    #[error("RON deserialization error: {0}")]
    RonDeError( #[from] ron::de::SpannedError),

    #[error("JSON error: {0}")]
    JsonError( #[from] serde_json::Error),

    #[error("operation failed: {0}")]
    OpFailed(String)
}

pub fn op_failed (msg: impl ToString)->TransitTrackError {
    TransitTrackError::OpFailed( msg.to_string())
}

pub fn invalid_input (msg: impl ToString)->TransitTrackError {
    TransitTrackError::InvalidInput( msg.to_string())
}
