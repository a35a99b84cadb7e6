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

use uom::si::f64::Length;
use uom::si::length::meter;

use transit_common::geo::GeoPoint;
use crate::entities::Stop;

/// distance delta below which two candidates count as equidistant
const DISTANCE_TOLERANCE_M: f64 = 0.001;

/// a matched stop with its route sequence and great circle distance from the
/// reported position
#[derive(Debug,Clone)]
pub struct StopMatch {
    pub stop: Stop,
    pub sequence: u32,
    pub distance: Length,
}

/// find the closest candidate stop within `max_distance` of `position`.
/// `candidates` is the stop set of the vehicle's route, ordered by ascending
/// sequence - equidistant candidates resolve to the earlier sequence.
/// Pure function, no side effects
pub fn nearest_stop (position: &GeoPoint, candidates: &[(Stop,u32)], max_distance: Length)->Option<StopMatch> {
    let mut best: Option<StopMatch> = None;

    for (stop,sequence) in candidates {
        let distance = position.haversine_distance( &stop.location);
        let is_closer = match &best {
            Some(b) => distance.get::<meter>() < b.distance.get::<meter>() - DISTANCE_TOLERANCE_M,
            None => true,
        };
        if is_closer {
            best = Some( StopMatch { stop: stop.clone(), sequence: *sequence, distance });
        }
    }

    best.filter( |b| b.distance <= max_distance)
}
