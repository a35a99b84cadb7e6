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

use chrono::{DateTime, TimeZone, Utc};
use serde::{Serialize, Deserialize, Deserializer};
use std::fmt;
use std::time::Duration;
use parse_duration::parse;

/// compact millisecond-resolution wall clock instant, the wire format used by
/// report sources (GPS units mostly report epoch milliseconds)
#[derive(Serialize,Deserialize,Debug,Clone,Copy,PartialEq)]
pub struct EpochMillis(i64);

impl EpochMillis {
    pub fn now ()->Self { EpochMillis( Utc::now().timestamp_millis()) }

    pub fn new (millis: i64)->Self { EpochMillis(millis) }

    pub fn from_secs (secs: i64)->Self { EpochMillis(secs*1000) }

    pub fn millis (&self)->i64 { self.0 }
}

impl fmt::Display for EpochMillis {
    fn fmt (&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", DateTime::<Utc>::from(*self))
    }
}

impl<Tz> From<DateTime<Tz>> for EpochMillis where Tz: TimeZone {
    fn from (date: DateTime<Tz>)->Self { EpochMillis( date.timestamp_millis()) }
}

impl<Tz> From<EpochMillis> for DateTime<Tz> where Tz: TimeZone, DateTime<Tz>: From<DateTime<Utc>> {
    fn from (millis: EpochMillis)->Self {
        DateTime::<Utc>::from_timestamp_millis(millis.0).unwrap().into()
    }
}

impl PartialOrd for EpochMillis {
    fn partial_cmp (&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

// plain Duration ctors so that call sites don't have to go through the
// still-experimental std Duration convenience ctors
#[inline] pub fn millis (n: u64)->Duration { Duration::from_millis(n) }
#[inline] pub fn secs (n: u64)->Duration { Duration::from_secs(n) }
#[inline] pub fn minutes (n: u64)->Duration { Duration::from_secs(n * 60) }
#[inline] pub fn hours (n: u64)->Duration { Duration::from_secs(n * 3600) }
#[inline] pub fn days (n: u64)->Duration { Duration::from_secs(n * 86400) }

/// this should be used wherever we might have to use sim clock instead of wall clock
#[inline]
pub fn utc_now ()->DateTime<Utc> {
    Utc::now()
}

/// minutes as fractional chrono offset (ETA arithmetic works on fractional minutes)
#[inline]
pub fn minutes_f64 (m: f64)->chrono::Duration {
    chrono::Duration::milliseconds( (m * 60_000.0) as i64)
}

//--- support for serde

/// deserialize a Duration from a human readable string such as "30 days" or "10 min"
pub fn deserialize_duration <'a,D> (deserializer: D) -> Result<Duration,D::Error>
    where D: Deserializer<'a>
{
    String::deserialize(deserializer).and_then( |string| {
        parse(string.as_str())
            .map_err( |e| serde::de::Error::custom(format!("{:?}",e)))
    })
}
