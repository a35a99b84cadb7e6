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

/// geometries on the WGS84 ellipsoid surface. Following our design principles we
/// build on existing crates - [geo](https://docs.rs/geo/latest/geo/index.html) for
/// the spherical algorithms and [uom](https://docs.rs/uom/latest/uom/) for explicit
/// units-of-measure on computed lengths. We employ the Rust new type pattern to add
/// geodetic value semantics (degree ranges, lon/lat order) on top of `geo::Point`.

use std::fmt::{self, Debug, Display};

use serde::ser::{Serialize as SerializeTrait, SerializeSeq, Serializer};
use serde::de::{self, Deserialize as DeserializeTrait, Deserializer, SeqAccess, Visitor};

use geo::{Distance, Point};
use geo::algorithm::line_measures::{Bearing, metric_spaces::Haversine};

use uom::si::f64::Length;
use uom::si::length::meter;

use crate::angle::{normalize_180, normalize_90, Angle360, Latitude, Longitude};

/// a wrapper for geo::Point that uses geodetic degrees stored as f64
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct GeoPoint(Point);

impl GeoPoint {
    pub fn from_lon_lat (lon: Longitude, lat: Latitude) -> Self {
        GeoPoint( Point::new( lon.degrees(), lat.degrees()))
    }

    pub fn from_lon_lat_degrees (lon: f64, lat: f64) -> Self {
        GeoPoint( Point::new( normalize_180(lon), normalize_90(lat)))
    }

    /// range checked ctor for externally reported coordinates - unlike
    /// `from_lon_lat_degrees` this rejects instead of normalizing
    pub fn try_from_lon_lat_degrees (lon: f64, lat: f64) -> Option<Self> {
        if lon.is_finite() && lat.is_finite()
            && (-180.0..=180.0).contains(&lon) && (-90.0..=90.0).contains(&lat) {
            Some( GeoPoint( Point::new( lon, lat)))
        } else {
            None
        }
    }

    pub fn longitude (&self) -> Longitude { Longitude::from_degrees( self.0.x()) }
    pub fn latitude (&self) -> Latitude { Latitude::from_degrees( self.0.y()) }

    pub fn longitude_degrees (&self) -> f64 { self.0.x() }
    pub fn latitude_degrees (&self) -> f64 { self.0.y() }

    pub fn point<'a> (&'a self) -> &'a Point { &self.0 }

    /// great circle distance to `other` on the mean earth sphere
    pub fn haversine_distance (&self, other: &GeoPoint) -> Length {
        Length::new::<meter>( Haversine::distance( self.0, other.0))
    }

    /// initial great circle bearing towards `other`, clockwise from north
    pub fn bearing_to (&self, other: &GeoPoint) -> Angle360 {
        Angle360::from_degrees( Haversine::bearing( self.0, other.0))
    }
}

impl fmt::Display for GeoPoint {
    fn fmt (&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.0.x(), self.0.y())
    }
}

// the wire format for positions is a bare [longitude,latitude] pair (GeoJSON
// coordinate order), not a {lon,lat} struct

impl SerializeTrait for GeoPoint {
    fn serialize<S> (&self, serializer: S) -> Result<S::Ok, S::Error> where S: Serializer {
        let mut seq = serializer.serialize_seq( Some(2))?;
        seq.serialize_element( &self.0.x())?;
        seq.serialize_element( &self.0.y())?;
        seq.end()
    }
}

impl<'de> DeserializeTrait<'de> for GeoPoint {
    fn deserialize<D> (deserializer: D) -> Result<GeoPoint, D::Error> where D: Deserializer<'de> {
        struct GeoPointVisitor;

        impl<'de> Visitor<'de> for GeoPointVisitor {
            type Value = GeoPoint;

            fn expecting (&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a [longitude,latitude] pair of degrees")
            }

            fn visit_seq<A> (self, mut seq: A) -> Result<Self::Value, A::Error> where A: SeqAccess<'de> {
                let lon: f64 = seq.next_element()?.ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let lat: f64 = seq.next_element()?.ok_or_else(|| de::Error::invalid_length(1, &self))?;
                if seq.next_element::<f64>()?.is_some() {
                    return Err( de::Error::custom("coordinate pair has more than two elements"));
                }
                GeoPoint::try_from_lon_lat_degrees( lon, lat)
                    .ok_or_else(|| de::Error::custom( format!("coordinates out of range: [{},{}]", lon, lat)))
            }
        }

        deserializer.deserialize_seq( GeoPointVisitor)
    }
}
