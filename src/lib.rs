// Copyright (c) 2024-2025 Ken Barker

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.

//! orthodromic
//!
//! [![License](https://img.shields.io/badge/License-MIT-blue)](https://opensource.org/license/mit/)
//!
//! A library for calculating the great-circle (orthodromic) distance between
//! two positions on the surface of the Earth, given their latitudes and
//! longitudes in degrees.
//!
//! ## Methods
//!
//! The library provides three methods, in increasing order of accuracy:
//!
//! - [Haversine](https://en.wikipedia.org/wiki/Haversine_formula) - a closed
//!   form solution on a sphere with the mean radius of the Earth, which is
//!   numerically stable for small distances;
//! - [Spherical Law of Cosines](https://en.wikipedia.org/wiki/Spherical_law_of_cosines) -
//!   a closed form solution on the same sphere, which loses precision for
//!   near-identical positions;
//! - [Vincenty](https://en.wikipedia.org/wiki/Vincenty%27s_formulae) - an
//!   iterative solution on the
//!   [WGS-84](https://www.icao.int/NACC/Documents/Meetings/2014/ECARAIM/REF08-Doc9674.pdf)
//!   ellipsoid, which is accurate to within a millimetre but may fail to
//!   converge for nearly antipodal positions.
//!
//! For example, between John F. Kennedy International Airport (JFK) and
//! London Heathrow (LHR):
//!
//! | Method                   | Kilometres      | Miles           |
//! |--------------------------|-----------------|-----------------|
//! | Haversine                | 5540.1754190795 | 3442.5054053574 |
//! | Spherical Law of Cosines | 5540.1754190795 | 3442.5054053574 |
//! | Vincenty                 | 5555.0656860095 | 3451.7577882724 |
//!
//! ## Design
//!
//! The `sphere` and `vincenty` modules return a `Result` which distinguishes
//! a `DistanceError::Domain` error (a coordinate or result that is not
//! finite) from a `DistanceError::NonConvergence` error (Vincenty's solution
//! failed to converge).
//!
//! The `Geodesy` functions take latitudes and longitudes as `f64` and return
//! `FAILURE` (-1.0) on any error, for callers which expect a sentinel value.
//!
//! Coordinates are not validated: positions outside of the latitude and
//! longitude ranges are passed to the trigonometric functions unchanged.
//! Call `Validate::is_valid` on a `Coordinate` to check them.
//!
//! The library depends upon the following crates:
//!
//! - [angle-sc](https://crates.io/crates/angle-sc) - to define `Degrees`
//!   and `Radians` and the `Validate` trait;
//! - [icao_units](https://crates.io/crates/icao-units) - to define `Metres`;
//! - [libm](https://crates.io/crates/libm) - for trigonometric functions;
//! - [thiserror](https://crates.io/crates/thiserror) - to define `DistanceError`.
//!
//! The library is declared [no_std](https://docs.rust-embedded.org/book/intro/no-std.html)
//! so it can be used in embedded applications.

#![cfg_attr(not(test), no_std)]

extern crate angle_sc;
extern crate icao_units;

pub mod ellipsoid;
pub mod sphere;
pub mod units;
pub mod vincenty;

pub use angle_sc::{Degrees, Radians, Validate};
pub use icao_units::si::Metres;
pub use units::Unit;

/// The value returned by the `Geodesy` functions when a distance cannot be
/// calculated.
pub const FAILURE: f64 = -1.0;

/// The reasons that a distance cannot be calculated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum DistanceError {
    /// A coordinate or the calculated distance is not finite.
    #[error("coordinate or distance is not finite")]
    Domain,
    /// Vincenty's solution did not converge, the positions are nearly antipodal.
    #[error("no convergence after {} iterations", vincenty::MAX_ITERATIONS)]
    NonConvergence,
}

/// A geographic position: a latitude and longitude in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinate {
    lat: Degrees,
    lon: Degrees,
}

impl Validate for Coordinate {
    /// Test whether a `Coordinate` is valid.
    /// Whether -90° <= `lat` <= 90° and -180° <= `lon` <= 180°.
    fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat.0) && (-180.0..=180.0).contains(&self.lon.0)
    }
}

impl Coordinate {
    /// Constructor.
    /// * `lat` - the latitude.
    /// * `lon` - the longitude.
    #[must_use]
    pub const fn new(lat: Degrees, lon: Degrees) -> Self {
        Self { lat, lon }
    }

    /// The latitude.
    #[must_use]
    pub const fn lat(&self) -> Degrees {
        self.lat
    }

    /// The longitude.
    #[must_use]
    pub const fn lon(&self) -> Degrees {
        self.lon
    }

    /// Whether both the latitude and longitude are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.lat.0.is_finite() && self.lon.0.is_finite()
    }
}

/// Check that a pair of positions can be passed to the distance methods.
pub(crate) fn check_finite(a: &Coordinate, b: &Coordinate) -> Result<(), DistanceError> {
    if a.is_finite() && b.is_finite() {
        Ok(())
    } else {
        Err(DistanceError::Domain)
    }
}

/// The methods of calculating the distance between two positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    /// The Haversine formula on the mean Earth sphere.
    Haversine,
    /// The Spherical Law of Cosines on the mean Earth sphere.
    SphericalLawOfCosines,
    /// Vincenty's inverse solution on the WGS 84 ellipsoid.
    Vincenty,
}

/// Calculate the distance between a pair of positions.
/// * `method` - the `Method` to calculate the distance with.
/// * `a`, `b` - the start and finish positions.
/// * `unit` - the `Unit` of the result.
///
/// returns the distance in kilometres or statute miles.
///
/// # Errors
///
/// `DistanceError::Domain` if a coordinate or the result is not finite,
/// `DistanceError::NonConvergence` if `Method::Vincenty` did not converge.
///
/// # Examples
/// ```
/// use orthodromic::*;
///
/// let jfk = Coordinate::new(Degrees(40.641766), Degrees(-73.780968));
/// let lhr = Coordinate::new(Degrees(51.470020), Degrees(-0.454295));
///
/// let distance = calculate_distance(Method::Vincenty, &jfk, &lhr, Unit::US).unwrap();
/// assert!((3451.7577882724 - distance).abs() < 1e-6);
///
/// let a = Coordinate::new(Degrees(0.0), Degrees(0.0));
/// let b = Coordinate::new(Degrees(0.0), Degrees(180.0));
/// let result = calculate_distance(Method::Vincenty, &a, &b, Unit::SI);
/// assert_eq!(Err(DistanceError::NonConvergence), result);
/// ```
pub fn calculate_distance(
    method: Method,
    a: &Coordinate,
    b: &Coordinate,
    unit: Unit,
) -> Result<f64, DistanceError> {
    match method {
        Method::Haversine => sphere::calculate_haversine_distance(a, b, unit),
        Method::SphericalLawOfCosines => sphere::calculate_slc_distance(a, b, unit),
        Method::Vincenty => vincenty::calculate_vincenty_distance(a, b, unit),
    }
}

/// Great-circle distance functions which take latitudes and longitudes in
/// degrees and return `FAILURE` when the distance cannot be calculated.
///
/// # Examples
/// ```
/// use orthodromic::{Geodesy, Unit, FAILURE};
///
/// let distance = Geodesy::haversine(40.641766, -73.780968, 51.470020, -0.454295, Unit::SI);
/// assert!((5540.1754190795 - distance).abs() < 1e-6);
///
/// let distance = Geodesy::vincenty(0.0, 0.0, 0.0, 180.0, Unit::SI);
/// assert_eq!(FAILURE, distance);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Geodesy;

impl Geodesy {
    fn distance(method: Method, lat1: f64, lon1: f64, lat2: f64, lon2: f64, unit: Unit) -> f64 {
        let a = Coordinate::new(Degrees(lat1), Degrees(lon1));
        let b = Coordinate::new(Degrees(lat2), Degrees(lon2));
        calculate_distance(method, &a, &b, unit).unwrap_or(FAILURE)
    }

    /// The Haversine distance between two positions.
    #[must_use]
    pub fn haversine(lat1: f64, lon1: f64, lat2: f64, lon2: f64, unit: Unit) -> f64 {
        Self::distance(Method::Haversine, lat1, lon1, lat2, lon2, unit)
    }

    /// The Spherical Law of Cosines distance between two positions.
    #[must_use]
    pub fn slc(lat1: f64, lon1: f64, lat2: f64, lon2: f64, unit: Unit) -> f64 {
        Self::distance(Method::SphericalLawOfCosines, lat1, lon1, lat2, lon2, unit)
    }

    /// Vincenty's distance between two positions on the WGS 84 ellipsoid.
    #[must_use]
    pub fn vincenty(lat1: f64, lon1: f64, lat2: f64, lon2: f64, unit: Unit) -> f64 {
        Self::distance(Method::Vincenty, lat1, lon1, lat2, lon2, unit)
    }
}
