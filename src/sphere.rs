// Copyright (c) 2025 Ken Barker

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

//! The sphere module contains the great circle distance calculations on a
//! sphere with the mean radius of the Earth.
//!
//! Both the Haversine and the Spherical Law of Cosines (SLC) formulae model
//! the Earth as a perfect sphere, so they agree to within floating point
//! precision except for near-identical positions where the SLC loses
//! precision, since it takes the `acos` of values close to 1.0.

#![allow(clippy::suboptimal_flops)]

use crate::{Coordinate, DistanceError, Unit};
use angle_sc::Radians;

/// The mean radius of the Earth in kilometres.
pub const MEAN_RADIUS: f64 = 6371.009;

/// The factor to convert Degrees to Radians.
pub const DEGREES_TO_RADIANS: f64 = core::f64::consts::PI / 180.0;

/// Calculate the great circle angle between a pair of positions using the
/// Haversine formula.
/// * `a`, `b` - the start and finish positions.
///
/// returns the central angle between the positions.
#[must_use]
pub fn calculate_haversine_angle(a: &Coordinate, b: &Coordinate) -> Radians {
    let phi1 = a.lat().0 * DEGREES_TO_RADIANS;
    let phi2 = b.lat().0 * DEGREES_TO_RADIANS;

    let sin_half_delta_lat = libm::sin((phi2 - phi1) / 2.0);
    let sin_half_delta_lon = libm::sin(((b.lon().0 - a.lon().0) / 2.0) * DEGREES_TO_RADIANS);

    let haversine = sin_half_delta_lat * sin_half_delta_lat
        + sin_half_delta_lon * sin_half_delta_lon * libm::cos(phi1) * libm::cos(phi2);

    // rounding may take nearly antipodal positions just beyond 1.0,
    // NaN is passed through
    let root = libm::sqrt(haversine);
    Radians(2.0 * libm::asin(if root > 1.0 { 1.0 } else { root }))
}

/// Calculate the great circle angle between a pair of positions using the
/// Spherical Law of Cosines.
///
/// Note: identical positions return zero, however near-identical positions
/// are subject to the precision loss of `acos` close to 1.0.
/// * `a`, `b` - the start and finish positions.
///
/// returns the central angle between the positions.
#[must_use]
pub fn calculate_slc_angle(a: &Coordinate, b: &Coordinate) -> Radians {
    if a == b {
        return Radians(0.0);
    }

    let phi1 = a.lat().0 * DEGREES_TO_RADIANS;
    let phi2 = b.lat().0 * DEGREES_TO_RADIANS;
    let delta_lambda = (a.lon().0 - b.lon().0) * DEGREES_TO_RADIANS;

    let cos_angle = libm::sin(phi1) * libm::sin(phi2)
        + libm::cos(phi1) * libm::cos(phi2) * libm::cos(delta_lambda);
    Radians(libm::acos(cos_angle.clamp(-1.0, 1.0)))
}

/// Convert a great circle angle on the mean Earth sphere to a distance.
fn to_distance(angle: Radians, unit: Unit) -> Result<f64, DistanceError> {
    let distance = unit.from_kilometres(angle.0 * MEAN_RADIUS);
    if distance.is_finite() {
        Ok(distance)
    } else {
        Err(DistanceError::Domain)
    }
}

/// Calculate the great circle distance between a pair of positions using
/// the Haversine formula.
/// * `a`, `b` - the start and finish positions.
/// * `unit` - the `Unit` of the result.
///
/// returns the distance in kilometres or statute miles, or
/// `DistanceError::Domain` if a coordinate is not finite.
///
/// # Errors
///
/// `DistanceError::Domain` if a coordinate or the result is not finite.
///
/// # Examples
/// ```
/// use orthodromic::{sphere, Coordinate, Degrees, Unit};
///
/// let jfk = Coordinate::new(Degrees(40.641766), Degrees(-73.780968));
/// let lhr = Coordinate::new(Degrees(51.470020), Degrees(-0.454295));
///
/// let distance = sphere::calculate_haversine_distance(&jfk, &lhr, Unit::SI).unwrap();
/// assert!((5540.1754190795 - distance).abs() < 1e-6);
/// ```
pub fn calculate_haversine_distance(
    a: &Coordinate,
    b: &Coordinate,
    unit: Unit,
) -> Result<f64, DistanceError> {
    crate::check_finite(a, b)?;
    to_distance(calculate_haversine_angle(a, b), unit)
}

/// Calculate the great circle distance between a pair of positions using
/// the Spherical Law of Cosines.
/// * `a`, `b` - the start and finish positions.
/// * `unit` - the `Unit` of the result.
///
/// returns the distance in kilometres or statute miles.
///
/// # Errors
///
/// `DistanceError::Domain` if a coordinate or the result is not finite.
pub fn calculate_slc_distance(
    a: &Coordinate,
    b: &Coordinate,
    unit: Unit,
) -> Result<f64, DistanceError> {
    crate::check_finite(a, b)?;
    to_distance(calculate_slc_angle(a, b), unit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use angle_sc::{is_within_tolerance, Degrees};

    fn jfk() -> Coordinate {
        Coordinate::new(Degrees(40.641_766), Degrees(-73.780_968))
    }

    fn lhr() -> Coordinate {
        Coordinate::new(Degrees(51.470_020), Degrees(-0.454_295))
    }

    #[test]
    fn test_calculate_haversine_distance() {
        let result = calculate_haversine_distance(&jfk(), &lhr(), Unit::SI);
        assert!(is_within_tolerance(
            5540.175_419_079_5,
            result.unwrap(),
            1e-6
        ));

        let result = calculate_haversine_distance(&jfk(), &lhr(), Unit::US);
        assert!(is_within_tolerance(
            3442.505_405_357_4,
            result.unwrap(),
            1e-6
        ));
    }

    #[test]
    fn test_calculate_slc_distance() {
        let result = calculate_slc_distance(&jfk(), &lhr(), Unit::SI);
        assert!(is_within_tolerance(
            5540.175_419_079_5,
            result.unwrap(),
            1e-6
        ));

        let result = calculate_slc_distance(&jfk(), &lhr(), Unit::US);
        assert!(is_within_tolerance(
            3442.505_405_357_4,
            result.unwrap(),
            1e-6
        ));
    }

    #[test]
    fn test_coincident_positions() {
        for i in -90..91 {
            let a = Coordinate::new(Degrees(f64::from(i)), Degrees(f64::from(2 * i)));
            assert_eq!(0.0, calculate_haversine_angle(&a, &a).0);
            assert_eq!(0.0, calculate_slc_angle(&a, &a).0);
        }
    }

    #[test]
    fn test_antipodal_positions() {
        let a = Coordinate::new(Degrees(0.0), Degrees(0.0));
        let b = Coordinate::new(Degrees(0.0), Degrees(180.0));
        let half_circumference = core::f64::consts::PI * MEAN_RADIUS;

        let result = calculate_haversine_distance(&a, &b, Unit::SI);
        assert!(is_within_tolerance(half_circumference, result.unwrap(), 1e-9));

        let result = calculate_slc_distance(&a, &b, Unit::SI);
        assert!(is_within_tolerance(half_circumference, result.unwrap(), 1e-9));

        let north_pole = Coordinate::new(Degrees(90.0), Degrees(0.0));
        let south_pole = Coordinate::new(Degrees(-90.0), Degrees(0.0));
        let result = calculate_haversine_distance(&north_pole, &south_pole, Unit::SI);
        assert!(is_within_tolerance(half_circumference, result.unwrap(), 1e-9));
    }

    #[test]
    fn test_near_identical_positions() {
        // 1e-9 degrees of longitude at 10 degrees North is about 0.1 mm
        let a = Coordinate::new(Degrees(10.0), Degrees(0.0));
        let b = Coordinate::new(Degrees(10.0), Degrees(1e-9));

        let haversine = calculate_haversine_distance(&a, &b, Unit::SI).unwrap();
        assert!(is_within_tolerance(1.095_057_805e-7, haversine, 1e-15));

        // the SLC cannot resolve the distance, but stays close to zero
        let slc = calculate_slc_distance(&a, &b, Unit::SI).unwrap();
        assert!((0.0..1e-3).contains(&slc));
    }

    #[test]
    fn test_non_finite_coordinates() {
        let nan = Coordinate::new(Degrees(f64::NAN), Degrees(0.0));
        let infinite = Coordinate::new(Degrees(0.0), Degrees(f64::INFINITY));

        assert_eq!(
            Err(DistanceError::Domain),
            calculate_haversine_distance(&nan, &lhr(), Unit::SI)
        );
        assert_eq!(
            Err(DistanceError::Domain),
            calculate_haversine_distance(&jfk(), &infinite, Unit::US)
        );
        assert_eq!(
            Err(DistanceError::Domain),
            calculate_slc_distance(&nan, &lhr(), Unit::SI)
        );
        assert_eq!(
            Err(DistanceError::Domain),
            calculate_slc_distance(&jfk(), &infinite, Unit::US)
        );
    }

    #[test]
    fn test_longitude_difference_overflow() {
        // finite longitudes whose difference is infinite
        let a = Coordinate::new(Degrees(0.0), Degrees(1e308));
        let b = Coordinate::new(Degrees(0.0), Degrees(-1e308));

        assert_eq!(
            Err(DistanceError::Domain),
            calculate_haversine_distance(&a, &b, Unit::SI)
        );
        assert_eq!(
            Err(DistanceError::Domain),
            calculate_haversine_distance(&b, &a, Unit::US)
        );
        assert_eq!(
            Err(DistanceError::Domain),
            calculate_slc_distance(&a, &b, Unit::SI)
        );
    }
}
