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

//! The vincenty module contains Vincenty's inverse solution for the length of
//! the geodesic between two positions on the WGS 84 ellipsoid.
//!
//! The solution iterates on the longitude difference on the auxiliary sphere,
//! `lambda`, until it changes by less than `CONVERGENCE_THRESHOLD`.  
//! It is accurate to within a millimetre for well separated positions,
//! but it can fail to converge for nearly antipodal positions, see:
//! T Vincenty, [Direct and Inverse Solutions of Geodesics on the Ellipsoid with application of nested equations](https://www.ngs.noaa.gov/PUBS_LIB/inverse.pdf).

#![allow(clippy::float_cmp)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::similar_names)]
#![allow(clippy::suboptimal_flops)]

use crate::ellipsoid::{calculate_reduced_latitude, calculate_sq_2nd_eccentricity, wgs84};
use crate::sphere::DEGREES_TO_RADIANS;
use crate::{Coordinate, DistanceError, Metres, Unit};

/// The maximum number of iterations to attempt.
pub const MAX_ITERATIONS: u32 = 100;

/// The change in `lambda` (radians) below which the solution has converged.
pub const CONVERGENCE_THRESHOLD: f64 = 1e-12;

/// Calculate Vincenty's `A` coefficient.
/// * `u_2` - the square of the reduced eccentricity parameter, `u²`.
#[must_use]
fn evaluate_a(u_2: f64) -> f64 {
    1.0 + (u_2 / 16384.0) * (4096.0 + u_2 * (-768.0 + u_2 * (320.0 - 175.0 * u_2)))
}

/// Calculate Vincenty's `B` coefficient.
/// * `u_2` - the square of the reduced eccentricity parameter, `u²`.
#[must_use]
fn evaluate_b(u_2: f64) -> f64 {
    (u_2 / 1024.0) * (256.0 + u_2 * (-128.0 + u_2 * (74.0 - 47.0 * u_2)))
}

/// The values of an iteration which are needed to calculate the length.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Iteration {
    /// The angular distance on the auxiliary sphere.
    sigma: f64,
    /// Vincenty's `A` coefficient.
    a: f64,
    /// The correction to `sigma` for the ellipsoid.
    delta_sigma: f64,
    /// The next estimate of `lambda`.
    lambda: f64,
}

/// Calculate the length of the geodesic between a pair of positions on the
/// WGS 84 ellipsoid.
/// * `a`, `b` - the start and finish positions.
///
/// returns the length of the geodesic and the number of iterations used.
///
/// # Errors
///
/// `DistanceError::Domain` if a coordinate or the length is not finite,
/// `DistanceError::NonConvergence` if `lambda` has not converged after
/// `MAX_ITERATIONS`, i.e. the positions are nearly antipodal.
///
/// # Examples
/// ```
/// use orthodromic::{vincenty, Coordinate, Degrees};
///
/// let istanbul = Coordinate::new(Degrees(42.0), Degrees(29.0));
/// let washington = Coordinate::new(Degrees(39.0), Degrees(-77.0));
///
/// let (length, iterations) = vincenty::calculate_geodesic_length(&istanbul, &washington).unwrap();
/// assert!((8_339_863.136 - length.0).abs() < 1e-3);
/// assert!(iterations <= vincenty::MAX_ITERATIONS);
/// ```
pub fn calculate_geodesic_length(
    a: &Coordinate,
    b: &Coordinate,
) -> Result<(Metres, u32), DistanceError> {
    crate::check_finite(a, b)?;

    let one_minus_f = 1.0 - wgs84::F;
    let semiminor = wgs84::B.0;
    let ep_2 = calculate_sq_2nd_eccentricity(wgs84::F);

    let u1 = calculate_reduced_latitude(a.lat().0 * DEGREES_TO_RADIANS, one_minus_f);
    let u2 = calculate_reduced_latitude(b.lat().0 * DEGREES_TO_RADIANS, one_minus_f);
    let (sin_u1, cos_u1) = (libm::sin(u1), libm::cos(u1));
    let (sin_u2, cos_u2) = (libm::sin(u2), libm::cos(u2));

    let delta_lambda = (b.lon().0 - a.lon().0) * DEGREES_TO_RADIANS;
    if !delta_lambda.is_finite() {
        return Err(DistanceError::Domain);
    }
    let mut lambda = delta_lambda;

    for iterations in 1..=MAX_ITERATIONS {
        let (sin_lambda, cos_lambda) = (libm::sin(lambda), libm::cos(lambda));
        let term1 = cos_u2 * sin_lambda;
        let term2 = cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda;

        let sin_sigma = libm::sqrt(term1 * term1 + term2 * term2);
        if !sin_sigma.is_finite() {
            return Err(DistanceError::Domain);
        }
        if sin_sigma == 0.0 {
            // coincident positions
            return Ok((Metres(0.0), iterations));
        }
        let cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;

        let current = iterate(
            delta_lambda,
            sin_sigma,
            cos_sigma,
            sin_u1 * sin_u2,
            cos_u1 * cos_u2 * sin_lambda,
            ep_2,
        );
        if !current.lambda.is_finite() {
            return Err(DistanceError::Domain);
        }
        if libm::fabs(current.lambda - lambda) < CONVERGENCE_THRESHOLD {
            let length = semiminor * current.a * (current.sigma - current.delta_sigma);
            return if length.is_finite() {
                Ok((Metres(length), iterations))
            } else {
                Err(DistanceError::Domain)
            };
        }
        lambda = current.lambda;
    }

    Err(DistanceError::NonConvergence)
}

/// Perform one iteration of Vincenty's inverse solution.
/// * `delta_lambda` - the longitude difference between the positions.
/// * `sin_sigma`, `cos_sigma` - the angular distance on the auxiliary sphere.
/// * `sin_u1_sin_u2`, `cos_u1_cos_u2_sin_lambda` - reduced latitude products.
/// * `ep_2` - the square of the second eccentricity of the ellipsoid.
#[must_use]
fn iterate(
    delta_lambda: f64,
    sin_sigma: f64,
    cos_sigma: f64,
    sin_u1_sin_u2: f64,
    cos_u1_cos_u2_sin_lambda: f64,
    ep_2: f64,
) -> Iteration {
    let f = wgs84::F;
    let sigma = libm::atan2(sin_sigma, cos_sigma);

    // the azimuth of the geodesic at the Equator
    let sin_alpha = cos_u1_cos_u2_sin_lambda / sin_sigma;
    let cos_2_alpha = 1.0 - sin_alpha * sin_alpha;

    // cos_2_alpha is zero for geodesics along the Equator
    let cos_2_sigma_m = if cos_2_alpha == 0.0 {
        0.0
    } else {
        cos_sigma - 2.0 * sin_u1_sin_u2 / cos_2_alpha
    };
    let cos_2_sigma_m_2 = cos_2_sigma_m * cos_2_sigma_m;

    let u_2 = cos_2_alpha * ep_2;
    let a = evaluate_a(u_2);
    let b = evaluate_b(u_2);

    let delta_sigma = b
        * sin_sigma
        * (cos_2_sigma_m
            + (b / 4.0)
                * (cos_sigma * (-1.0 + 2.0 * cos_2_sigma_m_2)
                    - (b / 6.0)
                        * cos_2_sigma_m
                        * (-3.0 + 4.0 * sin_sigma * sin_sigma)
                        * (-3.0 + 4.0 * cos_2_sigma_m_2)));

    let c = (f / 16.0) * cos_2_alpha * (4.0 + f * (4.0 - 3.0 * cos_2_alpha));
    let lambda = delta_lambda
        + (1.0 - c)
            * f
            * sin_alpha
            * (sigma
                + c * sin_sigma * (cos_2_sigma_m + c * cos_sigma * (-1.0 + 2.0 * cos_2_sigma_m_2)));

    Iteration {
        sigma,
        a,
        delta_sigma,
        lambda,
    }
}

/// Calculate the geodesic distance between a pair of positions on the
/// WGS 84 ellipsoid using Vincenty's inverse solution.
/// * `a`, `b` - the start and finish positions.
/// * `unit` - the `Unit` of the result.
///
/// returns the distance in kilometres or statute miles.
///
/// # Errors
///
/// See `calculate_geodesic_length`.
pub fn calculate_vincenty_distance(
    a: &Coordinate,
    b: &Coordinate,
    unit: Unit,
) -> Result<f64, DistanceError> {
    calculate_geodesic_length(a, b).map(|(length, _)| unit.from_metres(length))
}

#[cfg(test)]
mod tests {
    use super::*;
    use angle_sc::{is_within_tolerance, Degrees};

    #[test]
    fn test_evaluate_a_and_b() {
        assert_eq!(1.0, evaluate_a(0.0));
        assert_eq!(0.0, evaluate_b(0.0));

        let ep_2 = calculate_sq_2nd_eccentricity(wgs84::F);
        assert!(1.0 < evaluate_a(ep_2));
        assert!(0.0 < evaluate_b(ep_2));
    }

    #[test]
    fn test_calculate_vincenty_distance_jfk_lhr() {
        let jfk = Coordinate::new(Degrees(40.641_766), Degrees(-73.780_968));
        let lhr = Coordinate::new(Degrees(51.470_020), Degrees(-0.454_295));

        let result = calculate_vincenty_distance(&jfk, &lhr, Unit::SI);
        assert!(is_within_tolerance(
            5555.065_686_009_5,
            result.unwrap(),
            1e-6
        ));

        let result = calculate_vincenty_distance(&jfk, &lhr, Unit::US);
        assert!(is_within_tolerance(
            3451.757_788_272_4,
            result.unwrap(),
            1e-6
        ));
    }

    #[test]
    fn test_calculate_geodesic_length_karney() {
        let istanbul = Coordinate::new(Degrees(42.0), Degrees(29.0));
        let washington = Coordinate::new(Degrees(39.0), Degrees(-77.0));

        let (length, iterations) = calculate_geodesic_length(&istanbul, &washington).unwrap();
        // GeographicLib gives 8339863.136005359 metres
        assert!(is_within_tolerance(8_339_863.136_005_359, length.0, 1e-3));
        assert!(iterations < 10);
        println!("Istanbul-Washington iterations: {:?}", iterations);
    }

    #[test]
    fn test_calculate_geodesic_length_meridian() {
        // the WGS 84 meridian distance from pole to pole
        let north_pole = Coordinate::new(Degrees(90.0), Degrees(0.0));
        let south_pole = Coordinate::new(Degrees(-90.0), Degrees(0.0));

        let (length, _) = calculate_geodesic_length(&north_pole, &south_pole).unwrap();
        assert!(is_within_tolerance(20_003_931.458_6, length.0, 1e-3));
    }

    #[test]
    fn test_calculate_geodesic_length_equator() {
        let a = Coordinate::new(Degrees(0.0), Degrees(0.0));
        let b = Coordinate::new(Degrees(0.0), Degrees(90.0));

        // a quarter of the equatorial circumference
        let (length, _) = calculate_geodesic_length(&a, &b).unwrap();
        assert!(is_within_tolerance(10_018_754.171_4, length.0, 1e-3));
    }

    #[test]
    fn test_coincident_positions() {
        for i in -89..90 {
            let a = Coordinate::new(Degrees(f64::from(i)), Degrees(f64::from(i)));
            let (length, iterations) = calculate_geodesic_length(&a, &a).unwrap();
            assert_eq!(0.0, length.0);
            assert_eq!(1, iterations);
            assert_eq!(Ok(0.0), calculate_vincenty_distance(&a, &a, Unit::US));
        }
    }

    #[test]
    fn test_antipodal_positions_do_not_converge() {
        let a = Coordinate::new(Degrees(0.0), Degrees(0.0));
        let b = Coordinate::new(Degrees(0.0), Degrees(180.0));
        assert_eq!(
            Err(DistanceError::NonConvergence),
            calculate_geodesic_length(&a, &b)
        );

        let b = Coordinate::new(Degrees(0.5), Degrees(179.5));
        assert_eq!(
            Err(DistanceError::NonConvergence),
            calculate_vincenty_distance(&a, &b, Unit::SI)
        );
    }

    #[test]
    fn test_non_finite_coordinates() {
        let a = Coordinate::new(Degrees(0.0), Degrees(0.0));
        let b = Coordinate::new(Degrees(f64::NAN), Degrees(10.0));
        assert_eq!(
            Err(DistanceError::Domain),
            calculate_vincenty_distance(&a, &b, Unit::SI)
        );

        let b = Coordinate::new(Degrees(10.0), Degrees(f64::NEG_INFINITY));
        assert_eq!(
            Err(DistanceError::Domain),
            calculate_vincenty_distance(&b, &a, Unit::US)
        );
    }

    #[test]
    fn test_longitude_difference_overflow() {
        // finite longitudes whose difference is infinite
        let a = Coordinate::new(Degrees(0.0), Degrees(1e308));
        let b = Coordinate::new(Degrees(0.0), Degrees(-1e308));

        assert_eq!(
            Err(DistanceError::Domain),
            calculate_geodesic_length(&a, &b)
        );
        assert_eq!(
            Err(DistanceError::Domain),
            calculate_vincenty_distance(&b, &a, Unit::US)
        );
    }
}
