#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Great-circle distance between report and viewer positions.
//!
//! Distances use `geo`'s haversine measure on a spherical Earth of radius
//! [`EARTH_RADIUS_KM`]. Inputs are not validated: coordinates outside the
//! valid degree ranges (or NaN) produce a defined but meaningless result,
//! so callers check them with [`Coordinates::validate`] first.

use animal_alert_report_models::Coordinates;
use geo::{Distance, HaversineMeasure, Point};

/// Mean Earth radius used for all distance calculations.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

const EARTH: HaversineMeasure = HaversineMeasure::new(EARTH_RADIUS_KM * 1000.0);

fn point(at: &Coordinates) -> Point {
    Point::new(at.longitude, at.latitude)
}

/// Haversine distance between `a` and `b` in kilometers, unrounded.
#[must_use]
pub fn distance_km(a: &Coordinates, b: &Coordinates) -> f64 {
    EARTH.distance(point(a), point(b)) / 1000.0
}

/// Rounds a distance to the nearest whole kilometer for display.
///
/// Non-finite or negative inputs saturate to `0`; anything past `u32::MAX`
/// saturates to `u32::MAX`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn round_km(distance_km: f64) -> u32 {
    // `as` saturates and maps NaN to 0.
    distance_km.round() as u32
}

#[cfg(test)]
mod tests {
    use geo::Haversine;

    use super::*;

    const PUNE: Coordinates = Coordinates::new(18.5204, 73.8567);

    #[test]
    fn same_point_is_zero() {
        assert!(distance_km(&PUNE, &PUNE).abs() < f64::EPSILON);

        let origin = Coordinates::new(0.0, 0.0);
        assert!(distance_km(&origin, &origin).abs() < f64::EPSILON);
    }

    #[test]
    fn one_degree_of_longitude_at_equator() {
        let d = distance_km(&Coordinates::new(0.0, 0.0), &Coordinates::new(0.0, 1.0));
        assert!((d - 111.19).abs() < 0.5, "got {d}");
    }

    #[test]
    fn distance_is_symmetric() {
        let pairs = [
            (PUNE, Coordinates::new(19.0760, 72.8777)),
            (Coordinates::new(-33.8688, 151.2093), Coordinates::new(51.5074, -0.1278)),
            (Coordinates::new(89.9, 10.0), Coordinates::new(-89.9, -170.0)),
        ];

        for (a, b) in pairs {
            let ab = distance_km(&a, &b);
            let ba = distance_km(&b, &a);
            assert!((ab - ba).abs() < 1e-9, "{ab} != {ba}");
        }
    }

    #[test]
    fn accuracy_does_not_affect_distance() {
        let fuzzy = PUNE.with_accuracy(250.0);
        assert!(distance_km(&PUNE, &fuzzy).abs() < f64::EPSILON);
    }

    #[test]
    fn uses_6371_km_radius_not_grs80() {
        let mumbai = Coordinates::new(19.0760, 72.8777);
        let ours = distance_km(&PUNE, &mumbai);

        let grs80 = Haversine.distance(point(&PUNE), point(&mumbai)) / 1000.0;

        assert!((ours - 120.15).abs() < 0.01, "got {ours}");
        assert!(grs80 > ours);
        assert_eq!(round_km(ours), 120);
    }

    #[test]
    fn sydney_to_london() {
        let d = distance_km(
            &Coordinates::new(-33.8688, 151.2093),
            &Coordinates::new(51.5074, -0.1278),
        );
        assert!((d - 16_993.9).abs() < 1.0, "got {d}");
    }

    #[test]
    fn rounds_to_nearest_kilometer() {
        assert_eq!(round_km(10.49), 10);
        assert_eq!(round_km(10.5), 11);
        assert_eq!(round_km(0.0), 0);
        assert_eq!(round_km(f64::NAN), 0);
        assert_eq!(round_km(-3.0), 0);
    }
}
