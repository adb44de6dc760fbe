use std::cmp::Ordering;

use crate::error::{invalid_argument, FirestoreResult};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> FirestoreResult<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(invalid_argument(
                "Latitude must be between -90 and 90 degrees.",
            ));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(invalid_argument(
                "Longitude must be between -180 and 180 degrees.",
            ));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Lexicographic ordering by latitude then longitude. Total because the
    /// constructor rejects NaN coordinates.
    pub fn compare(&self, other: &GeoPoint) -> Ordering {
        compare_coordinate(self.latitude, other.latitude)
            .then_with(|| compare_coordinate(self.longitude, other.longitude))
    }
}

impl PartialOrd for GeoPoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare(other))
    }
}

fn compare_coordinate(left: f64, right: f64) -> Ordering {
    if left < right {
        Ordering::Less
    } else if left > right {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_coordinates() {
        let point = GeoPoint::new(10.0, 20.0).unwrap();
        assert_eq!(point.latitude(), 10.0);
        assert_eq!(point.longitude(), 20.0);
    }

    #[test]
    fn invalid_latitude() {
        let err = GeoPoint::new(100.0, 0.0).unwrap_err();
        assert_eq!(err.code_str(), "firestore/invalid-argument");
    }

    #[test]
    fn orders_latitude_before_longitude() {
        let a = GeoPoint::new(1.0, 100.0).unwrap();
        let b = GeoPoint::new(2.0, -100.0).unwrap();
        assert_eq!(a.compare(&b), Ordering::Less);

        let c = GeoPoint::new(1.0, -100.0).unwrap();
        assert_eq!(c.compare(&a), Ordering::Less);
        assert_eq!(a.compare(&a), Ordering::Equal);
    }
}
