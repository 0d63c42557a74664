use serde::{Deserialize, Serialize};

/// WGS84 latitude/longitude in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// New York City
pub const REFERENCE_POINT: Coordinates = Coordinates {
    lat: 40.7128,
    lng: -74.0060,
};

impl Coordinates {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    /// Stable 64-bit seed derived from the coordinate bits
    pub fn seed(&self) -> u64 {
        let a = splitmix64(self.lat.to_bits());
        splitmix64(a ^ self.lng.to_bits().rotate_left(17))
    }
}

impl Default for Coordinates {
    fn default() -> Self {
        REFERENCE_POINT
    }
}

fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E3779B97F4A7C15);
    let mut r = z;
    r = (r ^ (r >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    r = (r ^ (r >> 27)).wrapping_mul(0x94D049BB133111EB);
    r ^ (r >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 0.0, true)]
    #[case(90.0, 180.0, true)]
    #[case(-90.0, -180.0, true)]
    #[case(90.1, 0.0, false)]
    #[case(0.0, -180.5, false)]
    #[case(f64::NAN, 0.0, false)]
    #[case(0.0, f64::INFINITY, false)]
    fn test_validity(#[case] lat: f64, #[case] lng: f64, #[case] expected: bool) {
        assert_eq!(Coordinates::new(lat, lng).is_valid(), expected);
    }

    #[test]
    fn test_seed_is_stable_and_position_sensitive() {
        let nyc = REFERENCE_POINT;
        assert_eq!(nyc.seed(), Coordinates::new(40.7128, -74.0060).seed());
        assert_ne!(nyc.seed(), Coordinates::new(-74.0060, 40.7128).seed());
    }
}
