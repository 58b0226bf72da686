//! Fixed bias-region table used to scope text searches.
//!
//! Each region maps to a circular geographic bias (center + radius in meters).
//! The table is read-only and process-wide; unknown keys are rejected at parse
//! time, before any upstream call is made.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

/// A circular location bias: center point plus radius in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BiasCircle {
    pub center: LatLng,
    pub radius: f64,
}

/// Named bias region. The set is fixed; extending it is a code change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiasRegion {
    Tokyo,
    Fukuoka,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown region '{0}'; supported regions: tokyo, fukuoka")]
pub struct UnknownRegion(pub String);

impl BiasRegion {
    /// All supported regions, in a stable order.
    #[must_use]
    pub const fn all() -> [BiasRegion; 2] {
        [BiasRegion::Tokyo, BiasRegion::Fukuoka]
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            BiasRegion::Tokyo => "tokyo",
            BiasRegion::Fukuoka => "fukuoka",
        }
    }

    /// The bias circle for this region.
    #[must_use]
    pub const fn bias(self) -> BiasCircle {
        match self {
            BiasRegion::Tokyo => BiasCircle {
                center: LatLng {
                    latitude: 35.6762,
                    longitude: 139.6503,
                },
                radius: 25_000.0,
            },
            BiasRegion::Fukuoka => BiasCircle {
                center: LatLng {
                    latitude: 33.5902,
                    longitude: 130.4017,
                },
                radius: 15_000.0,
            },
        }
    }
}

impl std::fmt::Display for BiasRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BiasRegion {
    type Err = UnknownRegion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tokyo" => Ok(BiasRegion::Tokyo),
            "fukuoka" => Ok(BiasRegion::Fukuoka),
            other => Err(UnknownRegion(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokyo_bias_matches_table() {
        let bias = BiasRegion::Tokyo.bias();
        assert!((bias.center.latitude - 35.6762).abs() < f64::EPSILON);
        assert!((bias.center.longitude - 139.6503).abs() < f64::EPSILON);
        assert!((bias.radius - 25_000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn fukuoka_bias_matches_table() {
        let bias = BiasRegion::Fukuoka.bias();
        assert!((bias.center.latitude - 33.5902).abs() < f64::EPSILON);
        assert!((bias.center.longitude - 130.4017).abs() < f64::EPSILON);
        assert!((bias.radius - 15_000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn parse_is_trimmed_and_case_insensitive() {
        assert_eq!(" Tokyo ".parse::<BiasRegion>(), Ok(BiasRegion::Tokyo));
        assert_eq!("FUKUOKA".parse::<BiasRegion>(), Ok(BiasRegion::Fukuoka));
    }

    #[test]
    fn unknown_region_is_rejected() {
        let err = "osaka".parse::<BiasRegion>().expect_err("should fail");
        assert_eq!(err, UnknownRegion("osaka".to_string()));
    }

    #[test]
    fn serde_uses_lowercase_keys() {
        assert_eq!(
            serde_json::to_string(&BiasRegion::Fukuoka).expect("serialize"),
            "\"fukuoka\""
        );
        let parsed: BiasRegion = serde_json::from_str("\"tokyo\"").expect("deserialize");
        assert_eq!(parsed, BiasRegion::Tokyo);
    }
}
