//! Field insight models derived from live weather

use serde::{Deserialize, Serialize};

use crate::types::{round_dp, Coordinate};

/// Location whose field conditions are requested
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsightRequest {
    #[serde(default)]
    pub latitude: Option<Coordinate>,
    #[serde(default)]
    pub longitude: Option<Coordinate>,
}

impl InsightRequest {
    /// Both coordinates, if both were provided and truthy
    pub fn coordinates(&self) -> Option<(&Coordinate, &Coordinate)> {
        match (&self.latitude, &self.longitude) {
            (Some(lat), Some(lon)) if lat.is_truthy() && lon.is_truthy() => Some((lat, lon)),
            _ => None,
        }
    }
}

/// Current conditions as reported by a weather provider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    /// Air temperature (°C)
    pub temp: f64,
    /// Relative humidity (%)
    pub humidity: f64,
    /// Rain volume over the last hour (mm), zero when not reported
    pub rainfall: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSummary {
    pub temp: f64,
    pub rainfall: f64,
    pub humidity: f64,
}

/// Soil estimates inferred from rain and humidity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilMetrics {
    pub ph: f64,
    /// Organic carbon (%)
    pub carbon: f64,
    /// Nitrogen (mg/kg)
    pub nitrogen: i64,
}

impl SoilMetrics {
    pub fn from_reading(reading: &WeatherReading) -> Self {
        Self {
            ph: round_dp(6.0 + reading.rainfall / 50.0, 1),
            carbon: round_dp(1.0 + reading.humidity / 100.0, 1),
            nitrogen: 40 + (reading.rainfall / 2.0).floor() as i64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IrrigationStatus {
    Good,
    Moderate,
    Low,
}

impl std::fmt::Display for IrrigationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IrrigationStatus::Good => write!(f, "Good"),
            IrrigationStatus::Moderate => write!(f, "Moderate"),
            IrrigationStatus::Low => write!(f, "Low"),
        }
    }
}

/// Irrigation tier selected by recent rainfall
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrrigationInsight {
    pub status: IrrigationStatus,
    /// Efficiency (%)
    pub efficiency: u8,
    pub index: f64,
}

impl IrrigationInsight {
    pub fn for_rainfall(rainfall: f64) -> Self {
        if rainfall > 30.0 {
            Self {
                status: IrrigationStatus::Good,
                efficiency: 90,
                index: 0.85,
            }
        } else if rainfall > 10.0 {
            Self {
                status: IrrigationStatus::Moderate,
                efficiency: 75,
                index: 0.7,
            }
        } else {
            Self {
                status: IrrigationStatus::Low,
                efficiency: 60,
                index: 0.55,
            }
        }
    }
}

/// Everything `/insights` returns for a location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightResult {
    pub weather: WeatherSummary,
    pub soil: SoilMetrics,
    pub irrigation: IrrigationInsight,
}

/// Derive soil and irrigation insights from a weather reading
pub fn derive_insights(reading: &WeatherReading) -> InsightResult {
    InsightResult {
        weather: WeatherSummary {
            temp: round_dp(reading.temp, 1),
            rainfall: reading.rainfall,
            humidity: reading.humidity,
        },
        soil: SoilMetrics::from_reading(reading),
        irrigation: IrrigationInsight::for_rainfall(reading.rainfall),
    }
}
