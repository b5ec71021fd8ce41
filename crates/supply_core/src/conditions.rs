//! Ambient conditions and load classification.
//!
//! ETA jitter is a product of multiplicative factors, each >= 1.0:
//!
//! 1. Area traffic level (one draw per simulation) plus per-hub jitter
//! 2. Area weather (one draw per simulation)
//! 3. Hub load penalty
//!
//! Factor 1.0 = no delay; 1.5 = 50% slower than the base ETA.

use serde::{Deserialize, Serialize};

use crate::rng::SeededLcg;

/// Sequence index used for the area traffic draw.
pub const TRAFFIC_SAMPLE_INDEX: u64 = 50;
/// Sequence index used for the area weather draw.
pub const WEATHER_SAMPLE_INDEX: u64 = 51;

// ---------------------------------------------------------------------------
// Traffic
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrafficLevel {
    Light,
    Moderate,
    High,
}

impl TrafficLevel {
    /// - `> 0.7`: High
    /// - `> 0.4`: Moderate
    /// - otherwise Light
    pub fn from_sample(sample: f64) -> Self {
        if sample > 0.7 {
            Self::High
        } else if sample > 0.4 {
            Self::Moderate
        } else {
            Self::Light
        }
    }

    pub fn base_factor(self) -> f64 {
        match self {
            Self::High => 1.6,
            Self::Moderate => 1.2,
            Self::Light => 1.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Moderate => "Moderate",
            Self::Light => "Light",
        }
    }
}

// ---------------------------------------------------------------------------
// Weather
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeatherCondition {
    Clear,
    #[serde(rename = "Light Rain")]
    LightRain,
    #[serde(rename = "Heavy Rain")]
    HeavyRain,
}

impl WeatherCondition {
    /// - `> 0.85`: Heavy Rain
    /// - `> 0.7`: Light Rain
    /// - otherwise Clear
    pub fn from_sample(sample: f64) -> Self {
        if sample > 0.85 {
            Self::HeavyRain
        } else if sample > 0.7 {
            Self::LightRain
        } else {
            Self::Clear
        }
    }

    pub fn base_factor(self) -> f64 {
        match self {
            Self::HeavyRain => 1.5,
            Self::LightRain => 1.2,
            Self::Clear => 1.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::HeavyRain => "Heavy Rain",
            Self::LightRain => "Light Rain",
            Self::Clear => "Clear",
        }
    }

    pub fn is_raining(self) -> bool {
        !matches!(self, Self::Clear)
    }
}

/// Area-wide conditions shared by every hub of one simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmbientConditions {
    pub traffic: TrafficLevel,
    pub weather: WeatherCondition,
}

impl AmbientConditions {
    pub fn sample(rng: &SeededLcg) -> Self {
        Self {
            traffic: TrafficLevel::from_sample(rng.at(TRAFFIC_SAMPLE_INDEX)),
            weather: WeatherCondition::from_sample(rng.at(WEATHER_SAMPLE_INDEX)),
        }
    }
}

// ---------------------------------------------------------------------------
// Hub load
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HubStatus {
    Healthy,
    Loaded,
    Overloaded,
}

impl HubStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Healthy => "Healthy",
            Self::Loaded => "Loaded",
            Self::Overloaded => "Overloaded",
        }
    }
}

/// Load thresholds (percent, exclusive) and the ETA penalty applied above each.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadThresholds {
    pub loaded_pct: u32,
    pub overloaded_pct: u32,
    pub loaded_penalty: f64,
    pub overloaded_penalty: f64,
}

impl Default for LoadThresholds {
    fn default() -> Self {
        Self {
            loaded_pct: 70,
            overloaded_pct: 85,
            loaded_penalty: 1.2,
            overloaded_penalty: 1.5,
        }
    }
}

impl LoadThresholds {
    pub fn classify(&self, load_pct: u32) -> HubStatus {
        if load_pct > self.overloaded_pct {
            HubStatus::Overloaded
        } else if load_pct > self.loaded_pct {
            HubStatus::Loaded
        } else {
            HubStatus::Healthy
        }
    }

    pub fn penalty(&self, load_pct: u32) -> f64 {
        match self.classify(load_pct) {
            HubStatus::Overloaded => self.overloaded_penalty,
            HubStatus::Loaded => self.loaded_penalty,
            HubStatus::Healthy => 1.0,
        }
    }
}
