//! Tunable constants of the supply model.
//!
//! [`SupplyParams::default`] reproduces the reference model exactly; any
//! change makes outputs diverge from existing clients.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Tier;
use crate::conditions::LoadThresholds;
use crate::geocode::parse_leading_integer;

/// Postal code simulated when the input is empty or not numeric (Bangalore GPO).
pub const DEFAULT_FALLBACK_POSTAL_CODE: &str = "560001";

/// Base ETA drawn as `floor(min_minutes + r * span_minutes)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EtaWindow {
    pub min_minutes: u32,
    pub span_minutes: u32,
}

impl EtaWindow {
    pub const fn new(min_minutes: u32, span_minutes: u32) -> Self {
        Self {
            min_minutes,
            span_minutes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupplyParams {
    pub fallback_postal_code: String,
    /// Distance is `0.5 + r * span`; express hubs stay close.
    pub express_distance_span_km: f64,
    pub bulk_distance_span_km: f64,
    pub express_base_eta: EtaWindow,
    pub bulk_base_eta: EtaWindow,
    /// Per-hub traffic jitter added on top of the area base factor.
    pub traffic_jitter_span: f64,
    /// A hub is offline when its draw is at or below this value.
    pub offline_probability: f64,
    pub load: LoadThresholds,
}

impl Default for SupplyParams {
    fn default() -> Self {
        Self {
            fallback_postal_code: DEFAULT_FALLBACK_POSTAL_CODE.to_string(),
            express_distance_span_km: 3.0,
            bulk_distance_span_km: 8.0,
            express_base_eta: EtaWindow::new(6, 10),
            bulk_base_eta: EtaWindow::new(25, 60),
            traffic_jitter_span: 0.3,
            offline_probability: 0.1,
            load: LoadThresholds::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamsError {
    #[error("fallback postal code {0:?} does not start with a number")]
    InvalidFallback(String),
    #[error("{field} must be a finite, non-negative number (got {value})")]
    NegativeSpan { field: &'static str, value: f64 },
    #[error("offline_probability must be within [0, 1] (got {0})")]
    OfflineProbability(f64),
    #[error("loaded threshold ({loaded}%) must be below overloaded threshold ({overloaded}%)")]
    ThresholdOrder { loaded: u32, overloaded: u32 },
    #[error("load penalties must satisfy 1.0 <= loaded ({loaded}) <= overloaded ({overloaded})")]
    PenaltyOrder { loaded: f64, overloaded: f64 },
}

impl SupplyParams {
    pub fn with_fallback_postal_code(mut self, code: impl Into<String>) -> Self {
        self.fallback_postal_code = code.into();
        self
    }

    pub fn with_distance_spans_km(mut self, express: f64, bulk: f64) -> Self {
        self.express_distance_span_km = express;
        self.bulk_distance_span_km = bulk;
        self
    }

    pub fn with_base_eta(mut self, express: EtaWindow, bulk: EtaWindow) -> Self {
        self.express_base_eta = express;
        self.bulk_base_eta = bulk;
        self
    }

    pub fn with_traffic_jitter_span(mut self, span: f64) -> Self {
        self.traffic_jitter_span = span;
        self
    }

    pub fn with_offline_probability(mut self, probability: f64) -> Self {
        self.offline_probability = probability;
        self
    }

    pub fn with_load_thresholds(mut self, load: LoadThresholds) -> Self {
        self.load = load;
        self
    }

    pub fn distance_span_km(&self, tier: Tier) -> f64 {
        match tier {
            Tier::Express => self.express_distance_span_km,
            Tier::Bulk => self.bulk_distance_span_km,
        }
    }

    pub fn base_eta(&self, tier: Tier) -> EtaWindow {
        match tier {
            Tier::Express => self.express_base_eta,
            Tier::Bulk => self.bulk_base_eta,
        }
    }

    /// Check the invariants the simulator relies on (every ETA factor >= 1.0,
    /// a usable fallback code).
    pub fn validate(&self) -> Result<(), ParamsError> {
        if parse_leading_integer(&self.fallback_postal_code).is_none() {
            return Err(ParamsError::InvalidFallback(
                self.fallback_postal_code.clone(),
            ));
        }

        for (field, value) in [
            ("express_distance_span_km", self.express_distance_span_km),
            ("bulk_distance_span_km", self.bulk_distance_span_km),
            ("traffic_jitter_span", self.traffic_jitter_span),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ParamsError::NegativeSpan { field, value });
            }
        }

        if !(0.0..=1.0).contains(&self.offline_probability) {
            return Err(ParamsError::OfflineProbability(self.offline_probability));
        }

        if self.load.loaded_pct >= self.load.overloaded_pct {
            return Err(ParamsError::ThresholdOrder {
                loaded: self.load.loaded_pct,
                overloaded: self.load.overloaded_pct,
            });
        }

        if !(self.load.loaded_penalty >= 1.0
            && self.load.overloaded_penalty >= self.load.loaded_penalty)
        {
            return Err(ParamsError::PenaltyOrder {
                loaded: self.load.loaded_penalty,
                overloaded: self.load.overloaded_penalty,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert_eq!(SupplyParams::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_non_numeric_fallback() {
        let params = SupplyParams::default().with_fallback_postal_code("none");
        assert!(matches!(params.validate(), Err(ParamsError::InvalidFallback(_))));
    }

    #[test]
    fn rejects_negative_span() {
        let params = SupplyParams::default().with_traffic_jitter_span(-0.1);
        let err = params.validate().expect_err("negative jitter");
        assert!(err.to_string().contains("traffic_jitter_span"));
    }

    #[test]
    fn rejects_inverted_thresholds_and_penalties() {
        let inverted = LoadThresholds {
            loaded_pct: 90,
            overloaded_pct: 80,
            ..LoadThresholds::default()
        };
        let params = SupplyParams::default().with_load_thresholds(inverted);
        assert!(matches!(params.validate(), Err(ParamsError::ThresholdOrder { .. })));

        let speedup = LoadThresholds {
            loaded_penalty: 0.9,
            ..LoadThresholds::default()
        };
        let params = SupplyParams::default().with_load_thresholds(speedup);
        assert!(matches!(params.validate(), Err(ParamsError::PenaltyOrder { .. })));
    }

    #[test]
    fn rejects_out_of_range_offline_probability() {
        let params = SupplyParams::default().with_offline_probability(1.5);
        assert_eq!(params.validate(), Err(ParamsError::OfflineProbability(1.5)));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let params: SupplyParams =
            serde_json::from_str(r#"{ "traffic_jitter_span": 0.5 }"#).expect("parse");
        assert_eq!(params.traffic_jitter_span, 0.5);
        assert_eq!(params.fallback_postal_code, DEFAULT_FALLBACK_POSTAL_CODE);
        assert_eq!(params.load, LoadThresholds::default());
    }

    #[test]
    fn tier_lookups() {
        let params = SupplyParams::default();
        assert_eq!(params.distance_span_km(Tier::Express), 3.0);
        assert_eq!(params.distance_span_km(Tier::Bulk), 8.0);
        assert_eq!(params.base_eta(Tier::Bulk), EtaWindow::new(25, 60));
    }
}
