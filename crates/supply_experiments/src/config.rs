//! Sweep configuration, loadable from JSON.
//!
//! ```json
//! {
//!   "space": { "kind": "random", "count": 1000, "seed": 7 },
//!   "num_threads": 4,
//!   "output_dir": "sweep-out",
//!   "params": { "traffic_jitter_span": 0.3 }
//! }
//! ```
//!
//! Every field is optional; omitted fields take their defaults.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use supply_core::params::SupplyParams;

use crate::error::SweepError;
use crate::postal_space::SpaceSource;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub space: SpaceSource,
    pub num_threads: Option<usize>,
    pub output_dir: PathBuf,
    pub show_progress: bool,
    pub params: SupplyParams,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            space: SpaceSource::default(),
            num_threads: None,
            output_dir: PathBuf::from("sweep-results"),
            show_progress: true,
            params: SupplyParams::default(),
        }
    }
}

impl SweepConfig {
    /// Read a config file and validate its model parameters.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SweepError> {
        let reader = BufReader::new(File::open(path)?);
        let config: Self = serde_json::from_reader(reader)?;
        config.params.validate()?;
        Ok(config)
    }

    pub fn with_space(mut self, space: SpaceSource) -> Self {
        self.space = space;
        self
    }

    pub fn with_num_threads(mut self, num_threads: Option<usize>) -> Self {
        self.num_threads = num_threads;
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_show_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }
}
