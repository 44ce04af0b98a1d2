//! PipelineBlueprint - Config Loader output
//!
//! Describes one complete dispatch run: where invoices come from, which threshold selects
//! them, and where they are sent.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::Invoice;

/// Default low-value threshold, in monetary units
pub const DEFAULT_LOW_VALUE_THRESHOLD: Decimal = Decimal::ONE_HUNDRED;

/// Configuration version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// Complete pipeline configuration blueprint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineBlueprint {
    /// Configuration version
    #[serde(default)]
    pub version: ConfigVersion,

    /// Record store settings
    #[serde(default)]
    pub store: StoreConfig,

    /// Filter stage settings
    #[serde(default)]
    pub filter: FilterConfig,

    /// Output sink
    pub sink: SinkConfig,
}

/// Record store configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store backend
    #[serde(default)]
    pub store_type: StoreType,

    /// Database file (sqlite only)
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Invoices loaded into a memory store on open, or inserted by `seed`
    #[serde(default)]
    pub seed: Vec<Invoice>,
}

/// Store backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreType {
    /// Process-local store, lost on exit
    #[default]
    Memory,
    /// SQLite database file
    Sqlite,
}

/// Filter stage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Invoices strictly below this amount are dispatched
    #[serde(default = "default_threshold")]
    pub threshold: Decimal,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
        }
    }
}

fn default_threshold() -> Decimal {
    DEFAULT_LOW_VALUE_THRESHOLD
}

/// Sink output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinkConfig {
    /// Sink name
    pub name: String,

    /// Sink type
    #[serde(default)]
    pub sink_type: SinkType,

    /// Type-specific parameters
    #[serde(default)]
    pub params: HashMap<String, String>,
}

/// Sink type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SinkType {
    /// Log output
    #[default]
    Log,
    /// JSON lines appended to a file
    File,
    /// Scripted failures, for rehearsals
    Mock,
}

impl PipelineBlueprint {
    /// Blueprint with a memory store, the default threshold and the given sink
    pub fn with_sink(sink: SinkConfig) -> Self {
        Self {
            version: ConfigVersion::V1,
            store: StoreConfig::default(),
            filter: FilterConfig::default(),
            sink,
        }
    }
}
