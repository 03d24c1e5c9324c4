//! Codec configuration.
//!
//! Deployment-level switches shared by every codec call. Loadable from
//! JSON; missing fields take their defaults.

use serde::{Deserialize, Serialize};

use crate::geometry::transform::{WEB_MERCATOR, WGS84};
use crate::topology_error::TopologyError;

/// Configuration for encoding and decoding topologies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopologyConfig {
    /// Locate features through path aggregations ("dynamic segmentation").
    /// When disabled, client payloads are raw geometry literals.
    /// Default: true
    pub linear_referencing: bool,

    /// SRID of coordinates exchanged with clients.
    /// Default: 4326
    pub wire_srid: u32,

    /// SRID of the path network geometries.
    /// Default: 3857
    pub network_srid: u32,

    /// Kind given to point topologies whose payload omits `kind`.
    /// Default: "TOPOLOGY"
    pub default_kind: String,
}

impl Default for TopologyConfig {
    fn default() -> Self {
        Self {
            linear_referencing: true,
            wire_srid: WGS84,
            network_srid: WEB_MERCATOR,
            default_kind: "TOPOLOGY".to_string(),
        }
    }
}

impl TopologyConfig {
    /// Parse a JSON document; absent fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, TopologyError> {
        serde_json::from_str(json)
            .map_err(|e| TopologyError::Config(e.to_string()))
    }

    pub fn with_linear_referencing(mut self, enabled: bool) -> Self {
        self.linear_referencing = enabled;
        self
    }

    pub fn with_srids(mut self, wire_srid: u32, network_srid: u32) -> Self {
        self.wire_srid = wire_srid;
        self.network_srid = network_srid;
        self
    }

    pub fn with_default_kind(mut self, kind: impl Into<String>) -> Self {
        self.default_kind = kind.into();
        self
    }
}
