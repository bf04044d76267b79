use serde::{Deserialize, Serialize};

use crate::{
    ConfigError,
    core::{FillPolicy, HexLayout, SpawnDistribution},
};

/// Settings fixed when a [`GameSession`](super::GameSession) is created.
///
/// Every field has a default, so a configuration file only needs the fields
/// it changes:
///
/// ```json
/// {
///   "radius": 4,
///   "spawn": [{ "value": 2, "weight": 0.8 }, { "value": 4, "weight": 0.2 }],
///   "fill": { "policy": "dense", "empty_weight": 2.0 }
/// }
/// ```
///
/// # Example
///
/// ```
/// use hexmerge_engine::{FillPolicy, SessionConfig};
///
/// let config: SessionConfig = serde_json::from_str(r#"{ "radius": 4 }"#)?;
/// assert_eq!(config.radius, 4);
/// assert_eq!(config.fill, FillPolicy::sparse());
/// assert_eq!(config.validate()?.cell_count(), 37);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Hexagon radius, at least 2.
    pub radius: usize,
    /// Distribution of newly spawned tile values.
    pub spawn: SpawnDistribution,
    /// How the board is filled at the start.
    pub fill: FillPolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            radius: Self::DEFAULT_RADIUS,
            spawn: SpawnDistribution::default(),
            fill: FillPolicy::default(),
        }
    }
}

impl SessionConfig {
    pub const DEFAULT_RADIUS: usize = 3;

    #[must_use]
    pub fn with_radius(radius: usize) -> Self {
        Self {
            radius,
            ..Self::default()
        }
    }

    /// Checks the configuration and returns the board layout it describes.
    pub fn validate(&self) -> Result<HexLayout, ConfigError> {
        let layout = HexLayout::new(self.radius)?;
        self.fill.validate(&layout)?;
        Ok(layout)
    }
}
