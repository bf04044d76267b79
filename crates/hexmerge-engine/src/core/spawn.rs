use rand::{
    Rng,
    distr::{
        Distribution,
        weighted::{Error as WeightError, WeightedIndex},
    },
};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

use super::{hex_layout::HexLayout, tile::Tile};

/// One entry of a [`SpawnDistribution`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnWeight {
    pub value: u64,
    pub weight: f64,
}

impl SpawnWeight {
    #[must_use]
    pub const fn new(value: u64, weight: f64) -> Self {
        Self { value, weight }
    }
}

/// Weighted random choice of the value of a newly spawned tile.
///
/// Weights are relative; they do not need to sum to one. The default is the
/// usual tile-merge convention of 2 with weight 0.9 and 4 with weight 0.1.
///
/// Serialized as a list of `{ "value": .., "weight": .. }` entries and
/// validated again on deserialization.
///
/// # Example
///
/// ```
/// use hexmerge_engine::{SpawnDistribution, SpawnWeight, Tile};
/// use rand::SeedableRng as _;
/// use rand_pcg::Pcg32;
///
/// let only_fours = SpawnDistribution::new([SpawnWeight::new(4, 1.0)])?;
/// let mut rng = Pcg32::seed_from_u64(7);
/// assert_eq!(only_fours.sample(&mut rng), Tile::FOUR);
///
/// assert!(SpawnDistribution::new([SpawnWeight::new(2, -1.0)]).is_err());
/// # Ok::<(), hexmerge_engine::ConfigError>(())
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<SpawnWeight>", into = "Vec<SpawnWeight>")]
pub struct SpawnDistribution {
    tiles: Vec<Tile>,
    weights: Vec<f64>,
    index: WeightedIndex<f64>,
}

impl Default for SpawnDistribution {
    fn default() -> Self {
        Self::new([SpawnWeight::new(2, 0.9), SpawnWeight::new(4, 0.1)])
            .expect("default spawn distribution should be valid")
    }
}

impl PartialEq for SpawnDistribution {
    fn eq(&self, other: &Self) -> bool {
        self.tiles == other.tiles && self.weights == other.weights
    }
}

impl SpawnDistribution {
    pub fn new<I>(entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = SpawnWeight>,
    {
        let mut tiles = vec![];
        let mut weights = vec![];
        for SpawnWeight { value, weight } in entries {
            let tile = Tile::from_value(value).ok_or(ConfigError::InvalidTileValue { value })?;
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigError::InvalidWeight { value, weight });
            }
            tiles.push(tile);
            weights.push(weight);
        }
        if tiles.is_empty() {
            return Err(ConfigError::EmptyDistribution);
        }
        if !weights.iter().sum::<f64>().is_finite() {
            return Err(ConfigError::TotalWeightOverflow);
        }
        let index = WeightedIndex::new(&weights).map_err(|e| match e {
            WeightError::InsufficientNonZero => ConfigError::ZeroTotalWeight,
            _ => ConfigError::TotalWeightOverflow,
        })?;
        Ok(Self {
            tiles,
            weights,
            index,
        })
    }

    pub fn entries(&self) -> impl Iterator<Item = SpawnWeight> + '_ {
        self.tiles
            .iter()
            .zip(&self.weights)
            .map(|(tile, weight)| SpawnWeight::new(tile.value(), *weight))
    }

    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Draws a tile value.
    pub fn sample<R>(&self, rng: &mut R) -> Tile
    where
        R: Rng + ?Sized,
    {
        self.tiles[self.index.sample(rng)]
    }

    /// Draws either an empty cell or a tile.
    ///
    /// `empty_weight` is weighed against [`Self::total_weight`], so with the
    /// default distribution an `empty_weight` of 2.0 leaves two cells in three
    /// empty.
    pub fn sample_or_empty<R>(&self, rng: &mut R, empty_weight: f64) -> Option<Tile>
    where
        R: Rng + ?Sized,
    {
        let total = empty_weight + self.total_weight();
        let roll: f64 = rng.random::<f64>() * total;
        if roll < empty_weight {
            return None;
        }
        Some(self.sample(rng))
    }
}

impl TryFrom<Vec<SpawnWeight>> for SpawnDistribution {
    type Error = ConfigError;

    fn try_from(entries: Vec<SpawnWeight>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<SpawnDistribution> for Vec<SpawnWeight> {
    fn from(distribution: SpawnDistribution) -> Self {
        distribution.entries().collect()
    }
}

/// How the board is filled when a session starts.
///
/// Serialized with a `policy` tag:
///
/// ```json
/// { "policy": "sparse", "tiles": 2 }
/// { "policy": "dense", "empty_weight": 2.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "kebab-case")]
pub enum FillPolicy {
    /// Spawn `tiles` tiles on an otherwise empty board.
    Sparse {
        #[serde(default = "FillPolicy::default_sparse_tiles")]
        tiles: usize,
    },
    /// Draw every cell independently: empty with `empty_weight`, otherwise a
    /// tile from the spawn distribution.
    Dense {
        #[serde(default = "FillPolicy::default_empty_weight")]
        empty_weight: f64,
    },
}

impl Default for FillPolicy {
    fn default() -> Self {
        Self::sparse()
    }
}

impl FillPolicy {
    const fn default_sparse_tiles() -> usize {
        2
    }

    const fn default_empty_weight() -> f64 {
        2.0
    }

    #[must_use]
    pub const fn sparse() -> Self {
        FillPolicy::Sparse {
            tiles: Self::default_sparse_tiles(),
        }
    }

    #[must_use]
    pub const fn dense() -> Self {
        FillPolicy::Dense {
            empty_weight: Self::default_empty_weight(),
        }
    }

    /// Checks that the policy can be applied to a board of `layout`.
    pub fn validate(&self, layout: &HexLayout) -> Result<(), ConfigError> {
        match *self {
            FillPolicy::Sparse { tiles } => {
                let cells = layout.cell_count();
                if tiles > cells {
                    return Err(ConfigError::TooManyInitialTiles { tiles, cells });
                }
            }
            FillPolicy::Dense { empty_weight } => {
                if !empty_weight.is_finite() || empty_weight < 0.0 {
                    return Err(ConfigError::InvalidEmptyWeight {
                        weight: empty_weight,
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_default_distribution() {
        let dist = SpawnDistribution::default();
        let entries: Vec<_> = dist.entries().collect();
        assert_eq!(
            entries,
            [SpawnWeight::new(2, 0.9), SpawnWeight::new(4, 0.1)]
        );
        assert!((dist.total_weight() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_default_distribution_mostly_twos() {
        let dist = SpawnDistribution::default();
        let mut rng = Pcg32::seed_from_u64(42);
        let twos = (0..1000)
            .filter(|_| dist.sample(&mut rng) == Tile::TWO)
            .count();
        assert!((800..=980).contains(&twos), "twos = {twos}");
    }

    #[test]
    fn test_zero_weight_entry_never_drawn() {
        let dist = SpawnDistribution::new([SpawnWeight::new(2, 0.0), SpawnWeight::new(8, 3.0)])
            .unwrap();
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..100 {
            assert_eq!(dist.sample(&mut rng).value(), 8);
        }
    }

    #[test]
    fn test_invalid_distributions() {
        assert_eq!(
            SpawnDistribution::new(Vec::<SpawnWeight>::new()),
            Err(ConfigError::EmptyDistribution)
        );
        assert_eq!(
            SpawnDistribution::new([SpawnWeight::new(3, 1.0)]),
            Err(ConfigError::InvalidTileValue { value: 3 })
        );
        assert_eq!(
            SpawnDistribution::new([SpawnWeight::new(1, 1.0)]),
            Err(ConfigError::InvalidTileValue { value: 1 })
        );
        assert_eq!(
            SpawnDistribution::new([SpawnWeight::new(2, -0.5)]),
            Err(ConfigError::InvalidWeight {
                value: 2,
                weight: -0.5
            })
        );
        assert!(matches!(
            SpawnDistribution::new([SpawnWeight::new(2, f64::NAN)]),
            Err(ConfigError::InvalidWeight { value: 2, .. })
        ));
        assert_eq!(
            SpawnDistribution::new([SpawnWeight::new(2, 0.0), SpawnWeight::new(4, 0.0)]),
            Err(ConfigError::ZeroTotalWeight)
        );
        assert_eq!(
            SpawnDistribution::new([
                SpawnWeight::new(2, f64::MAX),
                SpawnWeight::new(4, f64::MAX)
            ]),
            Err(ConfigError::TotalWeightOverflow)
        );
        assert!(SpawnDistribution::new([SpawnWeight::new(2, f64::MAX)]).is_ok());
    }

    #[test]
    fn test_sample_or_empty_extremes() {
        let dist = SpawnDistribution::default();
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..50 {
            assert!(dist.sample_or_empty(&mut rng, 0.0).is_some());
        }
        let empties = (0..1000)
            .filter(|_| dist.sample_or_empty(&mut rng, 1000.0).is_none())
            .count();
        assert!(empties > 990, "empties = {empties}");
    }

    #[test]
    fn test_distribution_serde() {
        let json = r#"[{"value": 2, "weight": 3.0}, {"value": 16, "weight": 1.0}]"#;
        let dist: SpawnDistribution = serde_json::from_str(json).unwrap();
        let entries: Vec<_> = dist.entries().collect();
        assert_eq!(
            entries,
            [SpawnWeight::new(2, 3.0), SpawnWeight::new(16, 1.0)]
        );
        let back = serde_json::to_string(&dist).unwrap();
        assert_eq!(back, r#"[{"value":2,"weight":3.0},{"value":16,"weight":1.0}]"#);

        let bad = r#"[{"value": 2, "weight": -1.0}]"#;
        let err = serde_json::from_str::<SpawnDistribution>(bad).unwrap_err();
        assert!(err.to_string().contains("non-negative"));
    }

    #[test]
    fn test_fill_policy_validate() {
        let layout = HexLayout::new(2).unwrap();
        assert!(FillPolicy::Sparse { tiles: 7 }.validate(&layout).is_ok());
        assert_eq!(
            FillPolicy::Sparse { tiles: 8 }.validate(&layout),
            Err(ConfigError::TooManyInitialTiles { tiles: 8, cells: 7 })
        );
        assert!(FillPolicy::dense().validate(&layout).is_ok());
        assert!(
            FillPolicy::Dense { empty_weight: -1.0 }
                .validate(&layout)
                .is_err()
        );
    }

    #[test]
    fn test_fill_policy_serde() {
        let policy: FillPolicy = serde_json::from_str(r#"{"policy": "sparse"}"#).unwrap();
        assert_eq!(policy, FillPolicy::Sparse { tiles: 2 });
        let policy: FillPolicy =
            serde_json::from_str(r#"{"policy": "dense", "empty_weight": 0.5}"#).unwrap();
        assert_eq!(policy, FillPolicy::Dense { empty_weight: 0.5 });
        let json = serde_json::to_string(&FillPolicy::dense()).unwrap();
        assert_eq!(json, r#"{"policy":"dense","empty_weight":2.0}"#);
    }
}
