use std::{fmt, str::FromStr};

use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Seed for deterministic tile spawning.
///
/// A 128-bit (16-byte) seed for the session's random number generator.
/// Using the same seed and the same moves replays the same game, which
/// makes sessions reproducible for debugging and testing.
///
/// Displayed, parsed and serialized as 32 lowercase hex digits.
///
/// # Example
///
/// ```
/// use hexmerge_engine::SpawnSeed;
/// use rand::Rng as _;
///
/// let seed: SpawnSeed = rand::rng().random();
/// let parsed: SpawnSeed = seed.to_string().parse()?;
/// assert_eq!(parsed, seed);
/// # Ok::<(), hexmerge_engine::ParseSeedError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpawnSeed([u8; 16]);

/// A seed string that is not 32 hex digits.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid seed {input:?}: expected 32 hex digits")]
pub struct ParseSeedError {
    #[error(not(source))]
    pub input: String,
}

impl SpawnSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn from_u128(num: u128) -> Self {
        Self(num.to_be_bytes())
    }

    #[must_use]
    pub const fn to_u128(self) -> u128 {
        u128::from_be_bytes(self.0)
    }

    /// Creates the generator this seed stands for.
    #[must_use]
    pub fn rng(self) -> Pcg32 {
        rand::SeedableRng::from_seed(self.0)
    }
}

impl fmt::Display for SpawnSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.to_u128())
    }
}

impl FromStr for SpawnSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = || ParseSeedError {
            input: s.to_owned(),
        };
        // from_str_radix alone would also accept a leading '+'
        if s.len() != 32 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(error());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| error())?;
        Ok(Self::from_u128(num))
    }
}

impl Serialize for SpawnSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SpawnSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `SpawnSeed` values with `rng.random()`.
impl Distribution<SpawnSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> SpawnSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        SpawnSeed(seed)
    }
}
