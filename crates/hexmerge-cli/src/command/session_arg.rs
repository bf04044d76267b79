use std::path::PathBuf;

use anyhow::Context as _;
use hexmerge_engine::{FillPolicy, GameSession, SessionConfig, SpawnSeed};
use rand::Rng as _;

use crate::util;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub(crate) enum FillArg {
    #[default]
    Sparse,
    Dense,
}

impl From<FillArg> for FillPolicy {
    fn from(fill: FillArg) -> Self {
        match fill {
            FillArg::Sparse => FillPolicy::sparse(),
            FillArg::Dense => FillPolicy::dense(),
        }
    }
}

/// Options shared by every command that starts a game.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SessionArg {
    /// Session config file (JSON format)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Hexagon radius, overrides the config file
    #[arg(long)]
    radius: Option<usize>,
    /// Initial fill (sparse or dense), overrides the config file
    #[arg(long)]
    fill: Option<FillArg>,
    /// Spawn seed as 32 hex digits (random if omitted)
    #[arg(long)]
    seed: Option<SpawnSeed>,
    /// Print boards without colors
    #[arg(long, default_value_t = false)]
    no_color: bool,
}

impl SessionArg {
    pub(crate) fn color(&self) -> bool {
        !self.no_color
    }

    pub(crate) fn session_config(&self) -> anyhow::Result<SessionConfig> {
        let mut config = match &self.config {
            Some(path) => {
                eprintln!("Loading session config from {}", path.display());
                util::read_json_file("session config", path)?
            }
            None => SessionConfig::default(),
        };
        if let Some(radius) = self.radius {
            config.radius = radius;
        }
        if let Some(fill) = self.fill {
            // Keep a configured tile count or empty weight when the policy matches
            if !matches!(
                (fill, &config.fill),
                (FillArg::Sparse, FillPolicy::Sparse { .. }) | (FillArg::Dense, FillPolicy::Dense { .. })
            ) {
                config.fill = fill.into();
            }
        }
        Ok(config)
    }

    pub(crate) fn start(&self) -> anyhow::Result<GameSession> {
        let config = self.session_config()?;
        let seed = self.seed.unwrap_or_else(|| rand::rng().random());
        eprintln!("Spawn seed: {seed}");
        GameSession::with_seed(config, seed).context("Invalid session config")
    }
}
