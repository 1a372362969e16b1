//! Simulation settings shared by the front ends.

use std::path::PathBuf;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::{Error, Result};
use crate::life::GameOfLife;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub rows: usize,
    pub cols: usize,
    /// `None` runs until the grid settles.
    pub max_generations: Option<u64>,
    pub randomize: bool,
    /// Seed for the initial grid; drawn from the OS when unset.
    pub seed: Option<u64>,
    pub tick: Duration,
    pub save_dir: PathBuf,
    /// Grid file to start from. Takes precedence over `rows`, `cols` and `randomize`.
    pub pattern: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: 24,
            cols: 80,
            max_generations: Some(100),
            randomize: true,
            seed: None,
            tick: Duration::from_millis(100),
            save_dir: PathBuf::from("saved"),
            pattern: None,
        }
    }
}

impl Config {
    /// Apply `LIFE_*` environment variables on top of `self`.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides found through `lookup`, which maps a variable name to its value.
    pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("LIFE_ROWS") {
            self.rows = parse_number("LIFE_ROWS", &value)?;
        }
        if let Some(value) = lookup("LIFE_COLS") {
            self.cols = parse_number("LIFE_COLS", &value)?;
        }
        if let Some(value) = lookup("LIFE_MAX_GENERATIONS") {
            self.max_generations = match value.trim() {
                "" | "0" | "none" => None,
                _ => Some(parse_number("LIFE_MAX_GENERATIONS", &value)?),
            };
        }
        if let Some(value) = lookup("LIFE_RANDOMIZE") {
            let randomize = match value.trim() {
                "1" | "true" | "yes" => Some(true),
                "0" | "false" | "no" => Some(false),
                _ => None,
            };
            self.randomize = randomize.ok_or(Error::Config {
                key: "LIFE_RANDOMIZE",
                value,
            })?;
        }
        if let Some(value) = lookup("LIFE_SEED") {
            self.seed = Some(parse_number("LIFE_SEED", &value)?);
        }
        if let Some(value) = lookup("LIFE_TICK_MS") {
            self.tick = Duration::from_millis(parse_number("LIFE_TICK_MS", &value)?);
        }
        if let Some(value) = lookup("LIFE_SAVE_DIR") {
            self.save_dir = PathBuf::from(value);
        }
        if let Some(value) = lookup("LIFE_PATTERN") {
            self.pattern = Some(PathBuf::from(value));
        }
        Ok(self)
    }

    pub fn build(&self) -> Result<GameOfLife> {
        let life = match &self.pattern {
            Some(path) => GameOfLife::from_file(path)?,
            None => {
                let mut rng = match self.seed {
                    Some(seed) => StdRng::seed_from_u64(seed),
                    None => StdRng::from_os_rng(),
                };
                GameOfLife::create(self.rows, self.cols, self.randomize, None, &mut rng)
            }
        };
        Ok(life.with_max_generations(self.max_generations))
    }
}

fn parse_number<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| Error::Config {
        key,
        value: value.to_string(),
    })
}
