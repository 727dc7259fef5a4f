use serde::{Deserialize, Serialize};

use crate::common::ConfigError;

/// Runtime configuration of one Ant Colony System search.
///
/// Every field has a serde default, so a partial TOML table such as
/// `[search] ant_count = 20` is enough to override a single knob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcsConfig {
    pub max_iterations: usize,
    pub max_steps: usize,
    pub ant_count: usize,
    pub exploitation: ExploitationConfig,
    pub local: PheromoneRule,
    pub global: PheromoneRule,
    /// Largest change of the best path length still counted as "no change".
    pub break_on_path_change: f32,
    /// Consecutive satisfactory iterations before stopping early. 0 disables early exit.
    pub break_on_iterations: usize,
    pub debug: DebugConfig,
}

/// `exploitation_factor = base + coeff * entropy^exp`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExploitationConfig {
    pub base: f32,
    pub coeff: f32,
    pub exp: f32,
}

/// Increment and evaporation rate of one pheromone update rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PheromoneRule {
    pub increment: f32,
    pub evaporation: f32,
}

/// Observer schedule: every `n_steps` step of every `n_iterations` iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    pub n_steps: usize,
    pub n_iterations: usize,
}

impl Default for AcsConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            max_steps: 100,
            ant_count: 10,
            exploitation: ExploitationConfig::default(),
            local: PheromoneRule::local_default(),
            global: PheromoneRule::global_default(),
            break_on_path_change: 0.0,
            break_on_iterations: 3,
            debug: DebugConfig::default(),
        }
    }
}

impl Default for ExploitationConfig {
    fn default() -> Self {
        Self { base: 0.4, coeff: 0.4, exp: 2.0 }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self { n_steps: 1, n_iterations: 1 }
    }
}

impl PheromoneRule {
    pub fn local_default() -> Self {
        Self { increment: 0.01, evaporation: 0.1 }
    }

    pub fn global_default() -> Self {
        Self { increment: 10.0, evaporation: 0.1 }
    }
}

impl ExploitationConfig {
    /// Probability of taking the best-scored edge given the previous iteration's entropy.
    /// With `coeff == 0` the factor is the constant `base`.
    pub fn factor(&self, entropy: f32) -> f32 {
        if self.coeff == 0.0 {
            return self.base;
        }
        self.base + self.coeff * entropy.powf(self.exp)
    }
}

impl DebugConfig {
    pub fn wants(&self, iteration: usize, step: usize) -> bool {
        iteration % self.n_iterations == 0 && step % self.n_steps == 0
    }
}

impl AcsConfig {
    pub fn with_ant_count(mut self, ant_count: usize) -> Self {
        self.ant_count = ant_count;
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_convergence(mut self, path_change: f32, iterations: usize) -> Self {
        self.break_on_path_change = path_change;
        self.break_on_iterations = iterations;
        self
    }

    pub fn with_exploitation(mut self, exploitation: ExploitationConfig) -> Self {
        self.exploitation = exploitation;
        self
    }

    /// Reject configurations that would misbehave mid-run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ant_count == 0 {
            return Err(ConfigError::ZeroAnts);
        }
        if self.max_steps == 0 {
            return Err(ConfigError::ZeroSteps);
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        finite("exploitation.base", self.exploitation.base)?;
        finite("exploitation.coeff", self.exploitation.coeff)?;
        finite("exploitation.exp", self.exploitation.exp)?;
        finite("break_on_path_change", self.break_on_path_change)?;
        rate("local.evaporation", self.local.evaporation)?;
        rate("global.evaporation", self.global.evaporation)?;
        increment("local.increment", self.local.increment)?;
        increment("global.increment", self.global.increment)?;
        if self.debug.n_steps == 0 {
            return Err(ConfigError::ZeroDebugInterval { field: "debug.n_steps" });
        }
        if self.debug.n_iterations == 0 {
            return Err(ConfigError::ZeroDebugInterval { field: "debug.n_iterations" });
        }
        Ok(())
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field })
    }
}

fn rate(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::RateOutOfRange { field, value })
    }
}

fn increment(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value < 0.0 {
        Err(ConfigError::NegativeIncrement { field, value })
    } else {
        Ok(())
    }
}
