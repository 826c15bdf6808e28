//! Search configuration parameters.

/// Exploration constant for the UCB formula.
pub const EXPLORATION: f64 = 1.4;

/// Configuration for a tree search.
#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    /// Number of simulations to run per move decision.
    pub simulations: u32,

    /// Exploration constant for the UCB formula. Only UCT reads it;
    /// PMCGS descends uniformly at random.
    pub exploration: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            simulations: 500,
            exploration: EXPLORATION,
        }
    }
}

impl SearchConfig {
    /// Fast config for tests.
    pub fn for_testing() -> Self {
        Self {
            simulations: 50,
            exploration: EXPLORATION,
        }
    }

    /// Builder pattern: set the simulation budget.
    pub fn with_simulations(mut self, n: u32) -> Self {
        self.simulations = n;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SearchConfig::default();
        assert_eq!(config.simulations, 500);
        assert!((config.exploration - 1.4).abs() < 1e-9);
    }

    #[test]
    fn test_builder_pattern() {
        let config = SearchConfig::default().with_simulations(10_000);
        assert_eq!(config.simulations, 10_000);
    }
}
