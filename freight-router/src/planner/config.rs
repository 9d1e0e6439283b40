//! Search configuration for the route planner.

/// Configuration parameters for route search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Depth of the forward and backward port reachability searches.
    ///
    /// This is the maximum number of legs between the origin and a kept
    /// port, and between that port and the destination. A port exactly
    /// `max_hops` legs away still counts.
    ///
    /// Larger values widen the candidate network at higher cost. A value
    /// smaller than the number of legs in the best itinerary makes that
    /// itinerary invisible, and a reachable destination can appear
    /// unreachable.
    pub max_hops: usize,
}

impl SearchConfig {
    /// Default hop bound for the connectivity pruner.
    pub const DEFAULT_MAX_HOPS: usize = 4;

    /// Create a new configuration with the given hop bound.
    pub fn new(max_hops: usize) -> Self {
        Self { max_hops }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_hops: Self::DEFAULT_MAX_HOPS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        assert_eq!(SearchConfig::default().max_hops, 4);
    }

    #[test]
    fn custom_config() {
        assert_eq!(SearchConfig::new(7).max_hops, 7);
    }
}
