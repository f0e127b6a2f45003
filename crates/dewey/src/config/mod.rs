//! Search configuration and its builder.

/// Longest search string the parser will consider, in characters.
pub const MAX_SEARCH_STRING_LEN: usize = 128;

/// Tunable limits for query parsing and result assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Maximum search string length in characters; longer input is truncated
    pub max_search_string_len: usize,
    /// Radius in meters for single-geotarget candidate collection
    pub single_geotarget_radius_m: f64,
    /// Maximum results for focused searches (single place, library near a point)
    pub focused_result_limit: usize,
    /// Maximum results for broad searches (state-wide, name-only)
    pub broad_result_limit: usize,
}

impl SearchConfig {
    pub fn builder() -> SearchConfigBuilder {
        SearchConfigBuilder::default()
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_search_string_len: MAX_SEARCH_STRING_LEN,
            single_geotarget_radius_m: 300_000.0, // 300 km
            focused_result_limit: 3,
            broad_result_limit: 20,
        }
    }
}

/// Builder for assembling a [`SearchConfig`] field by field
#[derive(Debug, Clone, Default)]
pub struct SearchConfigBuilder {
    config: SearchConfig,
}

impl SearchConfigBuilder {
    /// Create a new builder with sensible defaults
    pub fn new() -> Self {
        Self {
            config: SearchConfig::default(),
        }
    }

    /// Create a builder tuned for tight local results (smaller radius, fewer hits)
    pub fn focused() -> Self {
        let mut builder = Self::new();
        builder.config.single_geotarget_radius_m = 150_000.0;
        builder.config.broad_result_limit = 10;
        builder
    }

    /// Create a builder tuned for wide-net searches (larger radius, more hits)
    pub fn expansive() -> Self {
        let mut builder = Self::new();
        builder.config.single_geotarget_radius_m = 500_000.0;
        builder.config.broad_result_limit = 50;
        builder
    }

    /// Set the maximum search string length (clamped to 16..=1024)
    pub fn max_search_string_len(mut self, len: usize) -> Self {
        self.config.max_search_string_len = len.clamp(16, 1024);
        self
    }

    /// Set the single-geotarget search radius in kilometers (clamped to 1..=20000)
    pub fn search_radius_km(mut self, km: f64) -> Self {
        self.config.single_geotarget_radius_m = km.clamp(1.0, 20_000.0) * 1_000.0;
        self
    }

    /// Set the result limit for focused searches (at least 1)
    pub fn focused_result_limit(mut self, limit: usize) -> Self {
        self.config.focused_result_limit = limit.max(1);
        self
    }

    /// Set the result limit for broad searches (at least 1)
    pub fn broad_result_limit(mut self, limit: usize) -> Self {
        self.config.broad_result_limit = limit.max(1);
        self
    }

    /// Build the final configuration
    pub fn build(self) -> SearchConfig {
        self.config
    }
}
