use serde_derive::{Deserialize, Serialize};

/// Options of [`super::RangeImageProjector`]. Everything is off by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectorParams {
    /// Keep range, intensity and elongation of each point in `PointCloud::features`.
    pub keep_polar_features: bool,
    /// Drop points flagged as inside a no-label zone.
    pub filter_no_label_zone: bool,
    /// Project the lasers on the rayon thread pool.
    pub parallel: bool,
}

impl ProjectorParams {
    /// Parses parameters from JSON text, missing fields take their default value.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn keep_polar_features(mut self, value: bool) -> Self {
        self.keep_polar_features = value;
        self
    }

    pub fn filter_no_label_zone(mut self, value: bool) -> Self {
        self.filter_no_label_zone = value;
        self
    }

    pub fn parallel(mut self, value: bool) -> Self {
        self.parallel = value;
        self
    }
}
