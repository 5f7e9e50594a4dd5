//! Navigation host configuration types

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_START_DESTINATION;

/// Navigation host configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Destination pushed when the host starts
    pub start_destination: String,

    /// Language catalog summaries are translated into
    pub native_language: String,

    /// Language catalog articles are written in
    pub learning_language: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            start_destination: DEFAULT_START_DESTINATION.to_string(),
            native_language: "English".to_string(),
            learning_language: "Spanish".to_string(),
        }
    }
}
