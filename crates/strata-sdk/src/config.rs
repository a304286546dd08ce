// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Engine configuration.

use serde::Deserialize;

/// Top-level engine configuration.
///
/// Every field has a sensible default, and unknown JSON fields are ignored,
/// so a config file only needs to name what it overrides.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Window creation parameters.
    pub window: WindowConfig,
}

/// Window creation parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// The window title.
    pub title: String,
    /// Initial inner width, in logical pixels.
    pub width: u32,
    /// Initial inner height, in logical pixels.
    pub height: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Strata Engine".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

impl EngineConfig {
    /// Parses a configuration from a JSON document.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_reasonable() {
        let config = EngineConfig::default();
        assert_eq!(config.window.title, "Strata Engine");
        assert_eq!((config.window.width, config.window.height), (1280, 720));
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config = EngineConfig::from_json(r#"{ "window": { "title": "Demo" } }"#)
            .expect("valid config JSON");
        assert_eq!(config.window.title, "Demo");
        assert_eq!(config.window.width, 1280);
    }

    #[test]
    fn empty_json_is_the_default_config() {
        let config = EngineConfig::from_json("{}").expect("valid config JSON");
        assert_eq!(config.window.height, 720);
    }
}
