/// Config file loading and creation for the coffee-roulette CLI.
///
/// Config lives at ~/.config/coffee-roulette/config.toml.
/// All fields are optional. CLI args override config values.
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::bail;

#[derive(Deserialize, Default)]
pub struct RouletteConfig {
    pub data_dir: Option<String>,
    pub starters: Option<String>,
    pub conversation_starters: Option<bool>,
    pub sit_out: Option<String>,
    pub reset_when_exhausted: Option<bool>,
}

const DEFAULT_CONFIG_TEMPLATE: &str = "\
# coffee-roulette configuration
# All values here can be overridden by CLI flags.

# Directory holding matrix.json, participants.json and removed.json
# data_dir = \"/home/me/.local/share/coffee-roulette\"

# Conversation starters, one per line
# starters = \"/home/me/.local/share/coffee-roulette/starters.txt\"

# Attach a conversation starter to every pair
# conversation_starters = true

# Participant who sits out when the group is odd (random if unset)
# sit_out = \"Zane\"

# Make people eligible again once they have met everyone
# reset_when_exhausted = false
";

fn home_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| bail("HOME environment variable not set"));
    PathBuf::from(home)
}

/// Returns the default config path: ~/.config/coffee-roulette/config.toml
pub fn config_path() -> PathBuf {
    home_dir().join(".config").join("coffee-roulette").join("config.toml")
}

/// Returns the default data directory: ~/.local/share/coffee-roulette
pub fn default_data_dir() -> PathBuf {
    home_dir().join(".local").join("share").join("coffee-roulette")
}

/// Load config from a file path. Returns default (all None) if file doesn't exist.
pub fn load_config(path: &Path) -> RouletteConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_config(&content)
            .unwrap_or_else(|e| bail(format!("Failed to parse config at {}: {e}", path.display()))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => RouletteConfig::default(),
        Err(e) => bail(format!("Failed to read config at {}: {e}", path.display())),
    }
}

fn parse_config(content: &str) -> Result<RouletteConfig, toml::de::Error> {
    toml::from_str(content)
}

/// Create the default config file. Errors if it already exists.
pub fn create_default_config(path: &Path) {
    if path.exists() {
        bail(format!("Config file already exists at {}", path.display()));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .unwrap_or_else(|e| bail(format!("Failed to create directory {}: {e}", parent.display())));
    }

    std::fs::write(path, DEFAULT_CONFIG_TEMPLATE)
        .unwrap_or_else(|e| bail(format!("Failed to write config to {}: {e}", path.display())));
}
