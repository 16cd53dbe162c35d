//! Configuration handling for fsmctl.
//! Loads the state machine description of a game from a JSON or YAML
//! document and checks that the handlers it describes can be named
//! without collisions.
//!
//! ```json
//! {
//!   "game_key": "dice",
//!   "game_name": "Dice",
//!   "before": true,
//!   "after": false,
//!   "state": {
//!     "idle": [{"Event": "start", "To": "running"}],
//!     "running": [{"Event": "stop", "To": "idle"}]
//!   }
//! }
//! ```

use crate::error::{Error, Result};
use crate::naming::{derive_name, game_type_name, handler_file_stem, handler_identity};
use indexmap::IndexMap;
use log::{debug, warn};
use serde::{Deserialize, Deserializer};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// A single outgoing edge of a state.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StateTransition {
    /// Event that triggers the transition.
    #[serde(rename = "Event", alias = "event", default)]
    pub event: String,

    /// Name of the target state. It is not required to be a declared state.
    #[serde(rename = "To", alias = "to", default)]
    pub to: String,
}

impl StateTransition {
    pub fn new(event: impl Into<String>, to: impl Into<String>) -> Self {
        Self { event: event.into(), to: to.into() }
    }
}

/// The state machine description of one game.
///
/// States keep the order in which they are declared in the document; the
/// first declared state is the initial state of the machine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GameConfig {
    /// Identifier of the game, used for type, module and file names.
    #[serde(default)]
    pub game_key: String,

    /// Human readable name, only used in generated comments.
    #[serde(default)]
    pub game_name: String,

    /// Outgoing transitions of every state.
    #[serde(rename = "state", default, deserialize_with = "null_as_default")]
    pub states: IndexMap<String, Vec<StateTransition>>,

    /// Whether a global Before hook is generated.
    #[serde(rename = "before", default)]
    pub has_before_hook: bool,

    /// Whether a global After hook is generated.
    #[serde(rename = "after", default)]
    pub has_after_hook: bool,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl GameConfig {
    /// The first declared state, or `None` for a machine without states.
    pub fn initial_state(&self) -> Option<&str> {
        self.states.keys().next().map(String::as_str)
    }

    /// Iterates over every (state, transition) pair in declaration order.
    pub fn transitions(&self) -> impl Iterator<Item = (&str, &StateTransition)> {
        self.states
            .iter()
            .flat_map(|(state, transitions)| transitions.iter().map(move |t| (state.as_str(), t)))
    }

    /// Checks the invariants the generator relies on.
    ///
    /// # Errors
    /// Returns a human readable reason if:
    /// - `game_key` is empty
    /// - a state or event name derives to an empty identifier
    /// - a state lists the same event twice
    /// - two (state, event) pairs would produce the same handler name or file
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.game_key.trim().is_empty() {
            return Err("game_key is required".to_string());
        }

        let game_type = game_type_name(&self.game_key);
        let mut stems: HashMap<String, (String, &str, &str)> = HashMap::new();

        for (state, transitions) in &self.states {
            if derive_name(state).is_empty() {
                return Err(format!("state '{state}' does not contain a usable name"));
            }

            let mut events = HashSet::new();
            for transition in transitions {
                if derive_name(&transition.event).is_empty() {
                    return Err(format!(
                        "event '{}' in state '{state}' does not contain a usable name",
                        transition.event
                    ));
                }
                if !events.insert(transition.event.as_str()) {
                    return Err(format!(
                        "event '{}' is declared twice in state '{state}'",
                        transition.event
                    ));
                }

                let identity = handler_identity(&game_type, state, &transition.event);
                let stem = handler_file_stem(&identity);
                if let Some((other, other_state, other_event)) = stems.get(&stem) {
                    return Err(format!(
                        "handlers for ('{other_state}', '{other_event}') and ('{state}', '{}') collide as '{other}' and '{identity}'",
                        transition.event
                    ));
                }
                stems.insert(stem, (identity, state.as_str(), transition.event.as_str()));
            }
        }

        for (state, transition) in self.transitions() {
            if !self.states.contains_key(&transition.to) {
                warn!(
                    "Transition '{}' of state '{}' targets undeclared state '{}'",
                    transition.event, state, transition.to
                );
            }
        }

        Ok(())
    }
}

/// Document formats accepted by the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
    /// JSON first, YAML if that fails.
    Auto,
}

impl ConfigFormat {
    /// Picks the format from the file extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension().and_then(|ext| ext.to_str()) {
            Some("json") => ConfigFormat::Json,
            Some("yml") | Some("yaml") => ConfigFormat::Yaml,
            _ => ConfigFormat::Auto,
        }
    }
}

fn decode(content: &str, format: ConfigFormat) -> std::result::Result<GameConfig, String> {
    match format {
        ConfigFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        ConfigFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        ConfigFormat::Auto => match serde_json::from_str(content) {
            Ok(config) => Ok(config),
            Err(json_err) => {
                debug!("Content is not JSON ({json_err}), trying YAML");
                serde_yaml::from_str(content).map_err(|_| json_err.to_string())
            }
        },
    }
}

/// Decodes and validates configuration content.
///
/// # Arguments
/// * `content` - Raw document
/// * `format` - How to decode it
/// * `origin` - Where the content came from, used in error messages
///
/// # Errors
/// * `Error::ConfigParse` if decoding or validation fails
pub fn parse_config<P: AsRef<Path>>(
    content: &str,
    format: ConfigFormat,
    origin: P,
) -> Result<GameConfig> {
    let origin = origin.as_ref();
    let config = decode(content, format)
        .and_then(|config| config.validate().map(|_| config))
        .map_err(|reason| Error::ConfigParse { path: origin.to_path_buf(), reason })?;

    debug!(
        "Loaded game '{}' with {} states and {} transitions",
        config.game_key,
        config.states.len(),
        config.transitions().count()
    );
    Ok(config)
}

/// Reads a configuration file and decodes it by its extension.
///
/// # Errors
/// * `Error::ConfigRead` if the file cannot be read
/// * `Error::ConfigParse` if the content is invalid
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<GameConfig> {
    let path = path.as_ref();
    debug!("Loading configuration from {}", path.display());

    let content = std::fs::read_to_string(path)
        .map_err(|source| Error::ConfigRead { path: path.to_path_buf(), source })?;

    parse_config(&content, ConfigFormat::from_path(path), path)
}
