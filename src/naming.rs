//! Canonical identifiers derived from loosely formatted configuration strings.
//!
//! Every generated type, function and file name goes through this module,
//! so the same raw string always maps to the same identifier. That is what
//! lets a second run find the handler files written by the first one.

/// Characters that separate words in a raw configuration string.
pub const SEPARATORS: [char; 4] = ['_', '-', ' ', '/'];

/// Suffix appended to the derived game key to build the controller type.
pub const GAME_SUFFIX: &str = "Game";

/// Suffix of every generated handler function.
pub const HANDLER_SUFFIX: &str = "Handler";

/// Suffix of the handler module (package) name.
pub const HANDLER_MODULE_SUFFIX: &str = "_handler";

/// Suffix of the controller file stem.
pub const CONTROLLER_FILE_SUFFIX: &str = "_game";

/// Converts a raw string to an upper camel case identifier.
///
/// The input is split on [`SEPARATORS`]; every non-empty segment gets its
/// first character upper-cased and the rest lower-cased, and the segments
/// are joined in order.
///
/// ```
/// use fsmctl::naming::derive_name;
///
/// assert_eq!(derive_name("room_game"), "RoomGame");
/// assert_eq!(derive_name("room-game"), "RoomGame");
/// assert_eq!(derive_name("ROOM/game"), "RoomGame");
/// assert_eq!(derive_name(""), "");
/// ```
pub fn derive_name(raw: &str) -> String {
    raw.split(SEPARATORS.as_slice())
        .filter(|segment| !segment.is_empty())
        .map(capitalize)
        .collect()
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => {
            let mut word: String = first.to_uppercase().collect();
            word.push_str(&chars.as_str().to_lowercase());
            word
        }
        None => String::new(),
    }
}

/// Name of the generated controller type, e.g. `RoomGame` for `room`.
pub fn game_type_name(game_key: &str) -> String {
    format!("{}{GAME_SUFFIX}", derive_name(game_key))
}

/// Name of the handler module, e.g. `room_handler` for `Room`.
pub fn handler_module(game_key: &str) -> String {
    format!("{}{HANDLER_MODULE_SUFFIX}", game_key.to_lowercase())
}

/// File stem of the controller artifact, e.g. `room_game` for `Room`.
pub fn controller_file_stem(game_key: &str) -> String {
    format!("{}{CONTROLLER_FILE_SUFFIX}", game_key.to_lowercase())
}

/// Exported function name of the handler for a (state, event) pair.
///
/// Takes the already derived game type name so callers that loop over many
/// transitions derive it only once.
pub fn handler_identity(game_type: &str, state: &str, event: &str) -> String {
    format!("{game_type}{}{}{HANDLER_SUFFIX}", derive_name(state), derive_name(event))
}

/// File stem of a handler artifact: the identity lower-cased, with the
/// trailing handler marker removed.
pub fn handler_file_stem(identity: &str) -> String {
    let lowered = identity.to_lowercase();
    match lowered.strip_suffix(&HANDLER_SUFFIX.to_lowercase()) {
        Some(stem) => stem.to_string(),
        None => lowered,
    }
}
