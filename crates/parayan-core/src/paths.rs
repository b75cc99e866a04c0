use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const PARAYAN_DIR: &str = ".parayan";
pub const CONFIG_FILE: &str = ".parayan/config.yaml";

/// Groups blob, named after its original storage key.
pub const GROUPS_FILE: &str = ".parayan/kalpavriksha_groups_v1.json";

/// Single-roster blob written before groups existed.
pub const LEGACY_MEMBERS_FILE: &str = ".parayan/kalpavriksha_members_v1.json";

/// Last generated message and the id of the group it was rendered for.
pub const MESSAGE_FILE: &str = ".parayan/message.json";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn parayan_dir(root: &Path) -> PathBuf {
    root.join(PARAYAN_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn groups_path(root: &Path) -> PathBuf {
    root.join(GROUPS_FILE)
}

pub fn legacy_members_path(root: &Path) -> PathBuf {
    root.join(LEGACY_MEMBERS_FILE)
}

pub fn message_path(root: &Path) -> PathBuf {
    root.join(MESSAGE_FILE)
}
