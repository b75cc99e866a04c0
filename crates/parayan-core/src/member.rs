use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One reader in a group roster.
///
/// Field names follow the persisted blob (`currentChapter`), so groups saved
/// by earlier versions load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub name: String,
    pub current_chapter: u32,
}

impl Member {
    pub fn new(name: impl Into<String>, current_chapter: u32) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            current_chapter,
        }
    }

    pub fn with_id(id: impl Into<String>, name: impl Into<String>, current_chapter: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            current_chapter,
        }
    }
}

/// Fresh random identifier for members and groups.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}
