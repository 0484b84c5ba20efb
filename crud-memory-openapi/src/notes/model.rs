use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub type NoteId = u64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request body of `POST /v1/notes` and `PUT /v1/notes/{id}`.
///
/// Only `title` and `content` are recognized; any other key is dropped during
/// deserialization.
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct NotePayload {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Validated fields of a note about to be inserted.
#[derive(Debug, Clone, Deserialize)]
pub struct NewNote {
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// Fields to overwrite on an existing note. `None` leaves the field as is.
#[derive(Debug, Clone, Default)]
pub struct NoteChanges {
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct FindNotes {
    /// Case-sensitive substring of the note title
    #[serde(rename = "searchTerm")]
    pub search_term: Option<String>,
}
