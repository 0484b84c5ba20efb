use crate::{Error, Result};

use super::{NewNote, NoteChanges, NotePayload};

pub const MISSING_TITLE: &str = "Missing `title` in request body";

impl NotePayload {
    pub fn into_new_note(self) -> Result<NewNote> {
        Ok(NewNote {
            title: required_title(self.title)?,
            content: self.content.unwrap_or_default(),
        })
    }

    /// Missing title is rejected on update as well, with the same error as create.
    pub fn into_changes(self) -> Result<NoteChanges> {
        Ok(NoteChanges {
            title: Some(required_title(self.title)?),
            content: self.content,
        })
    }
}

fn required_title(title: Option<String>) -> Result<String> {
    match title {
        Some(title) if !title.is_empty() => Ok(title),
        _ => Err(Error::Validation(MISSING_TITLE.into())),
    }
}
