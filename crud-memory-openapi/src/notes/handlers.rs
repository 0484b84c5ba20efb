use crate::{ctx::BaseParams, Error, Result};

use super::{Note, NoteId, NotePayload};

fn note_not_found() -> Error {
    Error::NotFound("Note not found".into())
}

/// A path segment that is not a note id cannot name an existing note.
fn parse_note_id(note_id: &str) -> Result<NoteId> {
    note_id.parse().map_err(|_| note_not_found())
}

pub async fn find_notes(search_term: Option<String>, BaseParams { store, ctx }: BaseParams) -> Result<Vec<Note>> {
    let notes = store.call(|notes| notes.list(search_term.as_deref()))?;
    Ok(notes)
}

pub async fn get_note(note_id: &str, BaseParams { store, ctx }: BaseParams) -> Result<Note> {
    let note_id = parse_note_id(note_id)?;
    store.call(|notes| notes.get(note_id))?.ok_or_else(note_not_found)
}

pub async fn create_note(payload: NotePayload, BaseParams { store, ctx }: BaseParams) -> Result<Note> {
    let new_note = payload.into_new_note()?;
    let note = store.call(|notes| notes.create(new_note))?;

    tracing::debug!(request_id = %ctx.request_id, note_id = note.id, "note created");
    Ok(note)
}

pub async fn update_note(note_id: &str, payload: NotePayload, BaseParams { store, ctx }: BaseParams) -> Result<Note> {
    let changes = payload.into_changes()?;
    let note_id = parse_note_id(note_id)?;
    let note = store
        .call(|notes| notes.update(note_id, changes))?
        .ok_or_else(note_not_found)?;

    tracing::debug!(request_id = %ctx.request_id, note_id, "note updated");
    Ok(note)
}

pub async fn delete_note(note_id: &str, BaseParams { store, ctx }: BaseParams) -> Result<()> {
    let note_id = parse_note_id(note_id)?;
    if !store.call(|notes| notes.delete(note_id))? {
        return Err(note_not_found());
    }

    tracing::debug!(request_id = %ctx.request_id, note_id, "note deleted");
    Ok(())
}
