mod fixtures;
mod notes;

use std::sync::{Arc, Mutex};

pub use notes::{Notes, FIRST_ID};

use crate::config;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("note store lock poisoned")]
    Poisoned,
    #[error("invalid fixtures: {0}")]
    Fixtures(#[from] serde_json::Error),
}

/// Shared handle to the note collection.
///
/// Every operation runs inside [`NoteStore::call`], which holds the lock for
/// the whole closure, so id assignment and read-modify-write updates are
/// serialized across requests.
#[derive(Clone, Debug, Default)]
pub struct NoteStore {
    notes: Arc<Mutex<Notes>>,
}

impl NoteStore {
    pub fn new(notes: Notes) -> Self {
        Self {
            notes: Arc::new(Mutex::new(notes)),
        }
    }

    pub fn call<F, R>(&self, function: F) -> Result<R>
    where
        F: FnOnce(&mut Notes) -> R,
    {
        let mut notes = self.notes.lock().map_err(|_| Error::Poisoned)?;
        Ok(function(&mut notes))
    }
}

pub async fn init_store() -> Result<NoteStore> {
    let notes = if config().seed {
        let fixtures = fixtures::load()?;
        tracing::debug!("seeding store with {} notes", fixtures.len());
        Notes::seeded(fixtures)
    } else {
        Notes::default()
    };

    Ok(NoteStore::new(notes))
}

#[cfg(test)]
pub async fn init_test_store() -> Result<NoteStore> {
    Ok(NoteStore::new(Notes::seeded(fixtures::load()?)))
}
