use axum::extract::FromRef;

use crate::store::NoteStore;

#[derive(FromRef, Clone)]
pub struct AppState {
    pub store: NoteStore,
}
