use crate::{
    ctx::BaseParams,
    openapi::{
        aide::{
            axum::{routing::get_with, ApiRouter, IntoApiResponse},
            NoApi,
        },
        Created, Json, NoContent, Path, Query,
    },
    state::AppState,
};

use schemars::JsonSchema;

use serde::Deserialize;

use super::{FindNotes, NotePayload};

use super::handlers;

pub const NOTES_PATH: &str = "/v1/notes";

#[derive(Debug, Deserialize, JsonSchema)]
struct NoteIdPath {
    /// Ids that are not unsigned integers never match a note.
    id: String,
}

pub fn router(state: AppState) -> ApiRouter {
    ApiRouter::new()
        .api_route(
            NOTES_PATH,
            get_with(find_notes, |t| t.summary("List notes, optionally filtered by title"))
                .post_with(create_note, |t| t.summary("Create a note")),
        )
        .api_route(
            &format!("{NOTES_PATH}/{{id}}"),
            get_with(get_note, |t| t.summary("Get a note by its id"))
                .put_with(update_note, |t| t.summary("Update a note"))
                .delete_with(delete_note, |t| t.summary("Delete a note")),
        )
        .with_state(state)
}

async fn find_notes(
    Query(FindNotes { search_term }): Query<FindNotes>,
    NoApi(base): NoApi<BaseParams>,
) -> impl IntoApiResponse {
    handlers::find_notes(search_term, base).await.map(Json)
}

async fn create_note(NoApi(base): NoApi<BaseParams>, Json(payload): Json<NotePayload>) -> impl IntoApiResponse {
    handlers::create_note(payload, base).await.map(|note| Created {
        location: format!("{NOTES_PATH}/{}", note.id),
        body: note,
    })
}

async fn get_note(Path(NoteIdPath { id }): Path<NoteIdPath>, NoApi(base): NoApi<BaseParams>) -> impl IntoApiResponse {
    handlers::get_note(&id, base).await.map(Json)
}

async fn update_note(
    Path(NoteIdPath { id }): Path<NoteIdPath>,
    NoApi(base): NoApi<BaseParams>,
    Json(payload): Json<NotePayload>,
) -> impl IntoApiResponse {
    handlers::update_note(&id, payload, base).await.map(Json)
}

async fn delete_note(Path(NoteIdPath { id }): Path<NoteIdPath>, NoApi(base): NoApi<BaseParams>) -> impl IntoApiResponse {
    handlers::delete_note(&id, base).await.map(|_| NoContent)
}
