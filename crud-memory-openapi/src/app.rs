use aide::scalar::Scalar;
use axum::{
    body::Body,
    handler::HandlerWithoutStateExt,
    middleware::{self},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    trace::{self, TraceLayer},
};

use crate::config;

use serde_json::json;

use crate::{
    ctx::{BaseParams, REQUEST_ID_HEADER},
    errors::{self, not_found, on_error, ErrorResponseDocs},
    openapi::{
        self,
        aide::axum::{ApiRouter, IntoApiResponse},
        OpenApi,
    },
    state::AppState,
    store::NoteStore,
};

pub struct AppParams<Router>
where
    Router: FnOnce(AppState) -> ApiRouter,
{
    pub store: NoteStore,
    pub router: Router,
}

pub async fn create<R>(AppParams { store, router }: AppParams<R>) -> errors::Result<(Router, OpenApi)>
where
    R: FnOnce(AppState) -> ApiRouter,
{
    let mut api = OpenApi::default();

    let state = AppState { store: store.clone() };

    let api_router = axum::Router::new()
        .route(
            "/__docs__",
            get(Scalar::new("/__docs__/spec.json").with_title("Notes API").axum_handler()),
        )
        .route("/__docs__/spec.json", get(serve_docs));

    // unmatched paths try the public dir first, then fall through to a JSON 404
    let assets = ServeDir::new(&config().public_dir)
        .call_fallback_on_method_not_allowed(true)
        .not_found_service(not_found.into_service());

    let app = ApiRouter::new()
        .route("/__version__", get(version))
        .route("/__heartbeat__", get(heartbeat))
        .route("/__lbheartbeat__", get(lbheartbeat))
        .merge(api_router)
        .merge(router(state.clone()))
        .finish_api_with(&mut api, |t| {
            t.title("Notes").default_response::<openapi::Json<ErrorResponseDocs>>()
        })
        .method_not_allowed_fallback(not_found)
        .fallback_service(assets)
        .layer(
            ServiceBuilder::new()
                .layer(Extension(store))
                .layer(Extension(Arc::new(api.clone())))
                .layer(middleware::from_fn(on_error)),
        );

    Ok((add_tracing_layer(app), api))
}

fn add_tracing_layer(app: Router) -> Router {
    app.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(|request: &axum::http::Request<Body>| {
                        let request_id = request
                            .headers()
                            .get(REQUEST_ID_HEADER)
                            .and_then(|v| v.to_str().ok())
                            .unwrap_or_default();
                        tracing::span!(
                            tracing::Level::DEBUG,
                            "request",
                            method = %request.method(),
                            request_id = request_id,
                            uri = %request.uri(),
                        )
                    })
                    .on_request(trace::DefaultOnRequest::new())
                    .on_response(trace::DefaultOnResponse::new().include_headers(false))
                    .on_failure(trace::DefaultOnFailure::new()),
            ),
    )
}

async fn version() -> impl IntoResponse {
    let config = &config();
    Json(json!({
        "source" : config.source,
        "version": config.app_version.as_deref().unwrap_or(&config.version),
        "commit" : config.git_commit,
        "build"  : config.pipeline_id
    }))
}

async fn heartbeat(BaseParams { store, .. }: BaseParams) -> errors::Result<impl IntoResponse> {
    let notes = store.call(|notes| notes.len())?;

    Ok(Json(json!({
        "status" : "ok",
        "notes": notes,
    })))
}

async fn lbheartbeat() -> impl IntoResponse {
    ""
}

async fn serve_docs(Extension(api): Extension<Arc<OpenApi>>) -> impl IntoApiResponse {
    openapi::Json(api.as_ref()).into_response()
}

#[cfg(test)]
mod tests {
    use aide::axum::ApiRouter;
    use axum::http::{HeaderName, HeaderValue, StatusCode};
    use serde_json::Value;

    use crate::{errors::Result, store::init_test_store, tests::test_server};

    #[tokio::test]
    async fn unmatched_path_is_json_404() -> Result<()> {
        let server = test_server(init_test_store().await?, crate::notes::router).await?;
        let response = server.get("/bad/path").await;

        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
        let body = response.json::<Value>();
        assert_eq!(body["message"], "Not Found");
        assert_eq!(body["kind"], "not_found");
        assert!(body.get("error").is_none());
        Ok(())
    }

    #[tokio::test]
    async fn unmatched_method_is_json_404() -> Result<()> {
        let server = test_server(init_test_store().await?, crate::notes::router).await?;

        let response = server.patch("/v1/notes/1000").await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(response.json::<Value>()["message"], "Not Found");

        let response = server.delete("/v1/notes").await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

        let response = server.post("/bad/path").await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(response.json::<Value>()["message"], "Not Found");
        Ok(())
    }

    #[tokio::test]
    async fn index_page_is_served() -> Result<()> {
        let server = test_server(init_test_store().await?, |_| ApiRouter::new()).await?;
        let response = server.get("/").await;

        assert_eq!(response.status_code(), StatusCode::OK);
        assert!(response.header("content-type").to_str().unwrap().starts_with("text/html"));
        Ok(())
    }

    #[tokio::test]
    async fn request_id_is_echoed() -> Result<()> {
        let server = test_server(init_test_store().await?, crate::notes::router).await?;

        let response = server
            .get("/v1/notes/1000")
            .add_header(HeaderName::from_static("x-request-id"), HeaderValue::from_static("abc"))
            .await;
        assert_eq!(response.header("x-request-id"), "abc");

        let response = server.get("/v1/notes/1000").await;
        assert!(!response.header("x-request-id").is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn heartbeat_reports_note_count() -> Result<()> {
        let server = test_server(init_test_store().await?, crate::notes::router).await?;
        server.delete("/v1/notes/1000").await;

        let response = server.get("/__heartbeat__").await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let body = response.json::<Value>();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["notes"], 9);
        Ok(())
    }

    #[tokio::test]
    async fn version_and_lbheartbeat() -> Result<()> {
        let server = test_server(init_test_store().await?, crate::notes::router).await?;

        let response = server.get("/__version__").await;
        assert_eq!(response.status_code(), StatusCode::OK);
        assert!(response.json::<Value>().get("commit").is_some());

        let response = server.get("/__lbheartbeat__").await;
        assert_eq!(response.status_code(), StatusCode::OK);
        assert!(response.text().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn openapi_spec_lists_note_routes() -> Result<()> {
        let server = test_server(init_test_store().await?, crate::notes::router).await?;
        let response = server.get("/__docs__/spec.json").await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let spec = response.json::<Value>();
        assert!(spec["paths"].get("/v1/notes").is_some());
        let note_path = &spec["paths"]["/v1/notes/{id}"];
        assert_eq!(note_path["get"]["summary"], "Get a note by its id");
        assert_eq!(note_path["put"]["summary"], "Update a note");
        assert_eq!(note_path["delete"]["summary"], "Delete a note");
        Ok(())
    }
}
