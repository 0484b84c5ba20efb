use std::sync::{Arc, OnceLock};

use crate::error_responses;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Request,
    },
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use schemars::{
    schema::{Schema, SchemaObject, SubschemaValidation},
    schema_for, JsonSchema,
};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::Level;

pub use response::{ErrorResponse, ErrorResponseDocs};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("not_found")]
    NotFound(String),
    #[error("not_found")]
    RouteNotFound,

    // validation
    #[error("validation")]
    Validation(String),
    #[error("validation")]
    JsonValidation(#[from] JsonRejection),
    #[error("validation")]
    QueryValidation(#[from] QueryRejection),
    #[error("validation")]
    PathValidation(#[from] PathRejection),

    #[error(transparent)]
    Store(#[from] crate::store::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// Response

error_responses! {
    not_found: 404,
    validation: 400,
    path_validation: 400,
    query_validation: 400,
    json_validation: 400,
    unexpected: 500
}

impl From<&Error> for ErrorResponse {
    fn from(error: &Error) -> Self {
        let errors = errors();
        match error {
            Error::NotFound(message) => errors.not_found.with_message(message),
            Error::RouteNotFound => errors.not_found.with_message("Not Found"),
            Error::Validation(message) => errors.validation.with_message(message),
            Error::JsonValidation(error) => errors.json_validation.with_message(error.body_text()),
            Error::QueryValidation(error) => errors.query_validation.with_message(error.body_text()),
            Error::PathValidation(error) => errors.path_validation.with_message(error.body_text()),
            Error::Store(error) => errors
                .unexpected
                .with_message("Unexpected")
                .with_details(json!({ "source": "store", "reason": error.to_string() })),
            Error::Io(error) => errors
                .unexpected
                .with_message("Unexpected")
                .with_details(json!({ "source": "io", "reason": error.to_string() })),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let error = Arc::new(self);

        let error_res = ErrorResponse::from(error.as_ref());
        let status = error_res.status;

        let mut res = axum::Json(error_res).into_response();
        res.extensions_mut().insert(error);

        *res.status_mut() = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        res
    }
}

pub async fn on_error(request: Request, next: Next) -> Response {
    let response = next.run(request).await;

    let error = response.extensions().get::<Arc<Error>>().map(Arc::as_ref);
    if let Some(error) = error {
        let level = log_level(error);
        if level == Level::DEBUG {
            tracing::debug!("{:?}", error);
        } else if level == Level::WARN {
            tracing::warn!("{:?}", error);
        } else {
            tracing::error!("{:?}", error);
        }
    }

    response
}

fn log_level(error: &Error) -> Level {
    match error {
        Error::NotFound(_) | Error::RouteNotFound => Level::DEBUG,
        Error::Validation(_) | Error::JsonValidation(_) | Error::QueryValidation(_) | Error::PathValidation(_) => {
            Level::WARN
        }
        Error::Store(_) | Error::Io(_) => Level::ERROR,
    }
}

pub async fn not_found() -> Error {
    Error::RouteNotFound
}

mod response {
    use serde_json::Map;

    use super::*;

    #[derive(Debug, Serialize, Clone, Default, JsonSchema)]
    pub struct ErrorResponse {
        pub message: String,
        /// Diagnostic payload, always set on 500s.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub error: Option<Map<String, Value>>,
        pub kind: String,
        pub status: u16,
    }

    impl ErrorResponse {
        pub fn new(kind: impl Into<String>, status: u16) -> Self {
            Self {
                kind: kind.into(),
                status,
                ..Default::default()
            }
        }

        pub fn with_message(&self, message: impl Into<String>) -> Self {
            let mut res = self.clone();
            res.message = message.into();
            res
        }

        pub fn with_details(mut self, details: Value) -> Self {
            if let Value::Object(details) = details {
                self.error = Some(details);
            }
            self
        }
    }

    /// OpenAPI view of [`ErrorResponse`]: one variant per registered error
    /// kind, with `kind` and `status` pinned to that kind's values.
    pub struct ErrorResponseDocs;

    impl JsonSchema for ErrorResponseDocs {
        fn schema_name() -> String {
            String::from("ErrorResponse")
        }

        fn json_schema(_gen: &mut schemars::gen::SchemaGenerator) -> Schema {
            let error_schemas = errors()
                .all()
                .into_iter()
                .map(|response| {
                    let mut schema = schema_for!(ErrorResponse).schema;
                    let obj = schema.object();
                    if let Some(Schema::Object(status)) = obj.properties.get_mut("status") {
                        status.enum_values = Some(vec![Value::from(response.status)]);
                    }
                    if let Some(Schema::Object(kind)) = obj.properties.get_mut("kind") {
                        kind.enum_values = Some(vec![Value::from(response.kind.clone())]);
                    }
                    Schema::Object(schema)
                })
                .collect::<Vec<_>>();

            let schema = SchemaObject {
                subschemas: Some(Box::new(SubschemaValidation {
                    one_of: Some(error_schemas),
                    ..Default::default()
                })),
                ..Default::default()
            };

            schema.into()
        }
    }

    /// Typed responses with a custom JSON schema
    /// ```rust,ignore
    /// error_responses! {
    ///     not_found: 404,
    ///     unexpected: 500
    /// }
    ///
    /// impl From<&Error> for ErrorResponse {
    ///     fn from(error: &Error) -> Self {
    ///     let errors = errors(); // <- from macro
    ///     match error {
    ///         Error::NotFound(message) => errors.not_found.with_message(message),
    ///         Error::Io(error) => errors.unexpected.with_message(error.to_string()),
    ///     }
    /// }
    /// ```
    #[macro_export]
    macro_rules! error_responses {
        (
            $($name:ident: $code:expr),* $(,)?
        ) => {
            #[derive(Debug, Clone)]
            struct Responses {
                $(
                    $name: ErrorResponse,
                )*
            }

            impl Responses {
                fn all(&self) -> Vec<&ErrorResponse> {
                    vec![$(&self.$name,)*]
                }
            }

            static ERRORS: OnceLock<Responses> = OnceLock::new();

            fn errors() -> &'static Responses {
                ERRORS.get_or_init(|| Responses {
                    $(
                        $name: ErrorResponse::new(stringify!($name), $code),
                    )*
                })
            }
        };
    }
}
