use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;
use serde_json::json;

use super::bootstrap::{BootstrapError, CsvBootstrap};
use super::repository::ContactRepository;

/// Router builder exposing the contact list and the bootstrap trigger.
pub fn contacts_router<R>(repository: Arc<R>) -> Router
where
    R: ContactRepository + 'static,
{
    Router::new()
        .route("/api/v1/contacts", get(list_handler::<R>))
        .route("/api/v1/contacts/bootstrap", post(bootstrap_handler::<R>))
        .with_state(repository)
}

/// Bootstrap request carrying either a server-side export path or inline CSV
/// content, exactly one of the two.
#[derive(Debug, Deserialize)]
pub(crate) struct BootstrapRequest {
    #[serde(default)]
    path: Option<PathBuf>,
    #[serde(default)]
    csv: Option<String>,
}

pub(crate) async fn list_handler<R>(State(repository): State<Arc<R>>) -> Response
where
    R: ContactRepository + 'static,
{
    match repository.find_all() {
        Ok(contacts) => (StatusCode::OK, axum::Json(contacts)).into_response(),
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn bootstrap_handler<R>(
    State(repository): State<Arc<R>>,
    axum::Json(request): axum::Json<BootstrapRequest>,
) -> Response
where
    R: ContactRepository + 'static,
{
    let outcome = match (request.path, request.csv) {
        (Some(path), None) => CsvBootstrap::new(path, repository.clone()).boot(),
        (None, Some(csv)) => CsvBootstrap::load(Cursor::new(csv.into_bytes()), repository.as_ref()),
        _ => {
            let payload = json!({ "error": "provide exactly one of 'path' or 'csv'" });
            return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
        }
    };

    match outcome {
        Ok(()) => match repository.find_all() {
            Ok(contacts) => {
                let payload = json!({ "contacts": contacts.len() });
                (StatusCode::OK, axum::Json(payload)).into_response()
            }
            Err(error) => {
                let payload = json!({ "error": error.to_string() });
                (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
            }
        },
        Err(error @ (BootstrapError::Io(_) | BootstrapError::Csv(_))) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
