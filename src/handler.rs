//! HTTP request handlers for the marketplace CRUD API
//!
//! The three resources share one generic handler set parameterized over the
//! `Resource` trait: full-collection list, create with unique-key check,
//! full-document update, and delete. The viewing list gets its own handler
//! because it additionally populates the referenced accommodation.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use rand::distr::Alphanumeric;
use rand::Rng;
use redb::{ReadableDatabase, ReadableTable};
use serde_json::json;

use crate::database::AppState;
use crate::error::ApiError;
use crate::model::{Accommodation, PopulatedViewing, Resource, Viewing};

/// Generates a server-assigned document id (12 random alphanumeric chars).
fn new_doc_id() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(12)
        .map(char::from)
        .collect()
}

/// Root health endpoint
pub async fn root() -> &'static str {
    "API is running..."
}

/// `GET /` for a resource: returns every document in the collection.
///
/// No pagination or server-side filtering; clients fetch the whole
/// collection and filter in memory.
pub async fn list<R: Resource>(State(state): State<AppState>) -> Result<Json<Vec<R>>, ApiError> {
    let read_txn = state.db.begin_read()?;
    let table = read_txn.open_table(R::TABLE)?;

    let mut documents = Vec::new();
    for entry in table.iter()? {
        let (_, value) = entry?;
        documents.push(serde_json::from_str(value.value())?);
    }

    Ok(Json(documents))
}

/// `POST /` for a resource: persists a new document.
///
/// Assigns a fresh document id, defaults any omitted date fields, and
/// enforces the business-identifier uniqueness through the index table in
/// the same write transaction. A duplicate key responds 409 Conflict.
pub async fn create<R: Resource>(
    State(state): State<AppState>,
    Json(input): Json<R::Input>,
) -> Result<impl IntoResponse, ApiError> {
    let document = R::create(new_doc_id(), input);
    let document_json = serde_json::to_string(&document)?;
    let key = document.unique_key();

    let write_txn = state.db.begin_write()?;
    {
        let mut index = write_txn.open_table(R::KEY_INDEX)?;
        if index.get(key.as_str())?.is_some() {
            return Err(ApiError::Conflict {
                field: R::KEY_FIELD,
                value: key,
            });
        }
        index.insert(key.as_str(), document.id())?;

        let mut table = write_txn.open_table(R::TABLE)?;
        table.insert(document.id(), document_json.as_str())?;
    }
    write_txn.commit()?;

    Ok((StatusCode::CREATED, Json(document)))
}

/// `PUT /{id}` for a resource: full-document replacement.
///
/// Responds 404 when the id is unknown. When the update changes the business
/// identifier, the index entry moves with it; a collision with a different
/// document responds 409. Server-managed fields (document id, creation
/// timestamps) carry over from the existing record.
pub async fn update<R: Resource>(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(input): Json<R::Input>,
) -> Result<impl IntoResponse, ApiError> {
    let write_txn = state.db.begin_write()?;

    let updated = {
        let mut table = write_txn.open_table(R::TABLE)?;

        let previous: R = match table.get(id.as_str())? {
            Some(guard) => serde_json::from_str(guard.value())?,
            None => return Err(ApiError::NotFound(R::NAME)),
        };

        let next = previous.replace(input);
        let old_key = previous.unique_key();
        let new_key = next.unique_key();

        if new_key != old_key {
            let mut index = write_txn.open_table(R::KEY_INDEX)?;
            if index.get(new_key.as_str())?.is_some() {
                return Err(ApiError::Conflict {
                    field: R::KEY_FIELD,
                    value: new_key,
                });
            }
            index.remove(old_key.as_str())?;
            index.insert(new_key.as_str(), next.id())?;
        }

        let next_json = serde_json::to_string(&next)?;
        table.insert(id.as_str(), next_json.as_str())?;
        next
    };

    write_txn.commit()?;

    Ok((StatusCode::OK, Json(updated)))
}

/// `DELETE /{id}` for a resource.
///
/// Removes the document and its index entry; responds 404 when the id is
/// unknown. No cascade: viewings referencing a deleted accommodation keep
/// their dangling reference.
pub async fn remove<R: Resource>(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let write_txn = state.db.begin_write()?;
    {
        let mut table = write_txn.open_table(R::TABLE)?;

        let document: R = match table.get(id.as_str())? {
            Some(guard) => serde_json::from_str(guard.value())?,
            None => return Err(ApiError::NotFound(R::NAME)),
        };

        table.remove(id.as_str())?;

        let key = document.unique_key();
        let mut index = write_txn.open_table(R::KEY_INDEX)?;
        index.remove(key.as_str())?;
    }
    write_txn.commit()?;

    Ok(Json(json!({
        "message": format!("{} deleted successfully", R::NAME),
        "deleted_id": id
    })))
}

/// `GET /viewing`: lists every viewing with its accommodation populated.
///
/// The stored accommodation document id is dereferenced at read time. A
/// reference left dangling by an accommodation delete resolves to `null`
/// rather than an error.
pub async fn list_viewings(
    State(state): State<AppState>,
) -> Result<Json<Vec<PopulatedViewing>>, ApiError> {
    let read_txn = state.db.begin_read()?;
    let viewings = read_txn.open_table(Viewing::TABLE)?;
    let accommodations = read_txn.open_table(Accommodation::TABLE)?;

    let mut results = Vec::new();
    for entry in viewings.iter()? {
        let (_, value) = entry?;
        let viewing: Viewing = serde_json::from_str(value.value())?;

        let residence = match accommodations.get(viewing.residence_id.as_str())? {
            Some(guard) => serde_json::from_str::<Accommodation>(guard.value()).ok(),
            None => None,
        };

        results.push(PopulatedViewing::new(viewing, residence));
    }

    Ok(Json(results))
}
