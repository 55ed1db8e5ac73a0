use axum::{extract::State, http::StatusCode, Json};
use tracing::{error, info, instrument, warn};

use crate::records::dto::{
    CreateRecordRequest, DeleteRecordRequest, DeleteResult, UpdateRecordRequest,
};
use crate::records::model::{CredentialRecord, Envelope, RecordFields};
use crate::state::AppState;

type ApiError<T> = (StatusCode, Json<Envelope<T>>);

fn server_error<T>() -> ApiError<T> {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(Envelope::fail("Server Error")),
    )
}

#[instrument(skip(state))]
pub async fn list_records(
    State(state): State<AppState>,
) -> Result<Json<Vec<CredentialRecord>>, ApiError<CredentialRecord>> {
    match state.store.list().await {
        Ok(records) => {
            info!(count = records.len(), "listed records");
            Ok(Json(records))
        }
        Err(e) => {
            error!(error = %e, "list records failed");
            Err(server_error())
        }
    }
}

#[instrument(skip(state, payload))]
pub async fn create_record(
    State(state): State<AppState>,
    Json(payload): Json<CreateRecordRequest>,
) -> Result<Json<Envelope<CredentialRecord>>, ApiError<CredentialRecord>> {
    let fields = RecordFields {
        site: payload.site,
        username: payload.username,
        password: payload.password,
    };
    match state.store.create(fields).await {
        Ok(record) => {
            info!(id = %record.id, site = %record.site, "record created");
            Ok(Json(Envelope::ok(record)))
        }
        Err(e) => {
            error!(error = %e, "create record failed");
            Err(server_error())
        }
    }
}

#[instrument(skip(state, payload))]
pub async fn update_record(
    State(state): State<AppState>,
    Json(payload): Json<UpdateRecordRequest>,
) -> Result<Json<Envelope<CredentialRecord>>, ApiError<CredentialRecord>> {
    let (Some(id), Some(site), Some(username), Some(password)) =
        (payload.id, payload.site, payload.username, payload.password)
    else {
        warn!("update rejected: missing fields");
        return Err((
            StatusCode::BAD_REQUEST,
            Json(Envelope::fail("Missing fields")),
        ));
    };

    let fields = RecordFields {
        site,
        username,
        password,
    };
    match state.store.update(id, fields.clone()).await {
        Ok(true) => {
            info!(%id, "record updated");
            Ok(Json(Envelope::ok(CredentialRecord::from_fields(id, fields))))
        }
        Ok(false) => {
            warn!(%id, "update matched no record");
            Ok(Json(Envelope::fail("No changes made")))
        }
        Err(e) => {
            error!(error = %e, %id, "update record failed");
            Err(server_error())
        }
    }
}

#[instrument(skip(state, payload))]
pub async fn delete_record(
    State(state): State<AppState>,
    Json(payload): Json<DeleteRecordRequest>,
) -> Result<Json<Envelope<DeleteResult>>, ApiError<DeleteResult>> {
    match state.store.delete(payload.id).await {
        Ok(deleted_count) => {
            info!(id = %payload.id, deleted_count, "record deleted");
            Ok(Json(Envelope::ok(DeleteResult { deleted_count })))
        }
        Err(e) => {
            error!(error = %e, id = %payload.id, "delete record failed");
            Err(server_error())
        }
    }
}
