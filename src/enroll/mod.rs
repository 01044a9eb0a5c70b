use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use hyper::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::store::{self, Store};

mod guard;

#[derive(Serialize, Deserialize, ToSchema)]
pub(super) enum EnrollError {
    #[schema(example = "All fields are required")]
    Validation(String),
    #[schema(example = "User already enrolled")]
    Conflict(String),
    #[schema(example = "A server error occurred during submission")]
    Store(String),
}

#[derive(Serialize, Deserialize, Default, ToSchema)]
#[serde(default)]
pub(super) struct EnrollPayload {
    #[schema(example = "Asha Verma")]
    pub name: String,
    #[schema(example = "9999999999")]
    pub phone: String,
    #[schema(example = "asha@example.com")]
    pub email: String,
    #[schema(example = "St. Mary's School")]
    pub school_name: String,
    #[serde(rename = "class")]
    #[schema(example = "10")]
    pub class_name: String,
    #[schema(example = "admin@example.com")]
    pub admin_email: String,
}

impl EnrollPayload {
    // Absent fields deserialize to empty strings; whitespace-only values
    // pass this check.
    pub(super) fn missing_field(&self) -> bool {
        [
            &self.name,
            &self.phone,
            &self.email,
            &self.school_name,
            &self.class_name,
            &self.admin_email,
        ]
        .iter()
        .any(|field| field.is_empty())
    }
}

#[derive(Serialize, Deserialize, ToSchema)]
pub(super) struct EnrollAck {
    #[schema(example = "User information saved")]
    pub message: String,
}

#[utoipa::path(
    post,
    path = "/enrollment",
    request_body = EnrollPayload,
    responses(
        (status = 201, description = "Enrollment saved successfully", body = EnrollAck),
        (status = 400, description = "A required field is missing", body = EnrollError),
        (status = 409, description = "Phone or email already enrolled", body = EnrollError),
        (status = 500, description = "Store failure", body = EnrollError)
    )
)]
#[axum::debug_handler]
pub(super) async fn create_enrollment(
    State(store): State<Arc<Store>>,
    Json(payload): Json<EnrollPayload>,
) -> impl IntoResponse {
    if payload.missing_field() {
        return (
            StatusCode::BAD_REQUEST,
            Json(EnrollError::Validation("All fields are required".to_string())),
        )
            .into_response();
    }

    match guard::already_enrolled(&store, &payload.phone, &payload.email).await {
        Ok(true) => {
            return (
                StatusCode::CONFLICT,
                Json(EnrollError::Conflict("User already enrolled".to_string())),
            )
                .into_response()
        }
        Ok(false) => {}
        Err(err) => return store_failure("duplicate check failed", err),
    }

    let submission_date = submission_timestamp(Utc::now());

    let q = "--sql
        insert into enrollments (name, phone, email, school_name, class, admin_name, submission_date)
        values ($1, $2, $3, $4, $5, $6, $7);
    ";

    let q_result = sqlx::query(q)
        .bind(&payload.name)
        .bind(&payload.phone)
        .bind(&payload.email)
        .bind(&payload.school_name)
        .bind(&payload.class_name)
        .bind(&payload.admin_email)
        .bind(&submission_date)
        .execute(store.pool())
        .await;

    match q_result {
        // A racing submission can slip past the guard; the unique indexes
        // on phone and email still reject it here.
        Err(err) if store::is_unique_violation(&err) => (
            StatusCode::CONFLICT,
            Json(EnrollError::Conflict("User already enrolled".to_string())),
        )
            .into_response(),
        Err(err) => store_failure("enrollment insert failed", err),
        Ok(_) => (
            StatusCode::CREATED,
            Json(EnrollAck {
                message: "User information saved".to_string(),
            }),
        )
            .into_response(),
    }
}

/// Renders the instant in India Standard Time the way the admin UI shows it,
/// e.g. "23/5/2024, 10:15:00 am". Display-only, never parsed back.
pub(super) fn submission_timestamp(instant: DateTime<Utc>) -> String {
    instant
        .with_timezone(&chrono_tz::Asia::Kolkata)
        .format("%-d/%-m/%Y, %-l:%M:%S %P")
        .to_string()
}

fn store_failure(context: &str, err: sqlx::Error) -> axum::response::Response {
    tracing::error!(error = %err, "{context}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(EnrollError::Store(
            "A server error occurred during submission".to_string(),
        )),
    )
        .into_response()
}
