use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use hyper::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::store::{self, Store};

mod test;

#[derive(Serialize, Deserialize, ToSchema)]
pub(super) enum UpdateError {
    #[schema(example = "All fields are required")]
    Validation(String),
    #[schema(example = "Phone or email already belongs to another enrollment")]
    Conflict(String),
    #[schema(example = "A server error occurred while updating")]
    Store(String),
}

#[derive(Serialize, Deserialize, Default, ToSchema)]
#[serde(default)]
pub(super) struct UpdatePayload {
    #[schema(example = "Asha Verma")]
    pub name: String,
    #[schema(example = "8888888888")]
    pub phone: String,
    #[schema(example = "asha@example.com")]
    pub email: String,
    #[schema(example = "St. Mary's School")]
    pub school_name: String,
    #[serde(rename = "class")]
    #[schema(example = "11")]
    pub class_name: String,
}

impl UpdatePayload {
    // Same falsy semantics as enrollment: empty means missing, whitespace
    // passes.
    pub(super) fn missing_field(&self) -> bool {
        [
            &self.name,
            &self.phone,
            &self.email,
            &self.school_name,
            &self.class_name,
        ]
        .iter()
        .any(|field| field.is_empty())
    }
}

/// Echo of the submitted fields merged with the path id. Built from the
/// input, not re-read from the store; admin_name and submission_date are
/// untouched by updates and not part of this shape.
#[derive(Serialize, Deserialize, ToSchema)]
pub(super) struct UpdatedEnrollment {
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub school_name: String,
    #[serde(rename = "class")]
    pub class_name: String,
}

#[utoipa::path(
    put,
    path = "/enrollment/{id}",
    request_body = UpdatePayload,
    responses(
        (status = 200, description = "Enrollment updated successfully", body = UpdatedEnrollment),
        (status = 400, description = "A required field is missing", body = UpdateError),
        (status = 409, description = "Phone or email already belongs to another enrollment", body = UpdateError),
        (status = 500, description = "Store failure", body = UpdateError)
    ),
    params(
        ("id" = i32, Path, description = "Enrollment id")
    )
)]
pub(super) async fn update_enrollment(
    Path(id): Path<i32>,
    State(store): State<Arc<Store>>,
    Json(payload): Json<UpdatePayload>,
) -> impl IntoResponse {
    if payload.missing_field() {
        return (
            StatusCode::BAD_REQUEST,
            Json(UpdateError::Validation("All fields are required".to_string())),
        )
            .into_response();
    }

    let q = "--sql
        update enrollments
        set name = $1, phone = $2, email = $3, school_name = $4, class = $5
        where id = $6;
    ";

    let q_result = sqlx::query(q)
        .bind(&payload.name)
        .bind(&payload.phone)
        .bind(&payload.email)
        .bind(&payload.school_name)
        .bind(&payload.class_name)
        .bind(id)
        .execute(store.pool())
        .await;

    // An unknown id updates zero rows and still reports success.
    match q_result {
        Err(err) if store::is_unique_violation(&err) => (
            StatusCode::CONFLICT,
            Json(UpdateError::Conflict(
                "Phone or email already belongs to another enrollment".to_string(),
            )),
        )
            .into_response(),
        Err(err) => {
            tracing::error!(error = %err, "enrollment update failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(UpdateError::Store(
                    "A server error occurred while updating".to_string(),
                )),
            )
                .into_response()
        }
        Ok(_) => (
            StatusCode::OK,
            Json(UpdatedEnrollment {
                id,
                name: payload.name,
                phone: payload.phone,
                email: payload.email,
                school_name: payload.school_name,
                class_name: payload.class_name,
            }),
        )
            .into_response(),
    }
}
