use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use hyper::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::store::Store;
use crate::types::Enrollment;

#[derive(Serialize, Deserialize, ToSchema)]
pub(super) enum ListError {
    #[schema(example = "A server error occurred while fetching enrollments")]
    Store(String),
}

#[utoipa::path(
    get,
    path = "/enrollment",
    responses(
        (status = 200, description = "List all enrollments, newest first", body = [Enrollment]),
        (status = 500, description = "Store failure", body = ListError)
    )
)]
pub(super) async fn list_enrollments(State(store): State<Arc<Store>>) -> impl IntoResponse {
    let q = "--sql
        select id, name, phone, email, school_name, class, admin_name, submission_date
        from enrollments
        order by id desc;
    ";

    let q_result = sqlx::query_as::<_, Enrollment>(q)
        .fetch_all(store.pool())
        .await;

    match q_result {
        Ok(enrollments) => (StatusCode::OK, Json(enrollments)).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "enrollment listing failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ListError::Store(
                    "A server error occurred while fetching enrollments".to_string(),
                )),
            )
                .into_response()
        }
    }
}
