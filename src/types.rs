use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A persisted enrollment row. `admin_name` and `submission_date` are set
/// once at creation and never touched by updates.
#[derive(Serialize, Deserialize, ToSchema, Clone, FromRow)]
pub struct Enrollment {
    pub id: i32,
    #[schema(example = "Asha Verma")]
    pub name: String,
    #[schema(example = "9999999999")]
    pub phone: String,
    #[schema(example = "asha@example.com")]
    pub email: String,
    #[schema(example = "St. Mary's School")]
    pub school_name: String,
    #[serde(rename = "class")]
    #[sqlx(rename = "class")]
    #[schema(example = "10")]
    pub class_name: String,
    #[schema(example = "admin@example.com")]
    pub admin_name: String,
    #[schema(example = "23/5/2024, 10:15:00 am")]
    pub submission_date: String,
}
