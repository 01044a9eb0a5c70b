use crate::store::Store;

/// Looks for an existing record holding either the phone number or the email
/// address. Advisory: when two submissions race past this check, the unique
/// indexes on phone and email decide the winner at insert time.
pub(super) async fn already_enrolled(
    store: &Store,
    phone: &str,
    email: &str,
) -> Result<bool, sqlx::Error> {
    let q = "--sql
        select 1
        from enrollments
        where phone = $1 or email = $2
        limit 1;
    ";

    let existing: Option<(i32,)> = sqlx::query_as(q)
        .bind(phone)
        .bind(email)
        .fetch_optional(store.pool())
        .await?;

    Ok(existing.is_some())
}
