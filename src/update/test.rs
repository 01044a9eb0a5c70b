#[cfg(test)]
mod tests {
    use crate::{create_app, enroll::EnrollPayload, update::UpdatePayload};

    use axum::{
        body::Body,
        http::{self, Method, Request, StatusCode},
    };
    use tower::ServiceExt;

    fn unique_suffix() -> u128 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    }

    fn enroll_payload(phone: &str, email: &str) -> EnrollPayload {
        EnrollPayload {
            name: "Ravi Kumar".to_string(),
            phone: phone.to_string(),
            email: email.to_string(),
            school_name: "City Public School".to_string(),
            class_name: "9".to_string(),
            admin_email: "admin@example.com".to_string(),
        }
    }

    fn update_payload(phone: &str, email: &str) -> UpdatePayload {
        UpdatePayload {
            name: "Ravi K. Sharma".to_string(),
            phone: phone.to_string(),
            email: email.to_string(),
            school_name: "City Public School".to_string(),
            class_name: "10".to_string(),
        }
    }

    async fn listed_row(app: &axum::Router, phone: &str) -> serde_json::Value {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/enrollment")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        body.as_array()
            .unwrap()
            .iter()
            .find(|row| row["phone"] == phone)
            .cloned()
            .unwrap()
    }

    fn put_enrollment(id: i64, payload: &UpdatePayload) -> Request<Body> {
        Request::builder()
            .uri(format!("/enrollment/{id}"))
            .method(Method::PUT)
            .header(http::header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
            .body(Body::from(serde_json::to_string(payload).unwrap()))
            .unwrap()
    }

    #[tokio::test]
    async fn update_changes_business_fields_only() {
        let app = create_app().await;

        let suffix = unique_suffix();
        let phone = format!("4{:09}", suffix % 1_000_000_000);
        let email = format!("update{suffix}@example.com");

        let create_response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/enrollment")
                    .method(Method::POST)
                    .header(http::header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
                    .body(Body::from(
                        serde_json::to_string(&enroll_payload(&phone, &email)).unwrap(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(create_response.status(), StatusCode::CREATED);

        let created = listed_row(&app, &phone).await;
        let id = created["id"].as_i64().unwrap();
        let submission_date = created["submission_date"].as_str().unwrap().to_string();

        let new_phone = format!("3{:09}", suffix % 1_000_000_000);
        let new_email = format!("updated{suffix}@example.com");

        let update_response = app
            .clone()
            .oneshot(put_enrollment(id, &update_payload(&new_phone, &new_email)))
            .await
            .unwrap();

        assert_eq!(update_response.status(), StatusCode::OK);

        // The response echoes the submitted fields merged with the id.
        let body = hyper::body::to_bytes(update_response.into_body())
            .await
            .unwrap();
        let echoed: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(echoed["id"].as_i64().unwrap(), id);
        assert_eq!(echoed["name"], "Ravi K. Sharma");
        assert_eq!(echoed["class"], "10");
        assert!(echoed.get("admin_name").is_none());

        // The store kept id, admin_name and submission_date as created.
        let updated = listed_row(&app, &new_phone).await;
        assert_eq!(updated["id"].as_i64().unwrap(), id);
        assert_eq!(updated["name"], "Ravi K. Sharma");
        assert_eq!(updated["email"], new_email);
        assert_eq!(updated["class"], "10");
        assert_eq!(updated["admin_name"], "admin@example.com");
        assert_eq!(updated["submission_date"], submission_date);
    }

    #[tokio::test]
    async fn update_with_missing_field_rejected() {
        let app = create_app().await;

        let mut incomplete = update_payload("9999999999", "a@x.com");
        incomplete.email = String::new();

        let response = app
            .clone()
            .oneshot(put_enrollment(1, &incomplete))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn update_of_unknown_id_reports_success() {
        let app = create_app().await;

        let suffix = unique_suffix();
        let phone = format!("2{:09}", suffix % 1_000_000_000);
        let email = format!("ghost{suffix}@example.com");

        // Serial ids start at 1, so 0 never exists. Zero rows change and the
        // echo still comes back.
        let response = app
            .clone()
            .oneshot(put_enrollment(0, &update_payload(&phone, &email)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
        let echoed: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(echoed["id"].as_i64().unwrap(), 0);
        assert_eq!(echoed["phone"], phone);
    }

    #[tokio::test]
    async fn update_to_taken_phone_conflicts() {
        let app = create_app().await;

        let suffix = unique_suffix();
        let taken_phone = format!("1{:09}", suffix % 1_000_000_000);
        let victim_phone = format!("0{:09}", suffix % 1_000_000_000);

        for (phone, tag) in [(&taken_phone, "taken"), (&victim_phone, "victim")] {
            let response = app
                .clone()
                .oneshot(
                    Request::builder()
                        .uri("/enrollment")
                        .method(Method::POST)
                        .header(http::header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
                        .body(Body::from(
                            serde_json::to_string(&enroll_payload(
                                phone,
                                &format!("{tag}{suffix}@example.com"),
                            ))
                            .unwrap(),
                        ))
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let victim = listed_row(&app, &victim_phone).await;
        let victim_id = victim["id"].as_i64().unwrap();

        let response = app
            .clone()
            .oneshot(put_enrollment(
                victim_id,
                &update_payload(&taken_phone, &format!("victim{suffix}@example.com")),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
