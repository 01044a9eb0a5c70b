use std::{
    net::{Ipv4Addr, SocketAddr},
    sync::Arc,
};

use axum::{routing, Router, Server};
use dotenv::dotenv;
use hyper::Error;
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

use crate::store::Store;
use crate::types::Enrollment;

use enroll::{EnrollAck, EnrollError, EnrollPayload};
use listing::ListError;
use update::{UpdateError, UpdatePayload, UpdatedEnrollment};

mod enroll;
mod listing;
mod update;

mod store;
mod types;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt().init();

    #[derive(OpenApi)]
    #[openapi(
        paths(
            listing::list_enrollments,
            enroll::create_enrollment,
            update::update_enrollment,
        ),
        components(
            schemas(Enrollment),
            schemas(EnrollError, EnrollPayload, EnrollAck),
            schemas(UpdateError, UpdatePayload, UpdatedEnrollment),
            schemas(ListError),
        ),
        tags(
            (name = "enrollment", description = "Student enrollment API")
        )
    )]
    struct ApiDoc;

    let app = create_app()
        .await
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Redoc::with_url("/redoc", ApiDoc::openapi()))
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/rapidoc"));

    let address = SocketAddr::from((Ipv4Addr::LOCALHOST, 8080));
    print!(
        r#"
-----------------------
API playgrounds available on:
Swagger: {address}/swagger-ui
Redoc: {address}/redoc
Rapidoc: {address}/rapidoc
------------------------
    "#
    );
    Server::bind(&address).serve(app.into_make_service()).await
}

pub async fn create_app() -> Router {
    let store = create_store().await;

    Router::new()
        .route(
            "/enrollment",
            routing::get(listing::list_enrollments).post(enroll::create_enrollment),
        )
        .route("/enrollment/:id", routing::put(update::update_enrollment))
        .with_state(store)
}

pub async fn create_store() -> Arc<Store> {
    dotenv().ok();

    let db_url = std::env::var("DATABASE_URL").expect("DATABASE_URL missing in .env");

    Arc::new(Store::connect(&db_url).await)
}
