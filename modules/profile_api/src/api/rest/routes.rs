use axum::{routing::get, Extension, Router};
use std::sync::Arc;

use crate::api::rest::handlers;
use crate::domain::service::ProfileService;

pub fn register_routes(router: Router, service: Arc<ProfileService>) -> Router {
    router
        .route("/me", get(handlers::get_me))
        .layer(Extension(service))
}
