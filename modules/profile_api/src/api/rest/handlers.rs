use axum::{response::Json, Extension};
use std::sync::Arc;
use tracing::debug;

use crate::api::rest::dto::ProfileResponse;
use crate::domain::service::ProfileService;

/// Return the profile: static identity, best-effort fact, fresh timestamp.
///
/// Structurally infallible: the return type has no error branch, so upstream
/// trouble can only ever show up as the fallback fact inside a 200.
pub async fn get_me(Extension(svc): Extension<Arc<ProfileService>>) -> Json<ProfileResponse> {
    debug!("Assembling profile response");
    let profile = svc.profile().await;
    Json(ProfileResponse::from(profile))
}
