//! Identity lookup handlers

use actix_web::{web, HttpResponse};

use dm_core::repositories::{RefreshTokenStore, UserRepository};
use dm_shared::{success_codes, ApiResponse};

use crate::dto::auth::{ExistsResponse, MeResponse};
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;
use crate::routes::AppState;

/// Handler for GET /users/exists/{provider_id}
pub async fn exists<U, S>(
    state: web::Data<AppState<U, S>>,
    provider_id: web::Path<String>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    S: RefreshTokenStore + 'static,
{
    match state
        .token_service
        .check_identity_exists(provider_id.trim())
        .await
    {
        Ok(exists) => HttpResponse::Ok().json(ApiResponse::success(
            success_codes::OK,
            "Lookup complete",
            ExistsResponse { exists },
        )),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for GET /users/me
///
/// Echoes the identity and authorities carried by the access token.
pub async fn me(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(
        success_codes::OK,
        "Authenticated",
        MeResponse {
            roles: auth.roles.authorities(),
            provider_id: auth.provider_id,
        },
    ))
}
