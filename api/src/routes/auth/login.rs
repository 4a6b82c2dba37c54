use actix_web::{web, HttpResponse};

use dm_core::repositories::{RefreshTokenStore, UserRepository};
use dm_shared::{success_codes, ApiResponse};

use crate::dto::auth::MobileLoginRequest;
use crate::handlers::error::handle_domain_error;
use crate::routes::AppState;

/// Handler for POST /mobile/auth/login
///
/// Registers the provider identity on first sight (or refreshes its display
/// name) and issues a pair.
///
/// ## Errors
/// - 400 Bad Request: `COMMON_400` for a blank provider id
pub async fn login<U, S>(
    state: web::Data<AppState<U, S>>,
    request: web::Json<MobileLoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    S: RefreshTokenStore + 'static,
{
    let display_name = request.display_name();

    match state
        .token_service
        .login(&request.provider_id, display_name)
        .await
    {
        Ok(pair) => HttpResponse::Created().json(ApiResponse::success(
            success_codes::USER_LOGIN,
            "Login successful",
            pair,
        )),
        Err(error) => handle_domain_error(&error),
    }
}
