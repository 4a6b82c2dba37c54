use actix_web::{web, HttpRequest, HttpResponse};

use dm_core::repositories::{RefreshTokenStore, UserRepository};
use dm_shared::{success_codes, ApiResponse};

use crate::handlers::error::handle_domain_error;
use crate::routes::{authorization_header, AppState};

/// Handler for POST /users/reissue
///
/// Rotates the caller's refresh slot. The access token in the
/// `Authorization` header may be expired but must carry a valid signature.
///
/// # Headers
///
/// ```text
/// Authorization: Bearer {access_token}
/// ```
///
/// ## Errors
/// - 401 Unauthorized: `JWT_4011` when the stored refresh token has expired
/// - 403 Forbidden: `JWT_4032` for a missing or forged access token
/// - 404 Not Found: `JWT_4041` when no refresh token is stored
pub async fn reissue<U, S>(req: HttpRequest, state: web::Data<AppState<U, S>>) -> HttpResponse
where
    U: UserRepository + 'static,
    S: RefreshTokenStore + 'static,
{
    match state
        .token_service
        .reissue_tokens(authorization_header(&req))
        .await
    {
        Ok(pair) => HttpResponse::Ok().json(ApiResponse::success(
            success_codes::USER_REISSUE,
            "Tokens reissued",
            pair,
        )),
        Err(error) => handle_domain_error(&error),
    }
}
