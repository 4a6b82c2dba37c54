use actix_web::{web, HttpResponse};

use dm_core::repositories::{RefreshTokenStore, UserRepository};
use dm_shared::{success_codes, ApiResponse};

use crate::dto::auth::MobileRefreshRequest;
use crate::handlers::error::handle_domain_error;
use crate::routes::AppState;

/// Handler for POST /mobile/auth/refresh
///
/// Same rotation as `/users/reissue`, but the client also presents the
/// refresh token it holds, which must equal the stored one.
///
/// # Request Body
///
/// ```json
/// { "accessToken": "eyJ...", "refreshToken": "eyJ..." }
/// ```
///
/// ## Errors
/// - 403 Forbidden: `JWT_4032` when either token is blank, forged or the
///   refresh token does not match
pub async fn refresh<U, S>(
    state: web::Data<AppState<U, S>>,
    request: web::Json<MobileRefreshRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    S: RefreshTokenStore + 'static,
{
    match state
        .token_service
        .reissue_with_refresh(&request.access_token, &request.refresh_token)
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
