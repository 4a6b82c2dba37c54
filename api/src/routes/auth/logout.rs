use actix_web::{web, HttpRequest, HttpResponse};

use dm_core::repositories::{RefreshTokenStore, UserRepository};
use dm_shared::{success_codes, ApiResponse};

use crate::dto::auth::LogoutResponse;
use crate::handlers::error::handle_domain_error;
use crate::routes::{authorization_header, AppState};

/// Handler for DELETE /users/logout
///
/// Clears the caller's refresh token. Requires a strictly valid access token;
/// logging out twice succeeds both times.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "success": true, "code": "USER_200", "data": { "message": "Logged out successfully" }, ... }
/// ```
///
/// ## Errors
/// - 403 Forbidden: `JWT_4032` for a missing, expired or invalid access token
/// - 404 Not Found: `USER_4041` when the subject no longer resolves
pub async fn logout<U, S>(req: HttpRequest, state: web::Data<AppState<U, S>>) -> HttpResponse
where
    U: UserRepository + 'static,
    S: RefreshTokenStore + 'static,
{
    match state.token_service.revoke(authorization_header(&req)).await {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::success(
            success_codes::USER_LOGOUT,
            "Logged out",
            LogoutResponse {
                message: "Logged out successfully".to_string(),
            },
        )),
        Err(error) => handle_domain_error(&error),
    }
}
