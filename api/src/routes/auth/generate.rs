use actix_web::{web, HttpResponse};

use dm_core::repositories::{RefreshTokenStore, UserRepository};
use dm_shared::{success_codes, ApiResponse};

use crate::dto::auth::GenerateTokenRequest;
use crate::handlers::error::handle_domain_error;
use crate::routes::AppState;

/// Handler for POST /token/generate
///
/// Issues a fresh pair for an already registered identity and overwrites
/// its stored refresh token.
///
/// # Request Body
///
/// ```json
/// { "providerId": "kakao_123456" }
/// ```
///
/// # Response
///
/// ## Success (201 Created)
/// ```json
/// {
///     "success": true,
///     "code": "USER_201",
///     "message": "Tokens issued",
///     "data": { "accessToken": "eyJ...", "refreshToken": "eyJ...", "ttl": 1700000000000 },
///     "timestamp": "..."
/// }
/// ```
///
/// ## Errors
/// - 404 Not Found: `USER_4041` when the provider id is unknown
/// - 500 Internal Server Error: signing or storage failure
pub async fn generate<U, S>(
    state: web::Data<AppState<U, S>>,
    request: web::Json<GenerateTokenRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    S: RefreshTokenStore + 'static,
{
    match state.token_service.issue_tokens(request.provider_id.trim()).await {
        Ok(pair) => HttpResponse::Created().json(ApiResponse::success(
            success_codes::USER_LOGIN,
            "Tokens issued",
            pair,
        )),
        Err(error) => handle_domain_error(&error),
    }
}
