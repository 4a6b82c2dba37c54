//! Application factory
//!
//! Wires the token service into actix-web: the generic [`AppState`] for the
//! route handlers and an [`AccessTokenVerifier`] trait object for the
//! [`AuthContext`](crate::middleware::AuthContext) extractor.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    error::InternalError,
    web, App, HttpResponse,
};
use tracing_actix_web::TracingLogger;

use dm_core::{
    repositories::{RefreshTokenStore, UserRepository},
    services::token::TokenService,
};
use dm_shared::errors::{error_codes, ErrorResponse};

use crate::middleware::auth::AccessTokenVerifier;
use crate::routes::{auth, users, AppState};

/// Create and configure the application around a token service
pub fn create_app<U, S>(
    token_service: Arc<TokenService<U, S>>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    S: RefreshTokenStore + 'static,
{
    let verifier: Arc<dyn AccessTokenVerifier> = token_service.clone();

    App::new()
        .app_data(web::Data::new(AppState::new(token_service)))
        .app_data(web::Data::from(verifier))
        .app_data(json_config())
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .route("/token/generate", web::post().to(auth::generate::<U, S>))
        .service(
            web::scope("/mobile/auth")
                .route("/login", web::post().to(auth::login::<U, S>))
                .route("/refresh", web::post().to(auth::refresh::<U, S>)),
        )
        .service(
            web::scope("/users")
                .route("/reissue", web::post().to(auth::reissue::<U, S>))
                .route("/logout", web::delete().to(auth::logout::<U, S>))
                .route("/exists/{provider_id}", web::get().to(users::exists::<U, S>))
                .route("/me", web::get().to(users::me)),
        )
        .default_service(web::route().to(not_found))
}

/// Malformed JSON bodies answer with the shared error structure
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest()
            .json(ErrorResponse::new(error_codes::BAD_REQUEST, err.to_string()));
        InternalError::from_response(err, response).into()
    })
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "devmarket-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
