use std::future::{ready, Ready};

use actix_web::{dev::Payload, web, FromRequest, HttpRequest};

use crate::{app_state::AppState, auth::utils::require_admin, errors::AppError};

pub const ADMIN_PASSWORD_HEADER: &str = "x-admin-password";

/// Extractor for admin-only handlers. Rejects with 401 unless the
/// `x-admin-password` header carries the configured secret.
pub struct AdminGuard;

impl FromRequest for AdminGuard {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(state) = req.app_data::<web::Data<AppState>>() else {
            return ready(Err(AppError::InternalError(
                "Application state not configured".to_string(),
            )));
        };

        let provided = req
            .headers()
            .get(ADMIN_PASSWORD_HEADER)
            .and_then(|h| h.to_str().ok());

        let result = require_admin(provided, &state.config.admin_password);
        if result.is_err() {
            log::warn!("Rejected admin request to {}", req.path());
        }

        ready(result.map(|_| AdminGuard))
    }
}
