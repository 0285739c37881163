use axum::http::HeaderMap;

use crate::server::{error::admin::AdminError, model::app::AppSettings};

pub const ADMIN_SECRET_HEADER: &str = "x-admin-secret";

/// Checks the `X-Admin-Secret` header against the configured admin secret
///
/// # Returns
/// - `Ok(())` - Header present and equal to the secret
/// - `Err(AdminError::Unauthorized)` - Header missing, not valid UTF-8 or wrong
pub fn require_admin(headers: &HeaderMap, settings: &AppSettings) -> Result<(), AdminError> {
    let provided = headers
        .get(ADMIN_SECRET_HEADER)
        .and_then(|value| value.to_str().ok());

    match provided {
        Some(secret) if constant_time_eq(secret.as_bytes(), settings.admin_secret.as_bytes()) => {
            Ok(())
        }
        _ => {
            tracing::debug!("Rejected admin request with missing or invalid secret");
            Err(AdminError::Unauthorized)
        }
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
