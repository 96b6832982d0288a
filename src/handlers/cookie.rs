//! Signed session cookie.
//!
//! The cookie value is the session id, signed with a key derived from the
//! configured secret. A missing, tampered or expired cookie reads as "no
//! session".

use crate::error::{AppError, AppResult};
use crate::state::AppState;
use actix_web::cookie::{time::Duration, Cookie, CookieJar, SameSite};
use actix_web::HttpRequest;

/// Verified session id carried by the request, if any.
pub fn session_id(req: &HttpRequest, state: &AppState) -> Option<String> {
    let name = &state.config.session.cookie_name;
    let cookie = req.cookie(name)?;

    let mut jar = CookieJar::new();
    jar.add_original(cookie);
    jar.signed(&state.cookie_key)
        .get(name)
        .map(|verified| verified.value().to_string())
}

/// Signed cookie binding the client to `session_id`.
pub fn session_cookie(state: &AppState, session_id: &str) -> AppResult<Cookie<'static>> {
    let settings = &state.config.session;
    let production = state.config.is_production();

    let cookie = Cookie::build(settings.cookie_name.clone(), session_id.to_string())
        .path("/")
        .http_only(true)
        .max_age(Duration::seconds(settings.max_age_secs as i64))
        .secure(production)
        .same_site(if production { SameSite::None } else { SameSite::Lax })
        .finish();

    let mut jar = CookieJar::new();
    jar.signed_mut(&state.cookie_key).add(cookie);
    jar.get(&settings.cookie_name)
        .cloned()
        .ok_or_else(|| AppError::Internal("failed to sign session cookie".to_string()))
}
