//! Sesión respaldada por cookie.
//!
//! Los datos de la sesión viajan en la cookie `sessionid` como un token
//! firmado (HS256). El servidor no guarda estado entre peticiones: si la
//! firma o la expiración no son válidas, la sesión empieza vacía.

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, MutexGuard},
};

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    Extension,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{DateTime, Duration, Utc};
use cookie::time::Duration as CookieDuration;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{
    error::AppError,
    models::user::{CurrentUser, User},
    AppState,
};

pub const SESSION_COOKIE: &str = "sessionid";
pub const USER_ID_KEY: &str = "user_id";
pub const USERNAME_KEY: &str = "username";
pub const LOGIN_URL: &str = "/login/";

// Lo que viaja DENTRO del token firmado
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub exp: usize,
    pub iat: usize,
    pub data: BTreeMap<String, String>,
}

#[derive(Debug, Default)]
struct SessionState {
    data: BTreeMap<String, String>,
    modified: bool,
    flushed: bool,
}

/// Almacén clave/valor de la petición en curso.
///
/// Se clona barato (comparte el mismo estado), así el middleware ve lo que
/// el handler escribió.
#[derive(Debug, Clone, Default)]
pub struct Session {
    inner: Arc<Mutex<SessionState>>,
}

impl Session {
    pub fn from_data(data: BTreeMap<String, String>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SessionState {
                data,
                ..Default::default()
            })),
        }
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.state().data.get(key).cloned()
    }

    pub fn insert(&self, key: &str, value: impl Into<String>) {
        let mut state = self.state();
        state.data.insert(key.to_string(), value.into());
        state.modified = true;
    }

    pub fn remove(&self, key: &str) {
        let mut state = self.state();
        if state.data.remove(key).is_some() {
            state.modified = true;
        }
    }

    /// Borra todos los datos; la cookie se elimina al responder.
    pub fn flush(&self) {
        let mut state = self.state();
        state.data.clear();
        state.modified = true;
        state.flushed = true;
    }

    pub fn login(&self, user: &User) {
        self.insert(USER_ID_KEY, user.id.to_string());
        self.insert(USERNAME_KEY, user.username.clone());
    }

    pub fn user_id(&self) -> Option<i64> {
        self.get(USER_ID_KEY)?.parse().ok()
    }

    pub fn username(&self) -> Option<String> {
        self.get(USERNAME_KEY)
    }

    pub fn data(&self) -> BTreeMap<String, String> {
        self.state().data.clone()
    }

    fn is_modified(&self) -> bool {
        self.state().modified
    }

    fn is_flushed(&self) -> bool {
        self.state().flushed
    }
}

pub fn encode_session(
    data: &BTreeMap<String, String>,
    secret: &str,
    age_secs: i64,
    now: DateTime<Utc>,
) -> Result<String, AppError> {
    let claims = SessionClaims {
        exp: (now + Duration::seconds(age_secs)).timestamp() as usize,
        iat: now.timestamp() as usize,
        data: data.clone(),
    };

    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?)
}

pub fn decode_session(token: &str, secret: &str) -> Option<BTreeMap<String, String>> {
    match decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    ) {
        Ok(token_data) => Some(token_data.claims.data),
        Err(e) => {
            // Token falso, expirado o manipulado: sesión nueva
            tracing::debug!("Cookie de sesión descartada: {}", e);
            None
        }
    }
}

/// Cookie persistente: dura lo mismo que el token que lleva dentro.
pub fn session_cookie(token: String, age_secs: i64) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::seconds(age_secs))
        .build()
}

// Carga la sesión antes del handler y la vuelve a escribir en la cookie después
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let jar = CookieJar::from_headers(request.headers());
    let data = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| decode_session(cookie.value(), &state.config.session_secret))
        .unwrap_or_default();

    let session = Session::from_data(data);
    request.extensions_mut().insert(session.clone());

    let response = next.run(request).await;

    let data = session.data();
    if session.is_flushed() && data.is_empty() {
        let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
        return (jar, response).into_response();
    }
    if !session.is_modified() {
        return response;
    }

    match encode_session(
        &data,
        &state.config.session_secret,
        state.config.session_age,
        Utc::now(),
    ) {
        Ok(token) => {
            let cookie = session_cookie(token, state.config.session_age);
            (jar.add(cookie), response).into_response()
        }
        Err(e) => e.into_response(),
    }
}

// Rutas protegidas: sin usuario activo en sesión se redirige al login
pub async fn login_required(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let Some(user_id) = session.user_id() else {
        return Redirect::to(LOGIN_URL).into_response();
    };

    let user = sqlx::query_as::<_, User>(
        "SELECT id, username, email, password_hash, is_active, date_joined FROM users WHERE id = ?",
    )
    .bind(user_id)
    .fetch_optional(&state.pool)
    .await;

    match user {
        Ok(Some(user)) if user.is_active => {
            request.extensions_mut().insert(CurrentUser(user));
            next.run(request).await
        }
        Ok(_) => {
            // Usuario borrado o desactivado después de iniciar sesión
            tracing::info!("Sesión con usuario {} inválido, se descarta", user_id);
            session.flush();
            Redirect::to(LOGIN_URL).into_response()
        }
        Err(e) => AppError::from(e).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn token_carries_session_data() {
        let mut data = BTreeMap::new();
        data.insert("visits".to_string(), "3".to_string());
        let token = encode_session(&data, SECRET, 3600, Utc::now()).unwrap();

        assert_eq!(decode_session(&token, SECRET), Some(data));
    }

    #[test]
    fn wrong_secret_or_expired_token_is_rejected() {
        let data = BTreeMap::new();
        let token = encode_session(&data, SECRET, 3600, Utc::now()).unwrap();
        assert_eq!(decode_session(&token, "other-secret"), None);

        let long_ago = Utc::now() - Duration::days(30);
        let expired = encode_session(&data, SECRET, 3600, long_ago).unwrap();
        assert_eq!(decode_session(&expired, SECRET), None);
    }

    #[test]
    fn cookie_outlives_the_browser_session() {
        let cookie = session_cookie("token".to_string(), 1_209_600);
        assert_eq!(cookie.max_age(), Some(CookieDuration::seconds(1_209_600)));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
    }

    #[test]
    fn flush_clears_data_and_marks_session() {
        let session = Session::default();
        session.insert(USER_ID_KEY, "7");
        assert_eq!(session.user_id(), Some(7));

        session.flush();
        assert!(session.data().is_empty());
        assert!(session.is_flushed());
        assert_eq!(session.user_id(), None);
    }

    #[test]
    fn reading_does_not_mark_modified() {
        let mut data = BTreeMap::new();
        data.insert(USERNAME_KEY.to_string(), "leifos".to_string());
        let session = Session::from_data(data);

        assert_eq!(session.username().as_deref(), Some("leifos"));
        assert!(!session.is_modified());
        session.remove("missing");
        assert!(!session.is_modified());
    }
}
