use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

pub const USERNAME_MAX_LENGTH: usize = 150;

// Lo que guardamos en la base de datos
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip)] // El hash nunca sale del servidor
    pub password_hash: String,
    pub is_active: bool,
    pub date_joined: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserProfile {
    pub id: i64,
    pub user_id: i64,
    pub website: Option<String>,
    /// Ruta relativa a la carpeta de media (ej: "profile_images/<uuid>.png").
    pub picture: Option<String>,
}

// Lo que recibimos para hacer login (formulario HTML)
#[derive(Debug, Default, serde::Deserialize)]
pub struct LoginPayload {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// El usuario autenticado de la petición, insertado por `login_required`.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);
