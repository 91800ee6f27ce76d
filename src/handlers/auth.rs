use axum::{
    extract::{multipart::MultipartError, Form, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Extension,
};
use chrono::Utc;
use mime::Mime;

use crate::{
    db::{is_unique_violation, DbPool},
    error::AppError,
    forms::{user::DUPLICATE_USERNAME, FormErrors, NewUser, RegistrationForm},
    models::user::{LoginPayload, User},
    templates,
    utils::{
        media::{discard_profile_picture, save_profile_picture, UploadedImage},
        security::{hash_password, verify_password},
        session::Session,
    },
    AppState,
};

pub const INVALID_LOGIN: &str = "Invalid login details supplied.";
pub const ACCOUNT_DISABLED: &str = "Your Rango account is disabled.";

// GET /register/
pub async fn register_form_handler(Extension(session): Extension<Session>) -> Response {
    templates::forms::register(
        session.username().as_deref(),
        &RegistrationForm::default(),
        &FormErrors::default(),
        false,
    )
    .into_response()
}

// POST /register/ (multipart: usuario, perfil y foto opcional)
pub async fn register_handler(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let form = match read_registration(multipart).await {
        Ok(form) => form,
        Err(e) => {
            tracing::warn!("Registro con multipart ilegible: {}", e);
            return Ok((StatusCode::BAD_REQUEST, "Malformed form submission").into_response());
        }
    };

    let errors = match form.clean() {
        Ok(new_user) => match create_user(&state, &new_user).await {
            Ok(user) => {
                tracing::info!("Usuario registrado: {} (id {})", user.username, user.id);
                return Ok(templates::forms::register(
                    session.username().as_deref(),
                    &form,
                    &FormErrors::default(),
                    true,
                )
                .into_response());
            }
            Err(AppError::Database(e)) if is_unique_violation(&e) => {
                let mut errors = FormErrors::default();
                errors.add("username", DUPLICATE_USERNAME);
                errors
            }
            Err(e) => return Err(e),
        },
        Err(errors) => errors,
    };

    tracing::warn!("Formulario de registro inválido: {}", errors);
    Ok(templates::forms::register(session.username().as_deref(), &form, &errors, false)
        .into_response())
}

async fn read_registration(mut multipart: Multipart) -> Result<RegistrationForm, MultipartError> {
    let mut form = RegistrationForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();

        if name == "picture" {
            let file_name = field.file_name().unwrap_or("").to_string();
            let content_type: Option<Mime> = field
                .content_type()
                .and_then(|ct_str| ct_str.parse::<Mime>().ok());
            let data = field.bytes().await?;

            // El navegador manda el campo vacío si no se eligió archivo
            if !file_name.is_empty() || !data.is_empty() {
                form.picture = Some(UploadedImage {
                    file_name,
                    content_type,
                    data,
                });
            }
        } else {
            let value = field.text().await?;
            form.set_text(&name, value);
        }
    }

    Ok(form)
}

// Usuario y perfil se guardan juntos o no se guarda nada
async fn create_user(state: &AppState, new_user: &NewUser) -> Result<User, AppError> {
    let password_hash = hash_password(&new_user.password)?;
    let date_joined = Utc::now();

    let mut tx = state.pool.begin().await?;

    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (username, email, password_hash, is_active, date_joined)
         VALUES (?, ?, ?, 1, ?)
         RETURNING id, username, email, password_hash, is_active, date_joined",
    )
    .bind(&new_user.username)
    .bind(&new_user.email)
    .bind(&password_hash)
    .bind(date_joined)
    .fetch_one(&mut *tx)
    .await?;

    let picture = match &new_user.picture {
        Some(image) => Some(save_profile_picture(&state.config.media_root, image).await?),
        None => None,
    };

    let stored: Result<(), sqlx::Error> = async {
        sqlx::query("INSERT INTO user_profiles (user_id, website, picture) VALUES (?, ?, ?)")
            .bind(user.id)
            .bind(&new_user.website)
            .bind(&picture)
            .execute(&mut *tx)
            .await?;
        tx.commit().await
    }
    .await;

    // Sin fila que la referencie, la imagen ya escrita sobra
    if let Err(e) = stored {
        if let Some(relative) = &picture {
            discard_profile_picture(&state.config.media_root, relative).await;
        }
        return Err(e.into());
    }

    Ok(user)
}

// GET /login/
pub async fn login_form_handler(Extension(session): Extension<Session>) -> Response {
    templates::forms::login(session.username().as_deref()).into_response()
}

// POST /login/
pub async fn login_handler(
    State(pool): State<DbPool>,
    Extension(session): Extension<Session>,
    Form(payload): Form<LoginPayload>,
) -> Result<Response, AppError> {
    // 1. Buscar usuario por nombre
    let user = sqlx::query_as::<_, User>(
        "SELECT id, username, email, password_hash, is_active, date_joined FROM users WHERE username = ?",
    )
    .bind(payload.username.trim())
    .fetch_optional(&pool)
    .await?;

    // 2. Verificar contraseña (Argon2)
    let Some(user) = user.filter(|u| verify_password(&payload.password, &u.password_hash)) else {
        tracing::warn!("Login fallido para el usuario '{}'", payload.username);
        return Ok((StatusCode::UNAUTHORIZED, INVALID_LOGIN).into_response());
    };

    // 3. Cuenta desactivada: no se abre sesión
    if !user.is_active {
        tracing::warn!("Login de cuenta desactivada: {}", user.username);
        return Ok((StatusCode::FORBIDDEN, ACCOUNT_DISABLED).into_response());
    }

    // 4. Guardar el usuario en la sesión
    session.login(&user);
    tracing::info!("Sesión iniciada: {}", user.username);

    Ok(Redirect::to("/").into_response())
}

// GET /logout/ (requiere login)
pub async fn logout_handler(Extension(session): Extension<Session>) -> Response {
    session.flush();
    Redirect::to("/").into_response()
}
