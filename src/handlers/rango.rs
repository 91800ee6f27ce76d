use axum::{
    extract::{Query, State},
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Extension,
};
use chrono::Utc;
use serde::Deserialize;

use crate::{
    db::DbPool,
    error::AppError,
    models::{category::Category, page::Page, user::CurrentUser},
    templates,
    utils::{session::Session, visits::visitor_cookie_handler},
};

// Cuántas categorías y páginas muestra la portada
const TOP_N: i64 = 5;

#[derive(Debug, Deserialize)]
pub struct GotoParams {
    pub page_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LikeParams {
    pub category_id: Option<String>,
}

// GET / - categorías con más likes y páginas más vistas
pub async fn index_handler(
    State(pool): State<DbPool>,
    Extension(session): Extension<Session>,
) -> Result<Response, AppError> {
    let categories = sqlx::query_as::<_, Category>(
        "SELECT id, name, slug, views, likes FROM categories ORDER BY likes DESC, id ASC LIMIT ?",
    )
    .bind(TOP_N)
    .fetch_all(&pool)
    .await?;

    let pages = sqlx::query_as::<_, Page>(
        "SELECT id, category_id, title, url, views FROM pages ORDER BY views DESC, id ASC LIMIT ?",
    )
    .bind(TOP_N)
    .fetch_all(&pool)
    .await?;

    let visits = visitor_cookie_handler(&session, Utc::now());

    Ok(templates::rango::index(session.username().as_deref(), &categories, &pages, visits)
        .into_response())
}

// GET /about/
pub async fn about_handler(Extension(session): Extension<Session>) -> Response {
    let visits = visitor_cookie_handler(&session, Utc::now());
    templates::rango::about(session.username().as_deref(), visits).into_response()
}

// GET /restricted/ (requiere login)
pub async fn restricted_handler(Extension(CurrentUser(user)): Extension<CurrentUser>) -> Response {
    templates::rango::restricted(Some(&user.username)).into_response()
}

// GET /goto/?page_id=N - cuenta la visita y redirige a la URL de la página
pub async fn goto_handler(
    State(pool): State<DbPool>,
    Query(params): Query<GotoParams>,
) -> Result<Response, AppError> {
    let Some(page_id) = params.page_id.and_then(|id| id.trim().parse::<i64>().ok()) else {
        return Ok(Redirect::to("/").into_response());
    };

    let url = sqlx::query_scalar::<_, String>(
        "UPDATE pages SET views = views + 1 WHERE id = ? RETURNING url",
    )
    .bind(page_id)
    .fetch_optional(&pool)
    .await?;

    match url {
        // Redirect::to entra en pánico con valores que no caben en una cabecera
        Some(url) if HeaderValue::try_from(url.as_str()).is_ok() => {
            Ok(Redirect::to(&url).into_response())
        }
        Some(url) => {
            tracing::warn!("Página {} con URL no redirigible: {:?}", page_id, url);
            Ok(Redirect::to("/").into_response())
        }
        None => {
            tracing::debug!("goto con página inexistente: {}", page_id);
            Ok(Redirect::to("/").into_response())
        }
    }
}

// GET /like_category/?category_id=N (requiere login) - devuelve el nuevo total
pub async fn like_category_handler(
    State(pool): State<DbPool>,
    Query(params): Query<LikeParams>,
) -> Result<Response, AppError> {
    let Some(category_id) = params.category_id.and_then(|id| id.trim().parse::<i64>().ok()) else {
        return Ok((StatusCode::BAD_REQUEST, "Missing or invalid category_id").into_response());
    };

    let likes = sqlx::query_scalar::<_, i64>(
        "UPDATE categories SET likes = likes + 1 WHERE id = ? RETURNING likes",
    )
    .bind(category_id)
    .fetch_optional(&pool)
    .await?;

    Ok(match likes {
        Some(likes) => (StatusCode::OK, likes.to_string()).into_response(),
        None => (StatusCode::NOT_FOUND, "Category not found").into_response(),
    })
}
