use axum::{
    extract::{Form, Path, State},
    response::{IntoResponse, Redirect, Response},
    Extension,
};

use super::category::find_category;
use crate::{
    db::DbPool,
    error::AppError,
    forms::{FormErrors, PageForm},
    templates,
    utils::session::Session,
};

// GET /category/:slug/add_page/ (requiere login)
pub async fn add_page_form_handler(
    Path(slug): Path<String>,
    State(pool): State<DbPool>,
    Extension(session): Extension<Session>,
) -> Result<Response, AppError> {
    // Sin categoría no hay página: de vuelta a la portada
    let Some(category) = find_category(&pool, &slug).await? else {
        return Ok(Redirect::to("/").into_response());
    };

    Ok(templates::forms::add_page(
        session.username().as_deref(),
        &category,
        &PageForm::default(),
        &FormErrors::default(),
    )
    .into_response())
}

// POST /category/:slug/add_page/ (requiere login)
pub async fn add_page_handler(
    Path(slug): Path<String>,
    State(pool): State<DbPool>,
    Extension(session): Extension<Session>,
    Form(form): Form<PageForm>,
) -> Result<Response, AppError> {
    let Some(category) = find_category(&pool, &slug).await? else {
        tracing::debug!("add_page para categoría inexistente: {}", slug);
        return Ok(Redirect::to("/").into_response());
    };

    match form.clean() {
        Ok(page) => {
            sqlx::query("INSERT INTO pages (category_id, title, url, views) VALUES (?, ?, ?, 0)")
                .bind(category.id)
                .bind(&page.title)
                .bind(&page.url)
                .execute(&pool)
                .await?;

            tracing::info!("Página '{}' añadida a {}", page.title, category.slug);
            Ok(Redirect::to(&format!("/category/{}/", category.slug)).into_response())
        }
        Err(errors) => {
            tracing::warn!("Formulario de página inválido: {}", errors);
            Ok(templates::forms::add_page(
                session.username().as_deref(),
                &category,
                &form,
                &errors,
            )
            .into_response())
        }
    }
}
