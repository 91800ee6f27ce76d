use axum::{
    extract::{Form, Path, State},
    response::{IntoResponse, Redirect, Response},
    Extension,
};

use crate::{
    db::{is_unique_violation, DbPool},
    error::AppError,
    forms::{category::DUPLICATE_NAME, CategoryForm, FormErrors},
    models::{category::Category, page::Page},
    templates,
    utils::session::Session,
};

pub(crate) async fn find_category(pool: &DbPool, slug: &str) -> Result<Option<Category>, AppError> {
    let category = sqlx::query_as::<_, Category>(
        "SELECT id, name, slug, views, likes FROM categories WHERE slug = ?",
    )
    .bind(slug)
    .fetch_optional(pool)
    .await?;

    Ok(category)
}

// GET /category/:slug/ - si no existe se muestra el estado vacío, no un 404
pub async fn show_category_handler(
    Path(slug): Path<String>,
    State(pool): State<DbPool>,
    Extension(session): Extension<Session>,
) -> Result<Response, AppError> {
    let category = find_category(&pool, &slug).await?;

    let pages = match &category {
        Some(category) => {
            sqlx::query_as::<_, Page>(
                "SELECT id, category_id, title, url, views FROM pages WHERE category_id = ? ORDER BY id ASC",
            )
            .bind(category.id)
            .fetch_all(&pool)
            .await?
        }
        None => Vec::new(),
    };

    Ok(
        templates::rango::category(session.username().as_deref(), category.as_ref(), &pages)
            .into_response(),
    )
}

// GET /category/add/ (requiere login)
pub async fn add_category_form_handler(Extension(session): Extension<Session>) -> Response {
    templates::forms::add_category(
        session.username().as_deref(),
        &CategoryForm::default(),
        &FormErrors::default(),
    )
    .into_response()
}

// POST /category/add/ (requiere login)
pub async fn add_category_handler(
    State(pool): State<DbPool>,
    Extension(session): Extension<Session>,
    Form(form): Form<CategoryForm>,
) -> Result<Response, AppError> {
    let errors = match form.clean() {
        Ok(category) => {
            let result = sqlx::query(
                "INSERT INTO categories (name, slug, views, likes) VALUES (?, ?, 0, 0)",
            )
            .bind(&category.name)
            .bind(&category.slug)
            .execute(&pool)
            .await;

            match result {
                Ok(_) => {
                    tracing::info!("Categoría creada: {} ({})", category.name, category.slug);
                    return Ok(Redirect::to("/").into_response());
                }
                Err(e) if is_unique_violation(&e) => {
                    let mut errors = FormErrors::default();
                    errors.add("name", DUPLICATE_NAME);
                    errors
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(errors) => errors,
    };

    // Formulario con errores: se registran y se vuelve a mostrar
    tracing::warn!("Formulario de categoría inválido: {}", errors);
    Ok(templates::forms::add_category(session.username().as_deref(), &form, &errors).into_response())
}
