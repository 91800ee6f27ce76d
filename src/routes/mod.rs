use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::get,
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{
    handlers::{auth, category, page, rango},
    utils::{
        media::MAX_IMAGE_BYTES,
        session::{login_required, session_middleware},
    },
    AppState,
};

// Margen para los campos de texto que acompañan a la foto
const REGISTER_BODY_LIMIT: usize = MAX_IMAGE_BYTES + 1024 * 1024;

pub fn create_routes(state: AppState) -> Router {
    // 1. Rutas públicas
    let public_routes = Router::new()
        .route("/", get(rango::index_handler))
        .route("/about/", get(rango::about_handler))
        .route("/goto/", get(rango::goto_handler))
        .route("/category/:slug/", get(category::show_category_handler))
        .route(
            "/register/",
            get(auth::register_form_handler)
                .post(auth::register_handler)
                .layer(DefaultBodyLimit::max(REGISTER_BODY_LIMIT)),
        )
        .route(
            "/login/",
            get(auth::login_form_handler).post(auth::login_handler),
        )
        .nest_service("/media", ServeDir::new(&state.config.media_root));

    // 2. Rutas que requieren usuario en sesión
    let protected_routes = Router::new()
        .route(
            "/category/add/",
            get(category::add_category_form_handler).post(category::add_category_handler),
        )
        .route(
            "/category/:slug/add_page/",
            get(page::add_page_form_handler).post(page::add_page_handler),
        )
        .route("/like_category/", get(rango::like_category_handler))
        .route("/restricted/", get(rango::restricted_handler))
        .route("/logout/", get(auth::logout_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), login_required));

    // La sesión envuelve a todo, incluido login_required
    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(middleware::from_fn_with_state(state.clone(), session_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
