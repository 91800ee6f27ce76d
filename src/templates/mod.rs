//! Vistas HTML renderizadas con maud.

use maud::{html, Markup, DOCTYPE};

use crate::forms::FormErrors;

pub mod forms;
pub mod rango;

const CSS: &str = "body{font-family:sans-serif;max-width:48rem;margin:0 auto;padding:1rem}\
nav ul{list-style:none;padding:0;display:flex;gap:1rem;flex-wrap:wrap}\
ul.errorlist{color:#b00020;margin:.25rem 0}";

/// Documento base: cabecera, navegación según haya sesión y contenido.
pub fn base_document(title: &str, user: Option<&str>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "Rango - " (title) }
                style { (CSS) }
            }
            body {
                header {
                    nav {
                        ul {
                            li { a href="/" { "Home" } }
                            li { a href="/about/" { "About" } }
                            @if user.is_some() {
                                li { a href="/category/add/" { "Add a New Category" } }
                                li { a href="/restricted/" { "Restricted Page" } }
                                li { a href="/logout/" { "Logout" } }
                            } @else {
                                li { a href="/register/" { "Sign Up" } }
                                li { a href="/login/" { "Login" } }
                            }
                        }
                    }
                }
                main { (content) }
            }
        }
    }
}

pub(crate) fn field_errors(errors: &FormErrors, field: &str) -> Markup {
    let messages = errors.field(field);
    html! {
        @if !messages.is_empty() {
            ul.errorlist {
                @for message in messages {
                    li { (message) }
                }
            }
        }
    }
}
