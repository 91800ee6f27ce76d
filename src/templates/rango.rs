use maud::{html, Markup};

use super::base_document;
use crate::models::{category::Category, page::Page};

pub const BOLD_MESSAGE: &str = "Crunchy, creamy, cookie, candy, cupcake!";
pub const CATEGORY_NOT_FOUND: &str = "The specified category does not exist.";
pub const RESTRICTED_TEXT: &str = "Since you're logged in, you can see this text!";

pub fn index(
    user: Option<&str>,
    categories: &[Category],
    pages: &[Page],
    visits: u64,
) -> Markup {
    let content = html! {
        h1 { "Rango says..." }
        div {
            @if let Some(name) = user {
                "howdy " (name) "!"
            } @else {
                "hey there partner!"
            }
            br;
            strong { (BOLD_MESSAGE) }
        }
        div {
            h2 { "Most Liked Categories" }
            @if categories.is_empty() {
                strong { "There are no categories present." }
            } @else {
                ul {
                    @for category in categories {
                        li { a href={ "/category/" (category.slug) "/" } { (category.name) } }
                    }
                }
            }
        }
        div {
            h2 { "Most Viewed Pages" }
            @if pages.is_empty() {
                strong { "There are no pages present." }
            } @else {
                ul {
                    @for page in pages {
                        li { a href={ "/goto/?page_id=" (page.id) } { (page.title) } }
                    }
                }
            }
        }
        p { "Visits: " span #visits { (visits) } }
    };

    base_document("Homepage", user, content)
}

pub fn about(user: Option<&str>, visits: u64) -> Markup {
    let content = html! {
        h1 { "Rango says here is the about page." }
        p { "This tutorial has been put together by the Rango team." }
        p { "Visits: " span #visits { (visits) } }
    };

    base_document("About", user, content)
}

pub fn category(user: Option<&str>, category: Option<&Category>, pages: &[Page]) -> Markup {
    let title = category.map(|c| c.name.as_str()).unwrap_or("Unknown Category");

    let content = html! {
        @if let Some(category) = category {
            h1 { (category.name) }
            p { "Likes: " span #likes { (category.likes) } }
            @if pages.is_empty() {
                strong { "No pages currently in category." }
            } @else {
                ul {
                    @for page in pages {
                        li { a href={ "/goto/?page_id=" (page.id) } { (page.title) } }
                    }
                }
            }
            @if user.is_some() {
                p { a href={ "/like_category/?category_id=" (category.id) } { "Like" } }
                p { a href={ "/category/" (category.slug) "/add_page/" } { "Add Page" } }
            }
        } @else {
            strong { (CATEGORY_NOT_FOUND) }
        }
    };

    base_document(title, user, content)
}

pub fn restricted(user: Option<&str>) -> Markup {
    let content = html! {
        h1 { "Rango says..." }
        p { (RESTRICTED_TEXT) }
    };

    base_document("Restricted Page", user, content)
}
