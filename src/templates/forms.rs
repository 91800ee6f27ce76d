use maud::{html, Markup};

use super::{base_document, field_errors};
use crate::{
    forms::{CategoryForm, FormErrors, PageForm, RegistrationForm},
    models::{
        category::{Category, NAME_MAX_LENGTH},
        page::{TITLE_MAX_LENGTH, URL_MAX_LENGTH},
    },
};

pub fn add_category(user: Option<&str>, form: &CategoryForm, errors: &FormErrors) -> Markup {
    let content = html! {
        h1 { "Add a Category" }
        form #category_form method="post" action="/category/add/" {
            label for="name" { "Please enter the category name." }
            (field_errors(errors, "name"))
            input #name type="text" name="name" maxlength=(NAME_MAX_LENGTH) value=(form.name) required;
            input type="submit" name="submit" value="Create Category";
        }
    };

    base_document("Add a Category", user, content)
}

pub fn add_page(
    user: Option<&str>,
    category: &Category,
    form: &PageForm,
    errors: &FormErrors,
) -> Markup {
    let content = html! {
        h1 { "Add a Page to " (category.name) }
        form #page_form method="post" action={ "/category/" (category.slug) "/add_page/" } {
            label for="title" { "Please enter the title of the page." }
            (field_errors(errors, "title"))
            input #title type="text" name="title" maxlength=(TITLE_MAX_LENGTH) value=(form.title) required;
            label for="url" { "Please enter the URL of the page." }
            (field_errors(errors, "url"))
            input #url type="text" name="url" maxlength=(URL_MAX_LENGTH) value=(form.url) required;
            input type="submit" name="submit" value="Add Page";
        }
    };

    base_document("Add Page", user, content)
}

pub fn register(
    user: Option<&str>,
    form: &RegistrationForm,
    errors: &FormErrors,
    registered: bool,
) -> Markup {
    let content = html! {
        h1 { "Register for Rango" }
        @if registered {
            p { strong #registered { "Thank you for registering!" } }
            p { a href="/" { "Return to the homepage." } }
        } @else {
            p { "Rango says: " strong { "register here!" } }
            form #user_form method="post" action="/register/" enctype="multipart/form-data" {
                label for="username" { "Username:" }
                (field_errors(errors, "username"))
                input #username type="text" name="username" value=(form.username) required;
                label for="email" { "Email address:" }
                (field_errors(errors, "email"))
                input #email type="email" name="email" value=(form.email);
                label for="password" { "Password:" }
                (field_errors(errors, "password"))
                input #password type="password" name="password" required;
                label for="website" { "Website:" }
                (field_errors(errors, "website"))
                input #website type="text" name="website" value=(form.website);
                label for="picture" { "Picture:" }
                (field_errors(errors, "picture"))
                input #picture type="file" name="picture" accept="image/*";
                input type="submit" name="submit" value="Register";
            }
        }
    };

    base_document("Register", user, content)
}

pub fn login(user: Option<&str>) -> Markup {
    let content = html! {
        h1 { "Login to Rango" }
        form #login_form method="post" action="/login/" {
            label for="username" { "Username:" }
            input #username type="text" name="username" required;
            label for="password" { "Password:" }
            input #password type="password" name="password" required;
            input type="submit" value="submit";
        }
    };

    base_document("Login", user, content)
}
