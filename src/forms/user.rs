use super::{clean_url, normalize_url, required_text, FormErrors, REQUIRED};
use crate::{models::user::USERNAME_MAX_LENGTH, utils::media::UploadedImage};

pub const DUPLICATE_USERNAME: &str = "A user with that username already exists.";
const WEBSITE_MAX_LENGTH: usize = 200;

/// Campos del formulario de registro (usuario + perfil).
#[derive(Debug, Default, Clone)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub website: String,
    pub picture: Option<UploadedImage>,
}

/// Registro ya validado, listo para guardar.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub website: Option<String>,
    pub picture: Option<UploadedImage>,
}

impl RegistrationForm {
    /// Asigna un campo de texto recibido por nombre; los desconocidos se ignoran.
    pub fn set_text(&mut self, name: &str, value: String) {
        match name {
            "username" => self.username = value,
            "email" => self.email = value,
            "password" => self.password = value,
            "website" => self.website = value,
            _ => tracing::debug!("Campo de registro desconocido: {}", name),
        }
    }

    pub fn clean(&self) -> Result<NewUser, FormErrors> {
        let mut errors = FormErrors::default();

        let username = required_text(&mut errors, "username", &self.username, USERNAME_MAX_LENGTH);
        if !username.is_empty()
            && !username
                .chars()
                .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
        {
            errors.add(
                "username",
                "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.",
            );
        }

        let email = self.email.trim().to_string();
        if !email.is_empty() && !looks_like_email(&email) {
            errors.add("email", "Enter a valid email address.");
        }

        // La contraseña no se recorta: los espacios cuentan
        if self.password.is_empty() {
            errors.add("password", REQUIRED);
        }

        let mut website = normalize_url(&self.website);
        if !website.is_empty() {
            website = clean_url(&mut errors, "website", &website, WEBSITE_MAX_LENGTH);
        }

        if let Some(picture) = &self.picture {
            if let Err(message) = picture.validate() {
                errors.add("picture", message);
            }
        }

        errors.into_result(NewUser {
            username,
            email,
            password: self.password.clone(),
            website: (!website.is_empty()).then_some(website),
            picture: self.picture.clone(),
        })
    }
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}
