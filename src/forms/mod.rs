//! Formularios HTML: valores tal como llegan del navegador y su limpieza.
//!
//! `clean` nunca toca la base de datos; las restricciones de unicidad se
//! comprueban al insertar y se añaden como error del campo correspondiente.

use std::{collections::BTreeMap, fmt};

use axum::http::HeaderValue;

pub mod category;
pub mod page;
pub mod user;

pub use category::CategoryForm;
pub use page::PageForm;
pub use user::{NewUser, RegistrationForm};

pub const REQUIRED: &str = "This field is required.";

/// Errores de validación agrupados por campo.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<&'static str, Vec<String>>);

impl FormErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn field(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_result<T>(self, value: T) -> Result<T, FormErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Exige un valor no vacío (tras recortar espacios) de como mucho `max` caracteres.
pub(crate) fn required_text(
    errors: &mut FormErrors,
    field: &'static str,
    raw: &str,
    max: usize,
) -> String {
    let value = raw.trim();
    if value.is_empty() {
        errors.add(field, REQUIRED);
    } else {
        check_max_length(errors, field, value, max);
    }
    value.to_string()
}

pub(crate) fn check_max_length(errors: &mut FormErrors, field: &'static str, value: &str, max: usize) {
    let len = value.chars().count();
    if len > max {
        errors.add(
            field,
            format!("Ensure this value has at most {max} characters (it has {len})."),
        );
    }
}

/// Añade `http://` cuando la URL no trae esquema http/https.
pub fn normalize_url(raw: &str) -> String {
    let url = raw.trim();
    let lower = url.to_ascii_lowercase();
    if url.is_empty() || lower.starts_with("http://") || lower.starts_with("https://") {
        url.to_string()
    } else {
        format!("http://{url}")
    }
}

/// Valida una URL absoluta http(s) con host y devuelve su forma canónica
/// (caracteres de control y espacios del path quedan codificados con `%`).
/// Lo guardado tiene que poder ir tal cual en una cabecera `Location`.
pub(crate) fn clean_url(
    errors: &mut FormErrors,
    field: &'static str,
    value: &str,
    max: usize,
) -> String {
    let parsed = url::Url::parse(value).ok().filter(|u| {
        matches!(u.scheme(), "http" | "https") && u.host_str().is_some_and(|h| !h.is_empty())
    });

    let Some(parsed) = parsed.filter(|_| !value.chars().any(char::is_whitespace)) else {
        errors.add(field, "Enter a valid URL.");
        return value.to_string();
    };

    let canonical = parsed.to_string();
    if HeaderValue::try_from(canonical.as_str()).is_err() {
        errors.add(field, "Enter a valid URL.");
        return value.to_string();
    }

    check_max_length(errors, field, &canonical, max);
    canonical
}
