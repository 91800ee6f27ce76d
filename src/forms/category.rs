use serde::Deserialize;

use super::{required_text, FormErrors};
use crate::{
    models::category::{NewCategory, NAME_MAX_LENGTH},
    utils::slug::{is_reserved, slugify},
};

pub const DUPLICATE_NAME: &str = "Category with this Name already exists.";

#[derive(Debug, Default, Clone, Deserialize)]
pub struct CategoryForm {
    #[serde(default)]
    pub name: String,
}

impl CategoryForm {
    pub fn clean(&self) -> Result<NewCategory, FormErrors> {
        let mut errors = FormErrors::default();
        let name = required_text(&mut errors, "name", &self.name, NAME_MAX_LENGTH);

        let slug = slugify(&name);
        if errors.is_empty() {
            if slug.is_empty() {
                errors.add("name", "The name must contain at least one letter or digit.");
            } else if is_reserved(&slug) {
                errors.add("name", format!("'{name}' is a reserved name."));
            }
        }

        errors.into_result(NewCategory { name, slug })
    }
}
