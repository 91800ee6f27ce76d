use serde::Deserialize;

use super::{clean_url, normalize_url, required_text, FormErrors, REQUIRED};
use crate::models::page::{NewPage, TITLE_MAX_LENGTH, URL_MAX_LENGTH};

#[derive(Debug, Default, Clone, Deserialize)]
pub struct PageForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
}

impl PageForm {
    pub fn clean(&self) -> Result<NewPage, FormErrors> {
        let mut errors = FormErrors::default();
        let title = required_text(&mut errors, "title", &self.title, TITLE_MAX_LENGTH);

        let mut url = normalize_url(&self.url);
        if url.is_empty() {
            errors.add("url", REQUIRED);
        } else {
            url = clean_url(&mut errors, "url", &url, URL_MAX_LENGTH);
        }

        errors.into_result(NewPage { title, url })
    }
}
