use sqlx::FromRow;

pub const TITLE_MAX_LENGTH: usize = 128;
pub const URL_MAX_LENGTH: usize = 200;

#[derive(Debug, Clone, FromRow)]
pub struct Page {
    pub id: i64,
    pub category_id: i64,
    pub title: String,
    pub url: String,
    pub views: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPage {
    pub title: String,
    pub url: String,
}
