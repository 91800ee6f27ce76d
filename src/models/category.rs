use sqlx::FromRow;

/// Longitud máxima del nombre de una categoría.
pub const NAME_MAX_LENGTH: usize = 128;

#[derive(Debug, Clone, FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub views: i64,
    pub likes: i64,
}

// Datos ya validados para insertar una categoría nueva
#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub name: String,
    pub slug: String,
}
