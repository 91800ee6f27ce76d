/// Slugs que chocan con rutas fijas bajo `/category/`.
pub const RESERVED_SLUGS: &[&str] = &["add"];

/// Convierte un nombre legible en un identificador apto para URL:
/// minúsculas, alfanuméricos ASCII y guiones simples entre palabras.
///
/// Las letras no ASCII se transliteran ("Ñandú" da "nandu"); lo que no
/// tiene equivalente ASCII se descarta, así que el resultado puede quedar
/// vacío y el formulario lo rechaza.
pub fn slugify(input: &str) -> String {
    ::slug::slugify(input)
}

pub fn is_reserved(slug: &str) -> bool {
    RESERVED_SLUGS.contains(&slug)
}
