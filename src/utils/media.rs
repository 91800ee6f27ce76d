use std::path::Path;

use axum::body::Bytes;
use mime::Mime;
use tokio::fs;
use uuid::Uuid;

use crate::error::AppError;

// Subcarpeta (dentro de MEDIA_ROOT) donde se guardan las fotos de perfil
pub const PROFILE_IMAGES_DIR: &str = "profile_images";
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024; // 5MB

/// Un archivo de imagen recibido en un formulario multipart.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub file_name: String,
    pub content_type: Option<Mime>,
    pub data: Bytes,
}

impl UploadedImage {
    /// Comprueba tamaño y tipo MIME; devuelve el mensaje para el formulario.
    pub fn validate(&self) -> Result<(), String> {
        if self.data.is_empty() {
            return Err("The submitted file is empty.".to_string());
        }
        if self.data.len() > MAX_IMAGE_BYTES {
            return Err("The image exceeds the 5MB size limit.".to_string());
        }

        // Solo imágenes comunes
        if let Some(ct) = &self.content_type {
            let allowed = matches!(
                (ct.type_().as_str(), ct.subtype().as_str()),
                ("image", "jpeg") | ("image", "png") | ("image", "webp") | ("image", "gif")
            );
            if !allowed {
                return Err("Upload a valid image (jpg, png, webp, gif).".to_string());
            }
        }

        Ok(())
    }

    fn extension(&self) -> &str {
        Path::new(&self.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .filter(|ext| ext.chars().all(|c| c.is_ascii_alphanumeric()))
            .unwrap_or("jpg")
    }
}

/// Guarda la imagen con un nombre único y devuelve su ruta relativa a
/// `media_root` (ej: "profile_images/550e8400-....png").
pub async fn save_profile_picture(
    media_root: &Path,
    image: &UploadedImage,
) -> Result<String, AppError> {
    let dir = media_root.join(PROFILE_IMAGES_DIR);
    fs::create_dir_all(&dir).await?;

    let new_filename = format!("{}.{}", Uuid::new_v4(), image.extension().to_lowercase());
    fs::write(dir.join(&new_filename), &image.data).await?;

    tracing::debug!("Imagen de perfil guardada: {}", new_filename);
    Ok(format!("{}/{}", PROFILE_IMAGES_DIR, new_filename))
}

/// Borra una foto ya guardada cuyo registro no llegó a la base de datos.
pub async fn discard_profile_picture(media_root: &Path, relative: &str) {
    if let Err(e) = fs::remove_file(media_root.join(relative)).await {
        tracing::warn!("No se pudo borrar la imagen huérfana {}: {}", relative, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(name: &str, ct: Option<&str>, len: usize) -> UploadedImage {
        UploadedImage {
            file_name: name.to_string(),
            content_type: ct.and_then(|c| c.parse().ok()),
            data: Bytes::from(vec![0u8; len]),
        }
    }

    #[test]
    fn rejects_non_images_and_oversized_files() {
        assert!(image("a.png", Some("image/png"), 10).validate().is_ok());
        assert!(image("a.txt", Some("text/plain"), 10).validate().is_err());
        assert!(image("a.png", Some("image/png"), MAX_IMAGE_BYTES + 1)
            .validate()
            .is_err());
        assert!(image("a.png", Some("image/png"), 0).validate().is_err());
    }

    #[test]
    fn odd_extensions_fall_back_to_jpg() {
        assert_eq!(image("photo.PNG", None, 1).extension(), "PNG");
        assert_eq!(image("no-extension", None, 1).extension(), "jpg");
        assert_eq!(image("evil.p/hp", None, 1).extension(), "jpg");
    }

    #[tokio::test]
    async fn saves_under_profile_images() {
        let dir = tempfile::tempdir().unwrap();
        let img = image("me.webp", Some("image/webp"), 16);

        let relative = save_profile_picture(dir.path(), &img).await.unwrap();

        assert!(relative.starts_with("profile_images/"));
        assert!(relative.ends_with(".webp"));
        let stored = std::fs::read(dir.path().join(&relative)).unwrap();
        assert_eq!(stored.len(), 16);
    }

    #[tokio::test]
    async fn discarded_picture_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let img = image("me.png", Some("image/png"), 8);
        let relative = save_profile_picture(dir.path(), &img).await.unwrap();

        discard_profile_picture(dir.path(), &relative).await;
        assert!(!dir.path().join(&relative).exists());

        // Borrar dos veces no falla
        discard_profile_picture(dir.path(), &relative).await;
    }
}
