//! Image uploads for armada, supir and package galleries.
//!
//! Files are read and checked completely before anything is sent to the
//! backend.

use axum::extract::Multipart;
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde_json::Value;

use crate::backend::BackendClient;
use crate::error::AppError;
use crate::model::Envelope;

pub const MAX_FILES_PER_UPLOAD: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageTarget {
    Armada,
    Supir,
    PaketWisata,
    PaketLuarKota,
}

impl ImageTarget {
    fn backend_resource(self) -> &'static str {
        match self {
            Self::Armada => "armada",
            Self::Supir => "supir",
            Self::PaketWisata => "paket-wisata",
            Self::PaketLuarKota => "paket-wisata-luar-kota",
        }
    }

    /// Packages keep several images, vehicles and drivers a single photo.
    pub fn is_gallery(self) -> bool {
        matches!(self, Self::PaketWisata | Self::PaketLuarKota)
    }

    fn field_name(self) -> &'static str {
        if self.is_gallery() {
            "images"
        } else {
            "image"
        }
    }

    pub fn upload_path(self, id: i64) -> String {
        let resource = self.backend_resource();
        if self.is_gallery() {
            format!("/{resource}/upload-images/{id}")
        } else {
            format!("/{resource}/upload-image/{id}")
        }
    }

    pub fn delete_path(self, id: i64) -> String {
        format!("/{}/delete-image/{id}", self.backend_resource())
    }

    fn max_files(self) -> usize {
        if self.is_gallery() {
            MAX_FILES_PER_UPLOAD
        } else {
            1
        }
    }
}

#[derive(Debug, Clone)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

pub fn validate_image(file: &ImageFile, max_bytes: usize) -> Result<(), AppError> {
    if !file.content_type.starts_with("image/") {
        return Err(AppError::validation(format!(
            "{} bukan file gambar",
            file.file_name
        )));
    }
    if file.bytes.is_empty() {
        return Err(AppError::validation(format!("{} kosong", file.file_name)));
    }
    if file.bytes.len() > max_bytes {
        return Err(AppError::validation(format!(
            "Ukuran {} melebihi batas {}MB",
            file.file_name,
            max_bytes / 1024 / 1024
        )));
    }
    Ok(())
}

/// Collect the file fields of the request, rejecting the first invalid one.
pub async fn read_images(
    multipart: &mut Multipart,
    target: ImageTarget,
    max_bytes: usize,
) -> Result<Vec<ImageFile>, AppError> {
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let content_type = field.content_type().unwrap_or_default().to_string();
        // reject on the declared type before buffering the body
        if !content_type.starts_with("image/") {
            return Err(AppError::validation(format!("{file_name} bukan file gambar")));
        }

        let bytes = field.bytes().await?.to_vec();
        let file = ImageFile {
            file_name,
            content_type,
            bytes,
        };
        validate_image(&file, max_bytes)?;
        files.push(file);

        if files.len() > target.max_files() {
            return Err(AppError::validation(format!(
                "Maksimal {} gambar per unggahan",
                target.max_files()
            )));
        }
    }

    if files.is_empty() {
        return Err(AppError::validation("Pilih minimal satu gambar"));
    }
    Ok(files)
}

pub async fn upload(
    backend: &BackendClient,
    target: ImageTarget,
    id: i64,
    files: Vec<ImageFile>,
) -> Result<Value, AppError> {
    let count = files.len();
    let mut form = Form::new();
    for file in files {
        let part = Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.content_type)
            .map_err(|e| AppError::validation(format!("Tipe file tidak valid: {e}")))?;
        form = form.part(target.field_name(), part);
    }

    let uploaded: Envelope<Value> = backend
        .post_multipart(&target.upload_path(id), form)
        .await?;
    tracing::info!(?target, id, count, "images uploaded");
    Ok(uploaded.data)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageNameQuery<'a> {
    image_name: &'a str,
}

pub async fn delete_image(
    backend: &BackendClient,
    target: ImageTarget,
    id: i64,
    image_name: &str,
) -> Result<Value, AppError> {
    let image_name = image_name.trim();
    if image_name.is_empty() {
        return Err(AppError::validation("Nama gambar wajib diisi"));
    }
    let deleted: Value = backend
        .delete_query(&target.delete_path(id), &ImageNameQuery { image_name })
        .await?;
    tracing::info!(?target, id, image_name, "image deleted");
    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(content_type: &str, size: usize) -> ImageFile {
        ImageFile {
            file_name: "foto.jpg".into(),
            content_type: content_type.into(),
            bytes: vec![0u8; size],
        }
    }

    #[test]
    fn rejects_non_images_and_oversized_files() {
        let max = 5 * 1024 * 1024;
        assert!(validate_image(&file("image/jpeg", 1024), max).is_ok());
        assert!(validate_image(&file("application/pdf", 1024), max).is_err());
        assert!(validate_image(&file("image/png", max + 1), max).is_err());
        assert!(validate_image(&file("image/png", 0), max).is_err());
    }

    #[test]
    fn paths_follow_backend_convention() {
        assert_eq!(ImageTarget::Armada.upload_path(3), "/armada/upload-image/3");
        assert_eq!(
            ImageTarget::PaketWisata.upload_path(5),
            "/paket-wisata/upload-images/5"
        );
        assert_eq!(
            ImageTarget::PaketLuarKota.delete_path(2),
            "/paket-wisata-luar-kota/delete-image/2"
        );
    }
}
