//! Upload storage and image pipeline
//!
//! Uploaded files are validated against an [`UploadPolicy`], stored under
//! randomised names in the upload root and addressed by their public path
//! (`/uploads/<name>`). Images are normalised to a bounded-width JPEG; the
//! original upload never survives a successful store.

use std::io;
use std::path::{Component, Path, PathBuf};

use axum::body::Bytes;
use image::{ColorType, GenericImageView, codecs::jpeg::JpegEncoder, imageops::FilterType};
use thiserror::Error;
use uuid::Uuid;

/// Upload ceiling shared by images and documents
pub const MAX_UPLOAD_BYTES: usize = 2 * 1024 * 1024;

/// Stored images are at most this wide
pub const MAX_IMAGE_WIDTH: u32 = 800;

pub const JPEG_QUALITY: u8 = 80;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("O arquivo excede o limite de {} MB.", .max / (1024 * 1024))]
    TooLarge { max: usize, actual: usize },

    #[error("Tipo de arquivo não permitido. Formatos aceitos: {allowed}.")]
    UnsupportedType { allowed: &'static str },

    #[error("Nenhum arquivo enviado.")]
    Empty,

    #[error("Não foi possível processar a imagem.")]
    Decode(#[from] image::ImageError),

    #[error("path escapes the upload root: {0}")]
    OutsideRoot(String),

    #[error("upload storage failed: {0}")]
    Io(#[from] io::Error),

    #[error("image task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl UploadError {
    /// Errors caused by what the user sent, as opposed to storage failures
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::TooLarge { .. } | Self::UnsupportedType { .. } | Self::Empty | Self::Decode(_)
        )
    }
}

/// A file received from a multipart form
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadedFile {
    /// Browsers send an empty part when no file was chosen
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty() && self.file_name.as_deref().is_none_or(str::is_empty)
    }
}

struct Allowed {
    extensions: &'static [&'static str],
    mime: &'static str,
    stored_ext: &'static str,
}

const IMAGE_TYPES: &[Allowed] = &[
    Allowed {
        extensions: &["jpg", "jpeg"],
        mime: "image/jpeg",
        stored_ext: "jpg",
    },
    Allowed {
        extensions: &["png"],
        mime: "image/png",
        stored_ext: "png",
    },
];

const DOCUMENT_TYPES: &[Allowed] = &[
    Allowed {
        extensions: &["pdf"],
        mime: "application/pdf",
        stored_ext: "pdf",
    },
    Allowed {
        extensions: &["docx"],
        mime: "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        stored_ext: "docx",
    },
];

/// Allow-list plus size ceiling for one call site
pub struct UploadPolicy {
    max_bytes: usize,
    allowed: &'static [Allowed],
    label: &'static str,
}

impl UploadPolicy {
    /// JPEG or PNG, 2 MB
    pub fn image() -> Self {
        Self {
            max_bytes: MAX_UPLOAD_BYTES,
            allowed: IMAGE_TYPES,
            label: "JPEG, PNG",
        }
    }

    /// PDF or DOCX, 2 MB
    pub fn document() -> Self {
        Self {
            max_bytes: MAX_UPLOAD_BYTES,
            allowed: DOCUMENT_TYPES,
            label: "PDF, DOCX",
        }
    }

    /// Check size first, then extension and declared MIME type.
    ///
    /// Returns the extension the stored file will carry.
    pub fn validate(&self, file: &UploadedFile) -> Result<&'static str, UploadError> {
        if file.bytes.len() > self.max_bytes {
            return Err(UploadError::TooLarge {
                max: self.max_bytes,
                actual: file.bytes.len(),
            });
        }
        if file.bytes.is_empty() {
            return Err(UploadError::Empty);
        }

        let unsupported = || UploadError::UnsupportedType {
            allowed: self.label,
        };
        let extension = file
            .file_name
            .as_deref()
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .ok_or_else(unsupported)?;
        let mime = file
            .content_type
            .as_deref()
            .map(|m| m.split(';').next().unwrap_or(m).trim().to_ascii_lowercase())
            .unwrap_or_default();

        self.allowed
            .iter()
            .find(|a| a.extensions.contains(&extension.as_str()) && a.mime == mime)
            .map(|a| a.stored_ext)
            .ok_or_else(unsupported)
    }
}

/// Where uploads live on disk and how they are addressed publicly
#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub root: PathBuf,
    pub public_prefix: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("uploads"),
            public_prefix: "/uploads".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct UploadStore {
    config: UploadConfig,
}

impl UploadStore {
    pub fn new(config: UploadConfig) -> Self {
        Self { config }
    }

    pub fn root(&self) -> &Path {
        &self.config.root
    }

    pub async fn ensure_root(&self) -> Result<(), UploadError> {
        tokio::fs::create_dir_all(&self.config.root).await?;
        Ok(())
    }

    fn public_path(&self, name: &str) -> String {
        format!("{}/{}", self.config.public_prefix.trim_end_matches('/'), name)
    }

    /// Store a PDF/DOCX as-is under a random name; returns its public path.
    pub async fn store_document(&self, file: &UploadedFile) -> Result<String, UploadError> {
        let ext = UploadPolicy::document().validate(file)?;
        self.ensure_root().await?;

        let name = format!("{}.{ext}", Uuid::new_v4());
        tokio::fs::write(self.config.root.join(&name), &file.bytes).await?;
        tracing::debug!(file = %name, bytes = file.bytes.len(), "document stored");
        Ok(self.public_path(&name))
    }

    /// Store an image as a resized JPEG; returns its public path.
    ///
    /// The original is written next to the result, decoded, re-encoded to a
    /// temporary file that is renamed into place, and then deleted. On any
    /// failure every file created by this call is removed.
    pub async fn store_image(&self, file: &UploadedFile) -> Result<String, UploadError> {
        let ext = UploadPolicy::image().validate(file)?;
        self.ensure_root().await?;

        let id = Uuid::new_v4();
        let original = self.config.root.join(format!("{id}.upload.{ext}"));
        let partial = self.config.root.join(format!("{id}.jpg.part"));
        let name = format!("{id}.jpg");
        let target = self.config.root.join(&name);

        tokio::fs::write(&original, &file.bytes).await?;

        let result = async {
            let bytes = file.bytes.clone();
            let jpeg = tokio::task::spawn_blocking(move || {
                reencode_jpeg(&bytes, MAX_IMAGE_WIDTH, JPEG_QUALITY)
            })
            .await??;
            tokio::fs::write(&partial, jpeg).await?;
            tokio::fs::rename(&partial, &target).await?;
            Ok::<_, UploadError>(())
        }
        .await;

        remove_if_exists(&original).await;
        if let Err(e) = result {
            remove_if_exists(&partial).await;
            remove_if_exists(&target).await;
            tracing::warn!(error = %e, "image upload discarded");
            return Err(e);
        }

        tracing::debug!(file = %name, "image stored");
        Ok(self.public_path(&name))
    }

    /// Remove a previously stored file by its public path.
    ///
    /// Missing files are ignored; paths outside the upload root are refused.
    pub async fn remove(&self, public_path: &str) -> Result<(), UploadError> {
        let name = public_path
            .strip_prefix(self.config.public_prefix.trim_end_matches('/'))
            .and_then(|rest| rest.strip_prefix('/'))
            .ok_or_else(|| UploadError::OutsideRoot(public_path.to_string()))?;

        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => {}
            _ => return Err(UploadError::OutsideRoot(public_path.to_string())),
        }

        match tokio::fs::remove_file(self.config.root.join(name)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Best-effort removal used after the owning record no longer points here
    pub async fn discard(&self, public_path: Option<&str>) {
        let Some(path) = public_path else {
            return;
        };
        if let Err(e) = self.remove(path).await {
            tracing::warn!(path, error = %e, "failed to remove stored upload");
        }
    }
}

async fn remove_if_exists(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Err(e) if e.kind() != io::ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), error = %e, "failed to remove temporary upload");
        }
        _ => {}
    }
}

/// Decode, shrink to `max_width` (aspect preserved, never upscaled) and
/// encode as JPEG.
pub fn reencode_jpeg(data: &[u8], max_width: u32, quality: u8) -> Result<Vec<u8>, UploadError> {
    let img = image::load_from_memory(data)?;
    let (width, height) = img.dimensions();
    let img = if width > max_width {
        let scaled = (u64::from(height) * u64::from(max_width) / u64::from(width)).max(1);
        img.resize_exact(max_width, scaled as u32, FilterType::Triangle)
    } else {
        img
    };

    let rgb = img.to_rgb8();
    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, quality).encode(
        rgb.as_raw(),
        rgb.width(),
        rgb.height(),
        ColorType::Rgb8,
    )?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageOutputFormat, RgbImage};
    use std::io::Cursor;

    fn png(width: u32, height: u32) -> Bytes {
        let img = RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x * 255 / width) as u8, (y * 255 / height) as u8, 128])
        });
        let mut buf = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut buf, ImageOutputFormat::Png)
            .unwrap();
        Bytes::from(buf.into_inner())
    }

    fn upload(name: &str, mime: &str, bytes: Bytes) -> UploadedFile {
        UploadedFile {
            file_name: Some(name.to_string()),
            content_type: Some(mime.to_string()),
            bytes,
        }
    }

    fn store(dir: &tempfile::TempDir) -> UploadStore {
        UploadStore::new(UploadConfig {
            root: dir.path().to_path_buf(),
            public_prefix: "/uploads".to_string(),
        })
    }

    fn files_in(dir: &tempfile::TempDir) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_policy_rejects_oversize_before_type() {
        let file = upload(
            "foto.exe",
            "application/octet-stream",
            Bytes::from(vec![0u8; 3 * 1024 * 1024]),
        );
        assert!(matches!(
            UploadPolicy::image().validate(&file),
            Err(UploadError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_policy_requires_extension_and_mime_to_agree() {
        let bytes = Bytes::from_static(b"%PDF-1.4");
        assert_eq!(
            UploadPolicy::document()
                .validate(&upload("cv.PDF", "application/pdf", bytes.clone()))
                .unwrap(),
            "pdf"
        );
        assert!(
            UploadPolicy::document()
                .validate(&upload("cv.pdf", "image/png", bytes.clone()))
                .is_err()
        );
        assert!(
            UploadPolicy::document()
                .validate(&upload("cv.txt", "application/pdf", bytes.clone()))
                .is_err()
        );
        assert!(
            UploadPolicy::image()
                .validate(&upload("cv.pdf", "application/pdf", bytes))
                .is_err()
        );
    }

    #[test]
    fn test_policy_accepts_jpeg_aliases() {
        let bytes = Bytes::from_static(b"\xff\xd8\xff");
        assert_eq!(
            UploadPolicy::image()
                .validate(&upload("a.jpeg", "image/jpeg", bytes))
                .unwrap(),
            "jpg"
        );
    }

    #[test]
    fn test_reencode_never_upscales() {
        let jpeg = reencode_jpeg(&png(300, 200), MAX_IMAGE_WIDTH, JPEG_QUALITY).unwrap();
        let img = image::load_from_memory(&jpeg).unwrap();
        assert_eq!(img.dimensions(), (300, 200));
    }

    #[tokio::test]
    async fn test_oversize_upload_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        let file = upload(
            "grande.png",
            "image/png",
            Bytes::from(vec![0u8; 3 * 1024 * 1024]),
        );

        let err = store.store_image(&file).await.unwrap_err();
        assert!(matches!(err, UploadError::TooLarge { .. }));
        assert!(err.is_client_error());
        assert!(files_in(&dir).is_empty());
    }

    #[tokio::test]
    async fn test_png_becomes_bounded_jpeg_and_original_is_removed() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        let file = upload("logo.png", "image/png", png(1200, 600));
        assert!(file.bytes.len() < MAX_UPLOAD_BYTES);

        let public = store.store_image(&file).await.unwrap();
        assert!(public.starts_with("/uploads/") && public.ends_with(".jpg"));

        let names = files_in(&dir);
        assert_eq!(names.len(), 1, "only the derived file remains: {names:?}");
        let stored = std::fs::read(dir.path().join(&names[0])).unwrap();
        let img = image::load_from_memory(&stored).unwrap();
        assert_eq!(img.dimensions(), (800, 400));
    }

    #[tokio::test]
    async fn test_undecodable_image_leaves_no_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        let file = upload("x.png", "image/png", Bytes::from_static(b"not a png"));

        let err = store.store_image(&file).await.unwrap_err();
        assert!(matches!(err, UploadError::Decode(_)));
        assert!(files_in(&dir).is_empty());
    }

    #[tokio::test]
    async fn test_document_store_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        let file = upload("cv.pdf", "application/pdf", Bytes::from_static(b"%PDF-1.4"));

        let public = store.store_document(&file).await.unwrap();
        assert!(public.ends_with(".pdf"));
        assert_eq!(files_in(&dir).len(), 1);

        store.remove(&public).await.unwrap();
        assert!(files_in(&dir).is_empty());
        // Removing twice is fine
        store.remove(&public).await.unwrap();
    }

    #[tokio::test]
    async fn test_remove_refuses_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        for path in ["/uploads/../secret", "/etc/passwd", "/uploads/a/b.jpg", "/uploads/"] {
            assert!(
                matches!(store.remove(path).await, Err(UploadError::OutsideRoot(_))),
                "{path} must be refused"
            );
        }
    }
}
