//! Multipart form reader
//!
//! Collects the text fields and file parts of one request so the same
//! form DTOs serve both encodings.

use std::collections::HashMap;

use axum::extract::Multipart;
use axum::extract::multipart::MultipartError;
use platform::media::UploadedFile;
use serde::de::DeserializeOwned;
use serde::de::value::{Error as ValueError, MapDeserializer};

#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl MultipartForm {
    /// Drain the request body. Parts with a filename are files, the rest text.
    pub async fn read(mut multipart: Multipart) -> Result<Self, MultipartError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if field.file_name().is_some() {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?;
                form.files.insert(
                    name,
                    UploadedFile {
                        file_name,
                        content_type,
                        bytes,
                    },
                );
            } else {
                let value = field.text().await?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }

    /// The uploaded file under `name`, unless the browser sent an empty part
    pub fn file(&self, name: &str) -> Option<&UploadedFile> {
        self.files.get(name).filter(|file| !file.is_empty())
    }

    /// Deserialize the text fields into a form DTO
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, ValueError> {
        let entries = self
            .fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()));
        <T as serde::Deserialize>::deserialize(MapDeserializer::<_, ValueError>::new(entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::dto::CandidateForm;

    #[test]
    fn test_parse_text_fields_into_dto() {
        let mut form = MultipartForm::default();
        form.fields.insert("nomeCompleto".into(), "Ana Souza".into());
        form.fields.insert("cidade".into(), "Recife".into());

        let parsed: CandidateForm = form.parse().unwrap();
        assert_eq!(parsed.full_name, "Ana Souza");
        assert_eq!(parsed.address.city, "Recife");
        assert!(parsed.cpf.is_empty());
    }

    #[test]
    fn test_empty_file_part_counts_as_missing() {
        let mut form = MultipartForm::default();
        form.files.insert(
            "curriculo".into(),
            UploadedFile {
                file_name: Some(String::new()),
                content_type: Some("application/octet-stream".into()),
                bytes: Default::default(),
            },
        );
        assert!(form.file("curriculo").is_none());
    }
}
