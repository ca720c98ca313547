use axum::{
    body::Bytes,
    extract::{Multipart, multipart::MultipartRejection},
};
use std::collections::HashMap;
use tracing::debug;

use crate::error::{Result, ServiceError};

#[derive(Debug)]
pub struct UploadedFile {
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadedFile {
    /// Browsers send an empty, unnamed part when a file input is left blank.
    pub fn is_present(&self) -> bool {
        self.filename.as_deref().is_some_and(|name| !name.is_empty()) || !self.bytes.is_empty()
    }
}

/// A fully-read multipart form: plain fields and file parts by field name.
#[derive(Debug, Default)]
pub struct FormData {
    fields: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl FormData {
    pub async fn read(
        multipart: std::result::Result<Multipart, MultipartRejection>,
    ) -> Result<Self> {
        let mut multipart = multipart?;
        let mut form = FormData::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if field.file_name().is_some() {
                let filename = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?;
                debug!(field = %name, size = %bytes.len(), "Read file part");
                form.files.insert(
                    name,
                    UploadedFile {
                        filename,
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

    pub fn require(&self, name: &str) -> Result<String> {
        self.fields
            .get(name)
            .cloned()
            .ok_or_else(|| ServiceError::InvalidRequest(format!("missing form field `{name}`")))
    }

    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name).filter(UploadedFile::is_present)
    }
}
