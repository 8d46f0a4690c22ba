//! Submission Builder — turns a job description plus uploaded files into the
//! multipart payload the ranking service expects.

use std::path::Path;

use anyhow::{Context, Result};
use bytes::Bytes;
use reqwest::multipart::{Form, Part};

use crate::errors::{TransportError, ValidationError};

pub const JOB_DESCRIPTION_FIELD: &str = "job_description";
pub const RESUMES_FIELD: &str = "resumes";

const PDF_CONTENT_TYPE: &str = "application/pdf";
const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// An uploaded resume file, held in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct ResumeFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl ResumeFile {
    /// Content type is inferred from the file extension.
    pub fn new(filename: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        let filename = filename.into();
        let content_type = content_type_for(&filename).to_string();
        Self {
            filename,
            content_type,
            bytes: bytes.into(),
        }
    }

    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .with_context(|| format!("'{}' has no usable file name", path.display()))?
            .to_string();
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read resume '{}'", path.display()))?;
        Ok(Self::new(filename, bytes))
    }
}

fn content_type_for(filename: &str) -> &'static str {
    let is_pdf = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
    if is_pdf {
        PDF_CONTENT_TYPE
    } else {
        FALLBACK_CONTENT_TYPE
    }
}

/// The multipart body of one ranking request, before it is rendered to the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct MultipartPayload {
    pub job_description: String,
    pub resumes: Vec<ResumeFile>,
}

impl MultipartPayload {
    /// Renders the payload as a `multipart/form-data` form: one `job_description`
    /// text part followed by one `resumes` file part per file, in order.
    pub fn into_form(self) -> Result<Form, TransportError> {
        let mut form = Form::new().text(JOB_DESCRIPTION_FIELD, self.job_description);
        for resume in self.resumes {
            let part = Part::bytes(resume.bytes.to_vec())
                .file_name(resume.filename)
                .mime_str(&resume.content_type)?;
            form = form.part(RESUMES_FIELD, part);
        }
        Ok(form)
    }
}

/// Rejects input the user must fix before anything is sent.
/// The job description is checked before the file set.
pub fn validate(job_description: &str, files: &[ResumeFile]) -> Result<(), ValidationError> {
    if job_description.trim().is_empty() {
        return Err(ValidationError::BlankJobDescription);
    }
    if files.is_empty() {
        return Err(ValidationError::NoResumes);
    }
    Ok(())
}

/// Pure: never fails, even for empty input.
pub fn build(job_description: &str, files: &[ResumeFile]) -> MultipartPayload {
    MultipartPayload {
        job_description: job_description.trim().to_string(),
        resumes: files.to_vec(),
    }
}
