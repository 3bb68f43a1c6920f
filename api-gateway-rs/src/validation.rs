//! API Gateway Input Validation
//!
//! Request validation for the gateway: the search query check and the
//! contract upload pipeline (multipart field, file type, text extraction).

use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{info, warn};

use crate::ErrorResponse;

/// Multipart field carrying the contract file
pub const CONTRACT_FIELD: &str = "contract";

pub const PDF_MIME: &str = "application/pdf";
pub const TEXT_MIME: &str = "text/plain";

/// Validation error for API requests
#[derive(Debug, thiserror::Error)]
pub enum ApiValidationError {
    #[error("Query is required")]
    MissingQuery,

    #[error(transparent)]
    Upload(#[from] ContractUploadError),
}

/// Why a contract upload was refused
#[derive(Debug, thiserror::Error)]
pub enum ContractUploadError {
    #[error("No file uploaded")]
    NoFile,

    #[error("Invalid multipart request: {0}")]
    Malformed(String),

    #[error("Failed to parse PDF file. Please ensure it is a valid document.")]
    PdfParse(String),

    #[error("Unsupported file type. Please upload a PDF or TXT file.")]
    UnsupportedType(String),

    #[error("The uploaded file appears to be empty or unreadable.")]
    EmptyText,
}

impl From<MultipartError> for ContractUploadError {
    fn from(err: MultipartError) -> Self {
        ContractUploadError::Malformed(err.body_text())
    }
}

impl ApiValidationError {
    /// Convert to HTTP status code and error response
    pub fn to_response(&self) -> (StatusCode, Json<ErrorResponse>) {
        (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(self.to_string())))
    }
}

impl IntoResponse for ApiValidationError {
    fn into_response(self) -> Response {
        self.to_response().into_response()
    }
}

/// Rejects a missing or blank search query, returning it trimmed.
pub fn validate_query(query: Option<&str>) -> Result<&str, ApiValidationError> {
    match query.map(str::trim) {
        Some(q) if !q.is_empty() => Ok(q),
        _ => Err(ApiValidationError::MissingQuery),
    }
}

/// A contract file pulled out of a multipart request
#[derive(Debug, Clone)]
pub struct ContractUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Media type without parameters, lowercased ("text/plain; charset=utf-8" is
/// "text/plain").
fn essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Reads the `contract` field from a multipart body. Other fields are
/// skipped.
pub async fn read_contract_upload(
    multipart: &mut Multipart,
) -> Result<ContractUpload, ContractUploadError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(CONTRACT_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or("contract").to_string();
        let content_type = field
            .content_type()
            .map(essence)
            .unwrap_or_else(|| "application/octet-stream".to_string());
        let bytes = field.bytes().await?.to_vec();

        info!(
            file = %file_name,
            mime = %content_type,
            size = bytes.len(),
            "Analyzing contract"
        );

        return Ok(ContractUpload {
            file_name,
            content_type,
            bytes,
        });
    }

    Err(ContractUploadError::NoFile)
}

/// Extracts contract text by media type: PDF through `pdf-extract`, plain
/// text as UTF-8. Anything else is refused, as is text that is blank once
/// extracted.
pub async fn extract_contract_text(upload: ContractUpload) -> Result<String, ContractUploadError> {
    let text = match upload.content_type.as_str() {
        PDF_MIME => {
            // The parser is synchronous and may panic on hostile input.
            let parsed = tokio::task::spawn_blocking(move || {
                pdf_extract::extract_text_from_mem(&upload.bytes)
            })
            .await;

            match parsed {
                Ok(Ok(text)) => {
                    info!(length = text.len(), "PDF parsed");
                    text
                }
                Ok(Err(err)) => {
                    warn!(error = %err, "PDF parsing failed");
                    return Err(ContractUploadError::PdfParse(err.to_string()));
                }
                Err(err) => {
                    warn!(error = %err, "PDF parser aborted");
                    return Err(ContractUploadError::PdfParse(err.to_string()));
                }
            }
        }
        TEXT_MIME => {
            let text = String::from_utf8_lossy(&upload.bytes).into_owned();
            info!(length = text.len(), "Text file read");
            text
        }
        other => {
            warn!(mime = %other, "Unsupported file type");
            return Err(ContractUploadError::UnsupportedType(other.to_string()));
        }
    };

    if text.trim().is_empty() {
        warn!("Extracted contract text is empty");
        return Err(ContractUploadError::EmptyText);
    }

    Ok(text)
}
