// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Uploaded document attached to an application.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentType {
    #[serde(rename = "RESUME")]
    Resume,
    #[serde(rename = "COVER LETTER", alias = "COVER_LETTER")]
    CoverLetter,
    #[serde(rename = "COLD EMAIL", alias = "COLD_EMAIL")]
    ColdEmail,
    #[serde(rename = "OTHERS", alias = "OTHER")]
    Others,
}

impl std::str::FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_value(serde_json::Value::String(s.trim().to_ascii_uppercase()))
            .map_err(|_| format!("Unknown document type: {}", s))
    }
}

/// Stored document metadata; the bytes live in the file store under `file`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobDocument {
    pub id: u64,
    pub owner_id: u64,
    /// Linked application ID
    pub job: u64,
    /// File store key
    pub file: String,
    /// Name the file was uploaded with
    pub file_name: String,
    pub doc_types: DocumentType,
    pub uploaded_at: DateTime<Utc>,
}

/// Metadata a client may change after upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentInput {
    pub job: u64,
    pub doc_types: DocumentType,
}

impl JobDocument {
    pub fn to_input(&self) -> DocumentInput {
        DocumentInput {
            job: self.job,
            doc_types: self.doc_types,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_type_parse() {
        assert_eq!("resume".parse::<DocumentType>(), Ok(DocumentType::Resume));
        assert_eq!(
            "COVER LETTER".parse::<DocumentType>(),
            Ok(DocumentType::CoverLetter)
        );
        assert_eq!(
            "cold_email".parse::<DocumentType>(),
            Ok(DocumentType::ColdEmail)
        );
        assert!("PAYSLIP".parse::<DocumentType>().is_err());
    }

    #[test]
    fn test_document_type_serializes_with_space() {
        let value = serde_json::to_value(DocumentType::CoverLetter).unwrap();
        assert_eq!(value, "COVER LETTER");
    }
}
