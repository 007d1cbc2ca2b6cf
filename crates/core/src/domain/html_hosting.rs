// HTML hosting models (/api/html-hosting)

use crate::domain::error::{DomainError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A hosted HTML page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HtmlPage {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    /// Public address the page is served from
    #[serde(default)]
    pub url: Option<String>,
    /// Object-storage location of the uploaded file
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub size_bytes: Option<u64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Metadata registered before the page content is uploaded
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHtmlPage {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub file_name: String,
    pub content_type: String,
}

impl CreateHtmlPage {
    /// Page whose content is a single `text/html` document
    pub fn html(name: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slug: None,
            file_name: file_name.into(),
            content_type: "text/html".to_string(),
        }
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::Validation("page name is empty".to_string()));
        }
        if self.file_name.trim().is_empty() {
            return Err(DomainError::Validation("file name is empty".to_string()));
        }
        if self.content_type.trim().is_empty() {
            return Err(DomainError::InvalidContentType {
                content_type: self.content_type.clone(),
                expected: "a MIME type",
            });
        }
        Ok(())
    }
}

/// Partial update; `file_name` + `content_type` announce replacement content
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHtmlPage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl UpdateHtmlPage {
    pub fn with_content(
        mut self,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        self.file_name = Some(file_name.into());
        self.content_type = Some(content_type.into());
        self
    }

    pub fn replaces_content(&self) -> bool {
        self.file_name.is_some()
    }

    pub fn validate(&self) -> Result<()> {
        if self.file_name.is_some() != self.content_type.is_some() {
            return Err(DomainError::Validation(
                "file name and content type must be set together".to_string(),
            ));
        }
        Ok(())
    }
}

/// Create/update answer: the record plus where to PUT its content
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HtmlUploadTicket {
    pub page: HtmlPage,
    #[serde(default)]
    pub upload_url: Option<String>,
    #[serde(default)]
    pub file_url: Option<String>,
}
