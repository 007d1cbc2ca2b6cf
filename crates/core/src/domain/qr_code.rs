// QR code models (/api/qr-code)

use crate::domain::error::{DomainError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Rendered image format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QrFormat {
    Png,
    Svg,
    Jpg,
    #[serde(other)]
    Unknown,
}

/// Reed-Solomon error correction level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCorrection {
    L,
    M,
    Q,
    H,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCode {
    pub id: String,
    pub name: String,
    pub content: String,
    #[serde(default)]
    pub foreground_color: Option<String>,
    #[serde(default)]
    pub background_color: Option<String>,
    #[serde(default)]
    pub size: Option<u32>,
    #[serde(default)]
    pub format: Option<QrFormat>,
    #[serde(default)]
    pub error_correction: Option<ErrorCorrection>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub scan_count: Option<u64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQrCode {
    pub name: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreground_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<QrFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_correction: Option<ErrorCorrection>,
}

impl CreateQrCode {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn colors(mut self, foreground: impl Into<String>, background: impl Into<String>) -> Self {
        self.foreground_color = Some(foreground.into());
        self.background_color = Some(background.into());
        self
    }

    pub fn size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn format(mut self, format: QrFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn error_correction(mut self, level: ErrorCorrection) -> Self {
        self.error_correction = Some(level);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::Validation("QR code name is empty".to_string()));
        }
        if self.content.is_empty() {
            return Err(DomainError::Validation(
                "QR code content is empty".to_string(),
            ));
        }
        check_color(self.foreground_color.as_deref())?;
        check_color(self.background_color.as_deref())
    }
}

/// Partial update; unset fields are left untouched server-side
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQrCode {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreground_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<QrFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_correction: Option<ErrorCorrection>,
}

impl UpdateQrCode {
    pub fn validate(&self) -> Result<()> {
        if matches!(self.content.as_deref(), Some("")) {
            return Err(DomainError::Validation(
                "QR code content is empty".to_string(),
            ));
        }
        check_color(self.foreground_color.as_deref())?;
        check_color(self.background_color.as_deref())
    }
}

/// Colors travel as `#RRGGBB`
fn check_color(color: Option<&str>) -> Result<()> {
    let Some(c) = color else {
        return Ok(());
    };
    let valid =
        c.len() == 7 && c.starts_with('#') && c[1..].chars().all(|ch| ch.is_ascii_hexdigit());
    if !valid {
        return Err(DomainError::Validation(format!(
            "color '{c}' is not in #RRGGBB form"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_request_validation() {
        assert!(CreateQrCode::new("menu", "https://example.com").validate().is_ok());
        assert!(CreateQrCode::new("menu", "").validate().is_err());
        assert!(CreateQrCode::new(" ", "x").validate().is_err());
        assert!(CreateQrCode::new("menu", "x")
            .colors("#000000", "#FFFFFF")
            .validate()
            .is_ok());
        assert!(CreateQrCode::new("menu", "x")
            .colors("black", "#FFFFFF")
            .validate()
            .is_err());
    }

    #[test]
    fn test_create_request_skips_unset_fields() {
        let body = serde_json::to_value(CreateQrCode::new("menu", "x").size(256)).unwrap();
        assert_eq!(body, json!({"name": "menu", "content": "x", "size": 256}));
    }

    #[test]
    fn test_unknown_format_tolerated() {
        let qr: QrCode = serde_json::from_value(json!({
            "id": "q1", "name": "n", "content": "c", "format": "webp"
        }))
        .unwrap();
        assert_eq!(qr.format, Some(QrFormat::Unknown));
    }
}
