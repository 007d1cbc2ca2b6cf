// Key/value variables of hosted pages (/api/html-hosting-variable)

use crate::domain::error::{DomainError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Literal prefix every variable key carries
pub const VARIABLE_KEY_PREFIX: &str = "var_";

/// Validated variable key (`var_` + `[A-Za-z0-9_]+`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct VariableKey(String);

impl VariableKey {
    pub fn parse(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        let valid = key
            .strip_prefix(VARIABLE_KEY_PREFIX)
            .map(|rest| {
                !rest.is_empty() && rest.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
            })
            .unwrap_or(false);

        if !valid {
            return Err(DomainError::InvalidVariableKey {
                key,
                prefix: VARIABLE_KEY_PREFIX,
            });
        }
        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VariableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    pub key: String,
    pub value: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct VariableBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<&'a VariableKey>,
    pub value: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_requires_prefix() {
        assert!(VariableKey::parse("var_title").is_ok());
        assert!(VariableKey::parse("var_A1_b2").is_ok());

        let err = VariableKey::parse("title").unwrap_err();
        assert!(matches!(err, DomainError::InvalidVariableKey { .. }));
        assert!(err.to_string().contains("var_"));
    }

    #[test]
    fn test_key_rejects_bare_prefix_and_bad_chars() {
        assert!(VariableKey::parse("var_").is_err());
        assert!(VariableKey::parse("VAR_title").is_err());
        assert!(VariableKey::parse("var_has space").is_err());
        assert!(VariableKey::parse("var_dash-ed").is_err());
        assert!(VariableKey::parse("").is_err());
    }
}
