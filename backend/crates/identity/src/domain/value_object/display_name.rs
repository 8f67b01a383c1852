//! Display Name Value Object
//!
//! 表示名は、レビューや管理画面に表示される**人間向けの名前**。
//! ログインには使用しない（ログインはメールアドレス）。
//!
//! ## 設計方針
//! - Unicode を許可（NFC 正規化のみ、大文字小文字は保持）
//! - 前後の空白は除去
//! - 一意性は要求しない
//!
//! ## 不変条件
//! - 長さ: 1〜64文字（正規化後、コードポイント単位）
//! - 制御文字を含まない

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

/// Maximum display name length (in characters)
pub const DISPLAY_NAME_MAX_LENGTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisplayNameError {
    #[error("Name is required")]
    Empty,

    #[error("Name must be at most {DISPLAY_NAME_MAX_LENGTH} characters")]
    TooLong,

    #[error("Name contains invalid characters")]
    InvalidCharacter,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(raw: &str) -> Result<Self, DisplayNameError> {
        let normalized: String = raw.trim().nfc().collect();

        if normalized.is_empty() {
            return Err(DisplayNameError::Empty);
        }
        if normalized.chars().count() > DISPLAY_NAME_MAX_LENGTH {
            return Err(DisplayNameError::TooLong);
        }
        if normalized.chars().any(char::is_control) {
            return Err(DisplayNameError::InvalidCharacter);
        }

        Ok(Self(normalized))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
