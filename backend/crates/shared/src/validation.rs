//! Field Validation
//!
//! Collects every field violation of an input before failing, so clients
//! get the whole list in one response instead of fixing fields one by one.

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;

/// A single rejected input field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: Cow<'static, str>,
    pub message: Cow<'static, str>,
}

/// Accumulated field violations
///
/// ## Examples
/// ```rust
/// use kernel::validation::ValidationErrors;
///
/// let mut errors = ValidationErrors::new();
/// errors.check(false, "name", "Name is required");
/// errors.check(true, "price", "Price should be a positive number");
/// assert_eq!(errors.len(), 1);
/// assert!(errors.into_result().is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    violations: Vec<FieldViolation>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation for `field`
    pub fn push(
        &mut self,
        field: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) {
        self.violations.push(FieldViolation {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Record a violation unless `ok` holds
    pub fn check(
        &mut self,
        ok: bool,
        field: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) {
        if !ok {
            self.push(field, message);
        }
    }

    /// Unwrap a field-level parse result, recording its error on failure
    ///
    /// Returns `None` when the value was rejected so callers can keep
    /// validating the remaining fields.
    pub fn capture<T, E: fmt::Display>(
        &mut self,
        field: &'static str,
        result: Result<T, E>,
    ) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.push(field, e.to_string());
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Whether any violation concerns `field`
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }

    /// `Ok(())` when nothing was recorded
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }

    pub fn into_violations(self) -> Vec<FieldViolation> {
        self.violations
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for v in &self.violations {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", v.field, v.message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
