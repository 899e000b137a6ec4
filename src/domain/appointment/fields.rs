//! src/domain/appointment/fields.rs
use super::ValidationError;

/// Required fields only need to be present and not blank.
fn non_blank(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.trim().is_empty())
}

#[derive(Debug, Clone)]
pub struct PatientName(String);

impl PatientName {
    pub fn parse(s: Option<String>) -> Result<Self, ValidationError> {
        non_blank(s).map(Self).ok_or(ValidationError::MissingName)
    }
}

impl AsRef<str> for PatientName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PatientName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

/// The address the patient typed. Presence is the only requirement.
#[derive(Debug, Clone)]
pub struct PatientEmail(String);

impl PatientEmail {
    pub fn parse(s: Option<String>) -> Result<Self, ValidationError> {
        non_blank(s).map(Self).ok_or(ValidationError::MissingEmail)
    }
}

impl AsRef<str> for PatientEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PatientEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

#[derive(Debug, Clone)]
pub struct PatientMessage(String);

impl PatientMessage {
    pub fn parse(s: Option<String>) -> Result<Self, ValidationError> {
        non_blank(s).map(Self).ok_or(ValidationError::MissingMessage)
    }
}

impl AsRef<str> for PatientMessage {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PatientMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}
