//! src/domain/appointment/phone.rs

/// What the email shows when the patient left the phone field empty.
pub const PHONE_PLACEHOLDER: &str = "não informado";

/// Optional contact number; blank input counts as not provided.
#[derive(Debug, Clone, Default)]
pub struct Phone(Option<String>);

impl Phone {
    pub fn parse(s: Option<String>) -> Self {
        Self(s.filter(|s| !s.trim().is_empty()))
    }
}

impl std::fmt::Display for Phone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Some(phone) => write!(f, "{}", phone),
            None => write!(f, "{}", PHONE_PLACEHOLDER),
        }
    }
}
