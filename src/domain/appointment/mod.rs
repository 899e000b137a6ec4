//! src/domain/appointment/mod.rs
mod fields;
pub use fields::{PatientEmail, PatientMessage, PatientName};

mod phone;
pub use phone::{Phone, PHONE_PLACEHOLDER};

use crate::routes::AppointmentForm;

/// `Display` text is returned to the visitor as-is.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("O campo nome é obrigatório.")]
    MissingName,
    #[error("O campo e-mail é obrigatório.")]
    MissingEmail,
    #[error("O campo mensagem é obrigatório.")]
    MissingMessage,
}

/// A validated appointment request. Lives for one request only.
#[derive(Debug, Clone)]
pub struct AppointmentRequest {
    pub name: PatientName,
    pub phone: Phone,
    pub email: PatientEmail,
    pub message: PatientMessage,
}

impl AppointmentRequest {
    pub fn subject(&self) -> String {
        format!("Agendar Consulta: {}", self.name)
    }

    pub fn email_body(&self) -> String {
        format!(
            "Você recebeu uma nova mensagem de contato:\n\
             \n\
             Nome: {}\n\
             Telefone: {}\n\
             Email: {}\n\
             \n\
             Mensagem:\n\
             {}\n",
            self.name, self.phone, self.email, self.message
        )
    }
}

impl TryFrom<AppointmentForm> for AppointmentRequest {
    type Error = ValidationError;

    // Form order; the first missing field wins.
    fn try_from(form: AppointmentForm) -> Result<Self, Self::Error> {
        let name = PatientName::parse(form.name)?;
        let email = PatientEmail::parse(form.email)?;
        let message = PatientMessage::parse(form.message)?;

        Ok(Self {
            name,
            phone: Phone::parse(form.phone),
            email,
            message,
        })
    }
}
