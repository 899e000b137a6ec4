//! src/routes/appointment.rs
use crate::domain::{AppointmentRequest, ValidationError};
use crate::email::{EmailClient, SendEmailError};
use crate::routes::error_chain_fmt;
use actix_web::error::UrlencodedError;
use actix_web::http::{header, StatusCode};
use actix_web::{web, HttpRequest, HttpResponse, ResponseError};
use serde::Serialize;
use uuid::Uuid;

pub const SUCCESS_MESSAGE: &str = "Mensagem enviada com sucesso!";
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Método não permitido.";
pub const INVALID_FORM_MESSAGE: &str = "Dados do formulário inválidos.";
pub const SERVER_ERROR_MESSAGE: &str = "Ocorreu um erro no servidor. Tente novamente mais tarde.";

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// JSON body of every answer on the submission route.
#[derive(Serialize, Debug)]
pub struct Reply<'a> {
    pub status: Status,
    pub message: &'a str,
}

impl<'a> Reply<'a> {
    pub fn success(message: &'a str) -> Self {
        Self {
            status: Status::Success,
            message,
        }
    }

    pub fn error(message: &'a str) -> Self {
        Self {
            status: Status::Error,
            message,
        }
    }
}

#[derive(serde::Deserialize, Debug)]
pub struct AppointmentForm {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

#[derive(thiserror::Error)]
pub enum AppointmentError {
    #[error("The request body is not a valid form: {0}")]
    InvalidForm(String),
    #[error(transparent)]
    ValidationError(#[from] ValidationError),
    #[error("Failed to deliver the appointment request")]
    DeliveryError(#[source] SendEmailError),
    #[error("Failed to compose the appointment request")]
    UnexpectedError(#[source] SendEmailError),
}

impl std::fmt::Debug for AppointmentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl From<SendEmailError> for AppointmentError {
    fn from(e: SendEmailError) -> Self {
        if e.is_transport() {
            AppointmentError::DeliveryError(e)
        } else {
            AppointmentError::UnexpectedError(e)
        }
    }
}

impl ResponseError for AppointmentError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppointmentError::InvalidForm(_) | AppointmentError::ValidationError(_) => {
                StatusCode::BAD_REQUEST
            }
            AppointmentError::DeliveryError(_) | AppointmentError::UnexpectedError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    // Server-side detail stays in the logs.
    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppointmentError::InvalidForm(_) => INVALID_FORM_MESSAGE.to_string(),
            AppointmentError::ValidationError(e) => e.to_string(),
            AppointmentError::DeliveryError(_) | AppointmentError::UnexpectedError(_) => {
                SERVER_ERROR_MESSAGE.to_string()
            }
        };

        HttpResponse::build(self.status_code()).json(Reply::error(&message))
    }
}

/// Registers `/agendar-consulta/`: POST submits, any other method gets a 405.
pub fn appointment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/agendar-consulta/")
            .app_data(web::FormConfig::default().error_handler(invalid_form))
            .route(web::post().to(request_appointment))
            .default_service(web::route().to(method_not_allowed)),
    );
}

fn invalid_form(err: UrlencodedError, _req: &HttpRequest) -> actix_web::Error {
    AppointmentError::InvalidForm(err.to_string()).into()
}

pub async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed()
        .insert_header((header::ALLOW, "POST"))
        .json(Reply::error(METHOD_NOT_ALLOWED_MESSAGE))
}

#[tracing::instrument(
    name = "Requesting an appointment",
    skip(form, email_client),
    fields(
        request_id = %Uuid::new_v4(),
        patient_name = tracing::field::Empty
    )
)]
pub async fn request_appointment(
    form: web::Form<AppointmentForm>,
    email_client: web::Data<EmailClient>,
) -> Result<HttpResponse, AppointmentError> {
    let request = AppointmentRequest::try_from(form.into_inner())?;
    tracing::Span::current().record("patient_name", &tracing::field::display(&request.name));

    let subject = request.subject();
    let body = request.email_body();

    if let Err(e) = email_client.send_email(&subject, &body).await {
        let transport_failure = e.is_transport();
        let error = AppointmentError::from(e);
        tracing::error!(
            error.cause_chain = ?error,
            email.subject = %subject,
            email.body = %body,
            transport_failure,
            "Failed to send the appointment request email"
        );
        return Err(error);
    }

    Ok(HttpResponse::Ok().json(Reply::success(SUCCESS_MESSAGE)))
}
