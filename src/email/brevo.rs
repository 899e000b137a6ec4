//! src/email/brevo.rs
use lettre::message::Mailbox;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Serialize)]
pub struct Contact<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    email: String,
}

impl<'a> From<&'a Mailbox> for Contact<'a> {
    fn from(mailbox: &'a Mailbox) -> Self {
        Self {
            name: mailbox.name.as_deref(),
            email: mailbox.email.to_string(),
        }
    }
}

/// Request body of the transactional email endpoint.
#[derive(Debug, Serialize)]
pub struct Email<'a> {
    sender: Contact<'a>,
    pub to: Vec<Contact<'a>>,
    pub subject: &'a str,
    #[serde(rename = "textContent")]
    pub text_content: &'a str,
}

pub struct EmailBuilder<'a> {
    sender: &'a Mailbox,
    to: Vec<&'a Mailbox>,
    subject: &'a str,
    text_content: &'a str,
}

impl<'a> EmailBuilder<'a> {
    pub fn new(sender: &'a Mailbox) -> Self {
        Self {
            sender,
            to: vec![],
            subject: "",
            text_content: "",
        }
    }

    pub fn to(mut self, mailbox: &'a Mailbox) -> Self {
        self.to.push(mailbox);
        self
    }

    pub fn subject(mut self, subject: &'a str) -> Self {
        self.subject = subject;
        self
    }

    pub fn text_content(mut self, text_content: &'a str) -> Self {
        self.text_content = text_content;
        self
    }

    pub fn build(self) -> Email<'a> {
        Email {
            sender: self.sender.into(),
            to: self.to.into_iter().map(Contact::from).collect(),
            subject: self.subject,
            text_content: self.text_content,
        }
    }
}

#[derive(Debug)]
pub struct BrevoClient {
    http_client: Client,
    url: String,
    api_key: Option<Secret<String>>,
}

impl BrevoClient {
    pub fn new(
        url: String,
        api_key: Option<Secret<String>>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            url,
            api_key,
        })
    }

    /// Any non-2xx answer is an error.
    pub async fn send_email(&self, email: &Email<'_>) -> Result<reqwest::Response, reqwest::Error> {
        let mut request = self
            .http_client
            .post(&self.url)
            .header("accept", "application/json")
            .json(email);

        if let Some(api_key) = &self.api_key {
            request = request.header("api-key", api_key.expose_secret());
        }

        let res = request.send().await?.error_for_status()?;

        Ok(res)
    }
}
