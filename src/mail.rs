//! Outgoing email. The share handler talks to an [`EmailBackend`]; the real
//! transport is an HTTP mail API, with console and in-memory backends for
//! development and tests.

use serde::Serialize;
use std::env;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub text_body: String,
}

#[derive(thiserror::Error, Debug)]
pub enum DeliveryError {
    #[error("Failed to reach the mail server")]
    Transport(#[from] reqwest::Error),
}

/// REST client for a transactional-mail HTTP API.
pub struct EmailClient {
    http: reqwest::Client,
    base_url: String,
    sender: String,
    authorization_token: String,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text_body: &'a str,
}

impl EmailClient {
    pub fn new(
        base_url: String,
        sender: String,
        authorization_token: String,
        timeout: Duration,
    ) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build the mail HTTP client.");
        Self {
            http,
            base_url,
            sender,
            authorization_token,
        }
    }

    pub fn from_env() -> Self {
        let base_url = env::var("EMAIL_BASE_URL").expect("EMAIL_BASE_URL must be set");
        let sender = env::var("EMAIL_SENDER").expect("EMAIL_SENDER must be set");
        let authorization_token =
            env::var("EMAIL_AUTHORIZATION_TOKEN").expect("EMAIL_AUTHORIZATION_TOKEN must be set");
        let timeout_millis = env::var("EMAIL_TIMEOUT_MILLIS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10_000);
        Self::new(
            base_url,
            sender,
            authorization_token,
            Duration::from_millis(timeout_millis),
        )
    }

    pub async fn send(&self, email: &OutgoingEmail) -> Result<(), reqwest::Error> {
        let url = format!("{}/email", self.base_url);
        let request = SendEmailRequest {
            from: &self.sender,
            to: &email.to,
            subject: &email.subject,
            text_body: &email.text_body,
        };
        self.http
            .post(&url)
            .header("X-Server-Token", self.authorization_token.as_str())
            .json(&request)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

pub enum EmailBackend {
    Api(EmailClient),
    Console,
    Memory(Mutex<Vec<OutgoingEmail>>),
}

impl EmailBackend {
    pub fn memory() -> Self {
        EmailBackend::Memory(Mutex::new(Vec::new()))
    }

    pub async fn send(&self, email: OutgoingEmail) -> Result<(), DeliveryError> {
        match self {
            EmailBackend::Api(client) => client.send(&email).await.map_err(DeliveryError::from),
            EmailBackend::Console => {
                log::info!(
                    "Email to {}\nSubject: {}\n{}",
                    email.to,
                    email.subject,
                    email.text_body
                );
                Ok(())
            }
            EmailBackend::Memory(outbox) => {
                outbox.lock().unwrap().push(email);
                Ok(())
            }
        }
    }

    /// Messages collected by the memory backend; empty for the others.
    pub fn outbox(&self) -> Vec<OutgoingEmail> {
        match self {
            EmailBackend::Memory(outbox) => outbox.lock().unwrap().clone(),
            _ => Vec::new(),
        }
    }
}

pub fn backend_from_env() -> EmailBackend {
    match env::var("EMAIL_BACKEND").as_deref() {
        Ok("api") => EmailBackend::Api(EmailClient::from_env()),
        Ok("memory") => EmailBackend::memory(),
        _ => EmailBackend::Console,
    }
}
