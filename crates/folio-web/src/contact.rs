//! Contact form: field checks, a fixed arithmetic captcha, and optional
//! forwarding to a hosted form endpoint.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use thiserror::Error;
use tracing::{info, warn};

use folio_common::config::ContactConfig;
use folio_common::sandbox::SandboxClient;

pub const SUCCESS_MESSAGE: &str = "Form submitted successfully! Thank you for your message.";
pub const FAILURE_MESSAGE: &str = "There was an error submitting the form. Please try again.";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub captcha: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContactRejection {
    #[error("The contact form is disabled")]
    Disabled,
    #[error("Missing field: {0}")]
    Missing(&'static str),
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Wrong captcha answer")]
    Captcha,
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
    })
}

impl ContactForm {
    pub fn validate(&self, config: &ContactConfig) -> Result<(), ContactRejection> {
        if !config.enabled {
            return Err(ContactRejection::Disabled);
        }
        let required = [("name", &self.name), ("email", &self.email), ("message", &self.message)];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ContactRejection::Missing(field));
            }
        }
        if !email_pattern().is_match(self.email.trim()) {
            return Err(ContactRejection::InvalidEmail);
        }
        if self.captcha.trim() != config.captcha_answer.trim() {
            return Err(ContactRejection::Captcha);
        }
        Ok(())
    }
}

/// Result shown to the visitor as a toast.
#[derive(Debug, Clone, Serialize)]
pub struct ContactOutcome {
    pub ok: bool,
    pub message: String,
}

/// Validate and, when configured, forward the submission.
pub async fn submit(
    form: &ContactForm,
    config: &ContactConfig,
    client: &SandboxClient,
) -> ContactOutcome {
    if let Err(rejection) = form.validate(config) {
        info!(reason = %rejection, "Contact form rejected");
        return ContactOutcome { ok: false, message: rejection.to_string() };
    }

    if let Some(action) = config.form_action.as_deref() {
        let fields = [
            ("name", form.name.trim()),
            ("email", form.email.trim()),
            ("message", form.message.trim()),
        ];
        let forwarded = match client.post(action) {
            Ok(request) => request.form(&fields).send().await.map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };
        match forwarded {
            Ok(response) if response.status().is_success() => {}
            Ok(response) => {
                warn!(status = %response.status(), "Contact form endpoint refused submission");
                return ContactOutcome { ok: false, message: FAILURE_MESSAGE.to_string() };
            }
            Err(e) => {
                warn!(error = %e, "Contact form forwarding failed");
                return ContactOutcome { ok: false, message: FAILURE_MESSAGE.to_string() };
            }
        }
    }

    info!(from = %form.email.trim(), "Contact form accepted");
    ContactOutcome { ok: true, message: SUCCESS_MESSAGE.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ContactForm {
        ContactForm {
            name: "Grace".into(),
            email: "grace@example.com".into(),
            message: "Hello!".into(),
            captcha: " 5 ".into(),
        }
    }

    #[test]
    fn test_valid_form() {
        assert_eq!(form().validate(&ContactConfig::default()), Ok(()));
    }

    #[test]
    fn test_rejections() {
        let config = ContactConfig::default();

        let mut f = form();
        f.message = "   ".into();
        assert_eq!(f.validate(&config), Err(ContactRejection::Missing("message")));

        let mut f = form();
        f.email = "grace.example.com".into();
        assert_eq!(f.validate(&config), Err(ContactRejection::InvalidEmail));

        let mut f = form();
        f.captcha = "4".into();
        assert_eq!(f.validate(&config), Err(ContactRejection::Captcha));

        let disabled = ContactConfig { enabled: false, ..ContactConfig::default() };
        assert_eq!(form().validate(&disabled), Err(ContactRejection::Disabled));
    }

    #[tokio::test]
    async fn test_submit_without_forwarding() {
        let client = SandboxClient::new().unwrap();
        let outcome = submit(&form(), &ContactConfig::default(), &client).await;
        assert!(outcome.ok);
        assert_eq!(outcome.message, SUCCESS_MESSAGE);

        let mut bad = form();
        bad.captcha = "7".into();
        let outcome = submit(&bad, &ContactConfig::default(), &client).await;
        assert!(!outcome.ok);
        assert_eq!(outcome.message, "Wrong captcha answer");
    }

    #[tokio::test]
    async fn test_forwarding_to_disallowed_host_fails() {
        let client = SandboxClient::new().unwrap();
        let config = ContactConfig {
            form_action: Some("https://forms.example.net/submit".into()),
            ..ContactConfig::default()
        };
        let outcome = submit(&form(), &config, &client).await;
        assert!(!outcome.ok);
        assert_eq!(outcome.message, FAILURE_MESSAGE);
    }
}
