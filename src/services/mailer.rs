// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Outgoing mail: login codes and interview reminders.

use crate::config::{Config, SmtpConfig};
use futures_util::future::BoxFuture;
use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::sync::Arc;

/// A plain-text message ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Delivery failures. Never fatal: callers log them and carry on.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Invalid address {address}: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("Failed to build message: {0}")]
    Build(String),

    #[error("Transport error: {0}")]
    Transport(String),
}

/// Mail delivery collaborator.
pub trait Mailer: Send + Sync {
    fn send(&self, mail: OutgoingMail) -> BoxFuture<'_, Result<(), MailError>>;
}

/// Pick the mailer for this configuration: SMTP when a relay is set,
/// otherwise log-only.
pub fn from_config(config: &Config) -> Result<Arc<dyn Mailer>, MailError> {
    let from = parse_mailbox(&config.mail_from)?;
    match &config.smtp {
        Some(smtp) => {
            tracing::info!(host = %smtp.host, port = smtp.port, "SMTP mailer configured");
            Ok(Arc::new(SmtpMailer::new(smtp, from)?))
        }
        None => {
            tracing::warn!("SMTP_HOST not set; outgoing mail will only be logged");
            Ok(Arc::new(LogMailer))
        }
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, MailError> {
    address
        .parse::<Mailbox>()
        .map_err(|e| MailError::InvalidAddress {
            address: address.to_string(),
            reason: e.to_string(),
        })
}

/// SMTP delivery through a STARTTLS relay.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(smtp: &SmtpConfig, from: Mailbox) -> Result<Self, MailError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&smtp.host)
            .map_err(|e| MailError::Transport(e.to_string()))?
            .port(smtp.port);

        if let (Some(username), Some(password)) = (&smtp.username, &smtp.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }

    fn build_message(&self, mail: &OutgoingMail) -> Result<Message, MailError> {
        let to = parse_mailbox(&mail.to)?;
        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(mail.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(mail.body.clone())
            .map_err(|e| MailError::Build(e.to_string()))
    }
}

impl Mailer for SmtpMailer {
    fn send(&self, mail: OutgoingMail) -> BoxFuture<'_, Result<(), MailError>> {
        Box::pin(async move {
            let message = self.build_message(&mail)?;
            self.transport
                .send(message)
                .await
                .map_err(|e| MailError::Transport(e.to_string()))?;
            tracing::debug!(to = %mail.to, subject = %mail.subject, "Mail sent");
            Ok(())
        })
    }
}

/// Development mailer: validates the recipient and logs instead of sending.
pub struct LogMailer;

impl Mailer for LogMailer {
    fn send(&self, mail: OutgoingMail) -> BoxFuture<'_, Result<(), MailError>> {
        Box::pin(async move {
            parse_mailbox(&mail.to)?;
            tracing::info!(
                to = %mail.to,
                subject = %mail.subject,
                "Mail delivery disabled, message logged only"
            );
            Ok(())
        })
    }
}

/// Login code message.
pub fn otp_mail(to: &str, code: &str) -> OutgoingMail {
    OutgoingMail {
        to: to.to_string(),
        subject: "OTP for CareerTracker".to_string(),
        body: format!(
            "Your otp is {}\n\nIt expires in {} minutes. Do not share this code with anyone.",
            code,
            crate::config::OTP_VALIDITY_MINUTES
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_log_mailer_rejects_invalid_recipient() {
        let mailer = LogMailer;
        let err = mailer
            .send(OutgoingMail {
                to: "not-an-address".to_string(),
                subject: "s".to_string(),
                body: "b".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, MailError::InvalidAddress { .. }));

        mailer.send(otp_mail("jane@example.com", "123456")).await.unwrap();
    }

    #[test]
    fn test_otp_mail_contains_code() {
        let mail = otp_mail("jane@example.com", "654321");
        assert_eq!(mail.to, "jane@example.com");
        assert!(mail.body.contains("654321"));
    }

    #[test]
    fn test_from_config_without_smtp_is_log_only() {
        let config = Config::test_default();
        assert!(from_config(&config).is_ok());
    }
}
