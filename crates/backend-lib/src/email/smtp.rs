// ============================
// crates/backend-lib/src/email/smtp.rs
// ============================
//! SMTP implementation of the email dispatch trait.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{Datelike, Utc};
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use metrics::counter;
use tracing::warn;

use crate::config::{AppSettings, SmtpSettings};
use crate::metrics::{EMAIL_DISPATCHED, EMAIL_DISPATCH_FAILED};

use super::templates::{render, TemplateCatalog};
use super::{DispatchStatus, EmailDispatch};

/// Sends templated mail over SMTP.
///
/// Every failure mode (unknown template, bad recipient, transport error)
/// degrades to [`DispatchStatus::Failed`]; callers decide how to react.
pub struct SmtpDispatcher {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    catalog: TemplateCatalog,
    app_name: String,
    app_url: String,
}

impl SmtpDispatcher {
    /// Build a dispatcher with the stock template catalog
    pub fn new(smtp: &SmtpSettings, app: &AppSettings) -> anyhow::Result<Self> {
        Self::with_catalog(smtp, app, TemplateCatalog::with_defaults())
    }

    /// Build a dispatcher around a caller-supplied catalog
    pub fn with_catalog(
        smtp: &SmtpSettings,
        app: &AppSettings,
        catalog: TemplateCatalog,
    ) -> anyhow::Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&smtp.host)?
            .port(smtp.port)
            .credentials(Credentials::new(
                smtp.username.clone(),
                smtp.password.clone(),
            ))
            .build();

        let from: Mailbox = smtp
            .from_address
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid from address {:?}: {e}", smtp.from_address))?;

        Ok(Self {
            transport,
            from,
            catalog,
            app_name: app.name.clone(),
            app_url: app.url.clone(),
        })
    }
}

#[async_trait]
impl EmailDispatch for SmtpDispatcher {
    async fn send(&self, template_key: &str, mut data: HashMap<String, String>) -> DispatchStatus {
        data.insert("app_name".to_string(), self.app_name.clone());
        data.insert("app_url".to_string(), self.app_url.clone());
        data.insert(
            "copyright_year".to_string(),
            Utc::now().year().to_string(),
        );

        let Some(recipient) = data.get("email").cloned() else {
            warn!(template = template_key, "email dispatch without a recipient");
            counter!(EMAIL_DISPATCH_FAILED).increment(1);
            return DispatchStatus::Failed;
        };

        let Some(template) = self.catalog.get(template_key) else {
            warn!(template = template_key, "unknown email template");
            counter!(EMAIL_DISPATCH_FAILED).increment(1);
            return DispatchStatus::Failed;
        };

        let to: Mailbox = match recipient.parse() {
            Ok(mailbox) => mailbox,
            Err(e) => {
                warn!(template = template_key, error = %e, "unparseable recipient");
                counter!(EMAIL_DISPATCH_FAILED).increment(1);
                return DispatchStatus::Failed;
            },
        };

        let subject = render(&template.subject, &data);
        let body = render(&template.content, &data);

        let message = match Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)
        {
            Ok(message) => message,
            Err(e) => {
                warn!(template = template_key, error = %e, "could not build message");
                counter!(EMAIL_DISPATCH_FAILED).increment(1);
                return DispatchStatus::Failed;
            },
        };

        match self.transport.send(message).await {
            Ok(_) => {
                counter!(EMAIL_DISPATCHED).increment(1);
                DispatchStatus::Sent
            },
            Err(e) => {
                warn!(template = template_key, error = %e, "email dispatch failed");
                counter!(EMAIL_DISPATCH_FAILED).increment(1);
                DispatchStatus::Failed
            },
        }
    }
}
