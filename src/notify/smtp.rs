//! SMTP notification delivery
//!
//! Composes the fixed-subject, empty-body notification mail and submits it
//! over an authenticated STARTTLS session. Everything that can go wrong here
//! (malformed mailbox, failed upgrade, rejected credentials, refused
//! delivery) surfaces as `SeatWatchError::Delivery`; the watcher logs it and
//! terminates either way.

use lettre::message::{Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::{debug, info};

use crate::config::EmailConfig;
use crate::error::{Result, SeatWatchError};
use crate::notify::Notifier;

/// Notifier delivering mail over authenticated STARTTLS submission
pub struct SmtpNotifier {
    email: EmailConfig,
}

impl SmtpNotifier {
    /// Create a notifier for the configured mail settings
    pub fn new(email: EmailConfig) -> Self {
        Self { email }
    }

    /// Compose the notification message
    ///
    /// A multipart container with a single empty plain-text part; the
    /// subject line carries the whole payload.
    fn build_message(&self) -> Result<Message> {
        let from: Mailbox = self
            .email
            .sender
            .parse()
            .map_err(|e| SeatWatchError::Delivery(Box::new(e)))?;
        let to: Mailbox = self
            .email
            .recipient
            .parse()
            .map_err(|e| SeatWatchError::Delivery(Box::new(e)))?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(self.email.subject.clone())
            .multipart(MultiPart::mixed().singlepart(SinglePart::plain(String::new())))
            .map_err(|e| SeatWatchError::Delivery(Box::new(e)))
    }

    fn build_transport(&self) -> Result<SmtpTransport> {
        let password = self.email.password.clone().unwrap_or_default();
        let credentials = Credentials::new(self.email.sender.clone(), password);

        let transport = SmtpTransport::starttls_relay(&self.email.smtp_host)
            .map_err(|e| SeatWatchError::Delivery(Box::new(e)))?
            .port(self.email.smtp_port)
            .credentials(credentials)
            .build();

        Ok(transport)
    }
}

impl Notifier for SmtpNotifier {
    fn notify(&self) -> Result<()> {
        debug!(
            "Submitting notification via {}:{}",
            self.email.smtp_host, self.email.smtp_port
        );

        let message = self.build_message()?;
        let transport = self.build_transport()?;

        transport
            .send(&message)
            .map_err(|e| SeatWatchError::Delivery(Box::new(e)))?;

        info!("Notification email sent to {}", self.email.recipient);
        Ok(())
    }
}
