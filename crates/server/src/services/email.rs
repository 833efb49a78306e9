//! Email service for expiration reminder notifications.
//!
//! Uses SMTP via lettre for delivery with Askama HTML templates. Payload
//! composition is separate from sending so the notification content can be
//! tested without a transport.

use askama::Template;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{MultiPart, SinglePart, header::ContentType},
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use secrecy::ExposeSecret;
use thiserror::Error;

use shelfsense_core::{SweepEntry, SweepReport, UserId};

use crate::config::EmailConfig;

/// HTML template for the expiration reminder email.
#[derive(Template)]
#[template(path = "email/expiration_reminder.html")]
struct ReminderEmailHtml<'a> {
    user_id: &'a str,
    expiring_soon: &'a [String],
    expired: &'a [String],
}

/// Plain text template for the expiration reminder email.
#[derive(Template)]
#[template(path = "email/expiration_reminder.txt")]
struct ReminderEmailText<'a> {
    user_id: &'a str,
    expiring_soon: &'a [String],
    expired: &'a [String],
}

/// Errors that can occur when composing or sending email.
#[derive(Debug, Error)]
pub enum EmailError {
    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build email message.
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// Template rendering error.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

/// A composed reminder notification, ready for the transport.
#[derive(Debug, Clone)]
pub struct ReminderPayload {
    /// The user's registered contact address.
    pub recipient_address: String,
    /// Subject line summarizing both buckets.
    pub subject_line: String,
    /// Plain text body.
    pub body_text: String,
    /// HTML alternative body.
    pub body_html: String,
}

/// Email service for expiration reminders.
#[derive(Clone)]
pub struct ReminderMailer {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl ReminderMailer {
    /// Create a new reminder mailer from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the SMTP relay cannot be configured.
    pub fn new(config: &EmailConfig) -> Result<Self, SmtpError> {
        let credentials = Credentials::new(
            config.smtp_username.clone(),
            config.smtp_password.expose_secret().to_string(),
        );

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(credentials)
            .build();

        Ok(Self {
            mailer,
            from_address: config.from_address.clone(),
        })
    }

    /// Compose the reminder payload for a sweep report.
    ///
    /// # Errors
    ///
    /// Returns error if a template fails to render.
    pub fn compose(
        recipient_address: &str,
        user: &UserId,
        report: &SweepReport,
    ) -> Result<ReminderPayload, EmailError> {
        let expiring_soon: Vec<String> = report.expiring_soon.iter().map(describe_expiring).collect();
        let expired: Vec<String> = report.expired.iter().map(describe_expired).collect();

        let body_html = ReminderEmailHtml {
            user_id: user.as_str(),
            expiring_soon: &expiring_soon,
            expired: &expired,
        }
        .render()?;
        let body_text = ReminderEmailText {
            user_id: user.as_str(),
            expiring_soon: &expiring_soon,
            expired: &expired,
        }
        .render()?;

        Ok(ReminderPayload {
            recipient_address: recipient_address.to_owned(),
            subject_line: subject_line(report),
            body_text,
            body_html,
        })
    }

    /// Send a composed reminder.
    ///
    /// # Errors
    ///
    /// Returns error if the message cannot be built or the transport fails.
    pub async fn send(&self, payload: &ReminderPayload) -> Result<(), EmailError> {
        let email = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|_| EmailError::InvalidAddress(self.from_address.clone()))?,
            )
            .to(payload
                .recipient_address
                .parse()
                .map_err(|_| EmailError::InvalidAddress(payload.recipient_address.clone()))?)
            .subject(&payload.subject_line)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(payload.body_text.clone()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(payload.body_html.clone()),
                    ),
            )?;

        self.mailer.send(email).await?;

        tracing::info!(
            to = %payload.recipient_address,
            subject = %payload.subject_line,
            "Reminder email sent"
        );
        Ok(())
    }
}

/// Build the subject line from the report's bucket sizes.
fn subject_line(report: &SweepReport) -> String {
    let soon = report.expiring_soon.len();
    let expired = report.expired.len();

    match (soon, expired) {
        (s, 0) => format!("ShelfSense: {s} {} expiring soon", item_word(s)),
        (0, e) => format!("ShelfSense: {e} {} expired", item_word(e)),
        (s, e) => format!("ShelfSense: {s} expiring soon, {e} expired"),
    }
}

fn item_word(n: usize) -> &'static str {
    if n == 1 { "item" } else { "items" }
}

fn day_word(n: u64) -> &'static str {
    if n == 1 { "day" } else { "days" }
}

/// One reminder line for an expiring-soon item.
fn describe_expiring(entry: &SweepEntry) -> String {
    match entry.days_offset {
        0 => format!("{} - expires today ({})", entry.food_item, entry.expiration_date),
        n => {
            let n = n.unsigned_abs();
            format!(
                "{} - expires {} (in {n} {})",
                entry.food_item,
                entry.expiration_date,
                day_word(n)
            )
        }
    }
}

/// One reminder line for an expired item.
fn describe_expired(entry: &SweepEntry) -> String {
    let days = entry.days_offset.unsigned_abs();
    format!(
        "{} - expired {} ({days} {} ago)",
        entry.food_item,
        entry.expiration_date,
        day_word(days)
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shelfsense_core::{PantryItem, RawItemInput, sweep_report};

    fn item(name: &str, date: &str) -> PantryItem {
        PantryItem::normalize(&RawItemInput {
            food_item: name.to_owned(),
            quantity: "1".into(),
            unit: String::new(),
            expiration_date: date.to_owned(),
        })
        .unwrap()
    }

    fn report() -> SweepReport {
        let pantry = vec![
            item("yogurt", "01/08/2024"),
            item("milk", "01/12/2024"),
            item("bread", "01/11/2024"),
        ];
        sweep_report(&pantry, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()).unwrap()
    }

    #[test]
    fn test_subject_line_counts() {
        assert_eq!(subject_line(&report()), "ShelfSense: 2 expiring soon, 1 expired");
    }

    #[test]
    fn test_subject_line_single_bucket() {
        let pantry = vec![item("milk", "01/12/2024")];
        let report = sweep_report(&pantry, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()).unwrap();
        assert_eq!(subject_line(&report), "ShelfSense: 1 item expiring soon");

        let pantry = vec![item("milk", "01/01/2024"), item("eggs", "01/02/2024")];
        let report = sweep_report(&pantry, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()).unwrap();
        assert_eq!(subject_line(&report), "ShelfSense: 2 items expired");
    }

    #[test]
    fn test_compose_lists_both_buckets() {
        let payload =
            ReminderMailer::compose("ankit@example.com", &UserId::new("ankit.roy"), &report())
                .unwrap();

        assert_eq!(payload.recipient_address, "ankit@example.com");
        assert!(payload.body_text.contains("milk - expires 01/12/2024 (in 2 days)"));
        assert!(payload.body_text.contains("bread - expires 01/11/2024 (in 1 day)"));
        assert!(payload.body_text.contains("yogurt - expired 01/08/2024 (2 days ago)"));
        assert!(payload.body_html.contains("milk"));
        assert!(payload.body_html.contains("yogurt"));
    }

    #[test]
    fn test_describe_day_boundaries() {
        let pantry = vec![item("milk", "01/10/2024"), item("eggs", "01/09/2024")];
        let report = sweep_report(&pantry, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()).unwrap();

        let soon = report.expiring_soon.first().unwrap();
        assert_eq!(describe_expiring(soon), "milk - expires today (01/10/2024)");

        let expired = report.expired.first().unwrap();
        assert_eq!(describe_expired(expired), "eggs - expired 01/09/2024 (1 day ago)");
    }
}
