// src/notify/email.rs
use anyhow::{Context, Result};
use lettre::message::{header, Mailbox, Message};
use lettre::transport::smtp::{authentication::Credentials, AsyncSmtpTransport};
use lettre::{AsyncTransport, Tokio1Executor};

use super::Notifier;
use crate::config::EmailConfig;
use crate::listing::AnnotatedListing;

pub struct EmailSender {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    recipients: Vec<Mailbox>,
    subject: String,
}

impl EmailSender {
    /// SMTP transport credentials come from the environment; recipients and
    /// subject line come from the watch configuration.
    pub fn from_env(cfg: &EmailConfig) -> Result<Self> {
        let host = env_var("SMTP_HOST")?;
        let user = env_var("SMTP_USER")?;
        let pass = env_var("SMTP_PASS")?;
        let from_addr = env_var("GIGWATCH_EMAIL_FROM")?;

        let creds = Credentials::new(user, pass);
        let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay(&host)
            .context("invalid SMTP_HOST")?
            .credentials(creds)
            .build();

        let from = from_addr
            .parse()
            .context("invalid GIGWATCH_EMAIL_FROM address")?;
        let recipients = parse_recipients(&cfg.recipients)?;

        Ok(Self {
            mailer,
            from,
            recipients,
            subject: cfg.subject.clone(),
        })
    }
}

#[async_trait::async_trait]
impl Notifier for EmailSender {
    async fn notify(&self, matched: &[AnnotatedListing]) -> Result<()> {
        let body = render_html_body(matched);
        let mut builder = Message::builder()
            .from(self.from.clone())
            .subject(self.subject.clone())
            .header(header::ContentType::TEXT_HTML);
        for to in &self.recipients {
            builder = builder.to(to.clone());
        }
        let msg = builder.body(body).context("building email")?;
        self.mailer.send(msg).await.context("sending email")?;
        tracing::info!(to = self.recipients.len(), posts = matched.len(), "sent email");
        Ok(())
    }
}

/// Parse a comma-separated recipient list; blank entries (trailing commas)
/// are skipped.
fn parse_recipients(raw: &str) -> Result<Vec<Mailbox>> {
    let mut out = Vec::new();
    for part in raw.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let mb = part
            .parse()
            .with_context(|| format!("invalid recipient address {part:?}"))?;
        out.push(mb);
    }
    anyhow::ensure!(!out.is_empty(), "recipient list is empty");
    Ok(out)
}

/// Render the notification body: one block per matched listing with the
/// title linked, the listed date, and the description. Listing text is
/// escaped; craigslist descriptions routinely carry markup of their own.
pub fn render_html_body(matched: &[AnnotatedListing]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "<h3>{} matching posting{}</h3>\n",
        matched.len(),
        if matched.len() == 1 { "" } else { "s" }
    ));
    for post in matched {
        let title = html_escape::encode_text(post.listing.title_str());
        let desc = html_escape::encode_text(post.listing.description_str());
        let listed = post
            .listing
            .listed_date
            .map(|d| d.to_rfc3339())
            .unwrap_or_default();
        out.push_str("<p>");
        match &post.listing.link {
            Some(link) => {
                let href = html_escape::encode_double_quoted_attribute(link);
                out.push_str(&format!("<a href=\"{href}\"><b>{title}</b></a>"));
            }
            None => out.push_str(&format!("<b>{title}</b>")),
        }
        out.push_str(&format!("<br/>{listed}<br/>{desc}</p>\n"));
    }
    out
}

fn env_var(name: &str) -> Result<String> {
    std::env::var(name).with_context(|| format!("{name} missing from environment"))
}
