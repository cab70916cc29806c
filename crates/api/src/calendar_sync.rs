//! Calendar collaborators receiving an event for each committed booking.

use async_trait::async_trait;
use eyre::{Result, WrapErr};
use slotbook_core::{models::calendar_event::CalendarEvent, store::CalendarSink};
use tracing::info;

/// Posts each event as JSON to a configured endpoint.
#[derive(Debug, Clone)]
pub struct WebhookCalendarSink {
    client: reqwest::Client,
    url: String,
}

impl WebhookCalendarSink {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl CalendarSink for WebhookCalendarSink {
    async fn publish(&self, event: &CalendarEvent) -> Result<()> {
        self.client
            .post(&self.url)
            .json(event)
            .send()
            .await
            .wrap_err("Failed to reach calendar webhook")?
            .error_for_status()
            .wrap_err("Calendar webhook rejected event")?;

        tracing::debug!("Calendar event delivered: {}", event.title);
        Ok(())
    }
}

/// Used when no webhook is configured.
#[derive(Debug, Clone, Default)]
pub struct LogCalendarSink;

#[async_trait]
impl CalendarSink for LogCalendarSink {
    async fn publish(&self, event: &CalendarEvent) -> Result<()> {
        info!(
            title = %event.title,
            start = %event.start,
            end = %event.end,
            "calendar event"
        );
        Ok(())
    }
}

/// Picks the sink for the configured webhook, if any.
pub fn calendar_sink(webhook_url: Option<&str>) -> std::sync::Arc<dyn CalendarSink> {
    match webhook_url {
        Some(url) => std::sync::Arc::new(WebhookCalendarSink::new(url)),
        None => std::sync::Arc::new(LogCalendarSink),
    }
}
