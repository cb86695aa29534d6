use std::{future::Future, time::Duration};

use crate::markdown::{escape_markdown, split_escaped_message};

pub mod telegram;

pub trait Notifier {
    /// Maximum number of characters per outbound message, after escaping
    const MAX_MESSAGE_LEN: usize = crate::MAX_MESSAGE_LEN;

    /// Sends one already-escaped message
    fn send_message(&self, text: &str) -> impl Future<Output = anyhow::Result<()>>;

    /// Pause between consecutive messages
    fn message_delay(&self) -> Duration {
        Duration::from_millis(500)
    }
}

impl<T: Notifier> Notifier for &T {
    const MAX_MESSAGE_LEN: usize = T::MAX_MESSAGE_LEN;

    async fn send_message(&self, text: &str) -> anyhow::Result<()> {
        (**self).send_message(text).await
    }

    fn message_delay(&self) -> Duration {
        (**self).message_delay()
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    pub messages_sent: usize,
}

/// Splits `text` into message-sized slices and sends each one, escaped, in order.
///
/// Stops at the first slice that fails to send.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub async fn deliver<N: Notifier>(notifier: &N, text: &str) -> anyhow::Result<DeliveryReport> {
    let slices = split_escaped_message(text, N::MAX_MESSAGE_LEN);
    let total = slices.len();
    let mut report = DeliveryReport::default();

    for (idx, slice) in slices.iter().enumerate() {
        if idx > 0 {
            tokio::time::sleep(notifier.message_delay()).await;
        }

        notifier
            .send_message(&escape_markdown(slice))
            .await
            .inspect_err(|e| {
                tracing::error!(error = ?e, part = idx + 1, total, "Failed to send message")
            })?;

        report.messages_sent += 1;
    }

    tracing::info!(messages = report.messages_sent, "Delivered message");

    Ok(report)
}
