use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use digest_notifier::Notifier;

#[derive(Clone, Default)]
pub struct MockNotifier {
    pub sent: Arc<Mutex<Vec<String>>>,
    /// zero-based index of the message that should fail
    pub fail_at: Option<usize>,
}

impl MockNotifier {
    pub fn failing_at(idx: usize) -> Self {
        Self {
            fail_at: Some(idx),
            ..Default::default()
        }
    }
}

impl Notifier for MockNotifier {
    const MAX_MESSAGE_LEN: usize = 20;

    async fn send_message(&self, text: &str) -> anyhow::Result<()> {
        let mut sent = self.sent.lock().unwrap();
        if self.fail_at == Some(sent.len()) {
            return Err(anyhow::anyhow!("Too Many Requests: retry after 5"));
        }
        sent.push(text.to_string());
        Ok(())
    }

    fn message_delay(&self) -> Duration {
        Duration::ZERO
    }
}
