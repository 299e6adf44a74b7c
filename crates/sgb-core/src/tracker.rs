use std::collections::HashMap;

use tokio::sync::Mutex;

use crate::domain::{MessageId, MessageRef};

/// Correlation table from an inbound message id to the outbound photo it
/// produced, used to delete-and-replace the photo when the trigger is edited.
///
/// Entries are recorded for the say command only and removed when consumed by
/// an edit; the table is otherwise never pruned and grows for the life of the
/// process (see DESIGN.md).
#[derive(Default)]
pub struct ReplyTracker {
    inner: Mutex<HashMap<MessageId, MessageRef>>,
}

impl ReplyTracker {
    pub async fn record(&self, inbound: MessageId, outbound: MessageRef) {
        self.inner.lock().await.insert(inbound, outbound);
    }

    /// Remove and return the outbound photo ref for `inbound`, if any.
    pub async fn take(&self, inbound: MessageId) -> Option<MessageRef> {
        self.inner.lock().await.remove(&inbound)
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }
}
