use tracing::info;

use crate::{
    domain::{ChatId, MessageId, MessageRef},
    messaging::MessagingPort,
    render::RenderPort,
    tracker::ReplyTracker,
    Result,
};

/// Ties the renderer and the correlation table together: render a caption,
/// send it as a photo, and keep the inbound-to-outbound mapping current so
/// edits can delete-and-replace.
pub struct CaptionService {
    renderer: Box<dyn RenderPort>,
    tracker: ReplyTracker,
}

impl CaptionService {
    pub fn new(renderer: impl RenderPort + 'static) -> Self {
        Self {
            renderer: Box::new(renderer),
            tracker: ReplyTracker::default(),
        }
    }

    /// Render `text` and send it as a photo. Only the trackable path (the say
    /// command) records the mapping; plain-text auto-captions do not.
    pub async fn post_caption(
        &self,
        messenger: &dyn MessagingPort,
        chat_id: ChatId,
        inbound: MessageId,
        text: &str,
        track: bool,
    ) -> Result<MessageRef> {
        info!(chat_id = chat_id.0, track, "rendering caption");
        let jpeg = self.renderer.render(text)?;
        let sent = messenger.send_photo(chat_id, jpeg).await?;
        if track {
            self.tracker.record(inbound, sent).await;
        }
        Ok(sent)
    }

    /// Edit flow. There is no API to edit an already-sent photo in place, so
    /// replacement is delete-then-resend: remove the prior photo if we know
    /// about one, then post the new caption under the same inbound id. A
    /// lookup miss skips the delete and is not an error.
    pub async fn replace_caption(
        &self,
        messenger: &dyn MessagingPort,
        chat_id: ChatId,
        inbound: MessageId,
        text: &str,
    ) -> Result<MessageRef> {
        if let Some(prior) = self.tracker.take(inbound).await {
            info!(
                chat_id = chat_id.0,
                prior_id = prior.message_id.0,
                "deleting prior caption photo"
            );
            messenger.delete_message(prior).await?;
        }
        self.post_caption(messenger, chat_id, inbound, text, true)
            .await
    }
}
