use teloxide::prelude::*;

use sgb_core::{
    domain::{ChatId, MessageId},
    Result,
};

use crate::router::AppState;

fn ids(msg: &Message) -> (ChatId, MessageId) {
    (ChatId(msg.chat.id.0), MessageId(msg.id.0))
}

/// `/signboard <text>`: render and send, and remember which photo this
/// message produced so a later edit can replace it.
pub async fn handle_say(msg: &Message, state: &AppState, text: &str) -> Result<()> {
    let (chat, inbound) = ids(msg);
    state
        .captions
        .post_caption(state.messenger.as_ref(), chat, inbound, text, true)
        .await?;
    Ok(())
}

/// Edited `/signboard`: delete the previously sent photo (if we recorded
/// one), then render and send the new text under the same inbound id.
pub async fn handle_say_edited(msg: &Message, state: &AppState, text: &str) -> Result<()> {
    let (chat, inbound) = ids(msg);
    state
        .captions
        .replace_caption(state.messenger.as_ref(), chat, inbound, text)
        .await?;
    Ok(())
}

/// Any other text: acknowledge it, then caption the full message. This path
/// is not recorded in the correlation table.
pub async fn handle_plain_text(msg: &Message, state: &AppState, text: &str) -> Result<()> {
    let (chat, inbound) = ids(msg);
    state
        .messenger
        .send_text(chat, &format!("You said: {text}"))
        .await?;
    state
        .captions
        .post_caption(state.messenger.as_ref(), chat, inbound, text, false)
        .await?;
    Ok(())
}
