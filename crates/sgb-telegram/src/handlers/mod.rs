//! Telegram update handlers.
//!
//! Each update is classified into an `InboundEvent` and dispatched with a
//! plain `match`. Failures inside a handler are logged and fail only that
//! invocation; the dispatcher keeps running.

use std::sync::Arc;

use teloxide::prelude::*;
use tracing::error;

use sgb_core::events::InboundEvent;

use crate::router::AppState;

mod commands;
mod say;

pub async fn handle_message(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(text) = msg.text().map(|s| s.to_string()) else {
        return Ok(());
    };

    let result = match InboundEvent::classify(&text, false) {
        InboundEvent::Greeting => commands::greet(&msg, &state).await,
        InboundEvent::Start => commands::start(&msg, &state).await,
        InboundEvent::Say { text } => say::handle_say(&msg, &state, &text).await,
        InboundEvent::PlainText { text } => say::handle_plain_text(&msg, &state, &text).await,
        // classify with edited = false never yields this variant
        InboundEvent::SayEdited { .. } => Ok(()),
    };

    if let Err(e) = result {
        error!(err = %e, chat_id = msg.chat.id.0, "message handler failed");
    }
    Ok(())
}

pub async fn handle_edited_message(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(text) = msg.text().map(|s| s.to_string()) else {
        return Ok(());
    };

    // Only the say command has an edited flow; other edits are ignored.
    if let InboundEvent::SayEdited { text } = InboundEvent::classify(&text, true) {
        if let Err(e) = say::handle_say_edited(&msg, &state, &text).await {
            error!(err = %e, chat_id = msg.chat.id.0, "edited-message handler failed");
        }
    }
    Ok(())
}
