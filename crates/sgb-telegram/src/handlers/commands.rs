use teloxide::prelude::*;

use sgb_core::{domain::ChatId, Result};

use crate::router::AppState;

/// Usage text for `/start`. Fixed for every sender.
const START_TEXT: &str = "Hello, send some text and it will show up on the signboard";

fn greeting_text(name: &str) -> String {
    format!("Hello @{name}, how are you doing today?")
}

fn display_name(msg: &Message) -> String {
    msg.from()
        .map(|u| u.username.clone().unwrap_or_else(|| u.first_name.clone()))
        .unwrap_or_else(|| "there".to_string())
}

pub async fn greet(msg: &Message, state: &AppState) -> Result<()> {
    let name = display_name(msg);
    state
        .messenger
        .send_text(ChatId(msg.chat.id.0), &greeting_text(&name))
        .await?;
    Ok(())
}

pub async fn start(msg: &Message, state: &AppState) -> Result<()> {
    state
        .messenger
        .send_text(ChatId(msg.chat.id.0), START_TEXT)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greeting_mentions_the_sender() {
        assert_eq!(
            greeting_text("kasper"),
            "Hello @kasper, how are you doing today?"
        );
    }

    #[test]
    fn start_text_is_static() {
        // No interpolation slots: the usage message is the same for everyone.
        assert!(!START_TEXT.contains('{'));
        assert!(!START_TEXT.contains('@'));
    }
}
