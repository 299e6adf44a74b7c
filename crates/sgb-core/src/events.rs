/// Inbound event classification.
///
/// Updates arrive as raw text; the router turns them into this closed set of
/// variants and dispatches with a plain `match`.

/// The captioned-say command token.
pub const SAY_COMMAND: &str = "/signboard";

/// Length of the command token plus its trailing delimiter. The say payload
/// is the raw message text with this fixed prefix stripped, matching the
/// observed behavior of the bot (including the `/signboard@bot` quirk, where
/// the slice lands inside the `@bot` suffix).
pub const SAY_PREFIX_LEN: usize = SAY_COMMAND.len() + 1;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InboundEvent {
    Greeting,
    Start,
    Say { text: String },
    SayEdited { text: String },
    PlainText { text: String },
}

impl InboundEvent {
    /// Classify raw message text. `edited` marks updates delivered as edits
    /// of an earlier message; only the say command has an edited flow.
    pub fn classify(text: &str, edited: bool) -> Self {
        match command_name(text).as_deref() {
            Some("hi") => InboundEvent::Greeting,
            Some("start") => InboundEvent::Start,
            Some("signboard") => {
                let payload = text.get(SAY_PREFIX_LEN..).unwrap_or("").to_string();
                if edited {
                    InboundEvent::SayEdited { text: payload }
                } else {
                    InboundEvent::Say { text: payload }
                }
            }
            _ => InboundEvent::PlainText {
                text: text.to_string(),
            },
        }
    }
}

/// Extract the command name from `/cmd@botname arg1 ...`, lowercased.
/// Returns `None` for non-command text.
fn command_name(text: &str) -> Option<String> {
    let first = text.trim().split_whitespace().next()?;
    let rest = first.strip_prefix('/')?;
    let cmd = rest.split('@').next().unwrap_or("").to_lowercase();
    if cmd.is_empty() {
        None
    } else {
        Some(cmd)
    }
}
