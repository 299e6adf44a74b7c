use std::sync::Arc;

use teloxide::{dispatching::Dispatcher, dptree, prelude::*};
use tracing::info;

use sgb_core::{
    caption::CaptionService, config::Config, messaging::MessagingPort, render::Renderer,
};

use crate::handlers;
use crate::TelegramMessenger;

/// Application context passed to every handler. Built once at startup; there
/// is no global bot or dispatcher state.
pub struct AppState {
    pub cfg: Arc<Config>,
    pub captions: CaptionService,
    pub messenger: Arc<dyn MessagingPort>,
}

pub async fn run_polling(cfg: Arc<Config>) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.bot_token.clone());

    if let Ok(me) = bot.get_me().await {
        info!(username = me.username(), "signboard bot started");
    }
    info!(
        picture = %cfg.picture.display(),
        font = %cfg.font.display(),
        box_w = cfg.text_box.width(),
        box_h = cfg.text_box.height(),
        "caption configuration loaded"
    );

    let messenger: Arc<dyn MessagingPort> = Arc::new(TelegramMessenger::new(bot.clone()));
    let state = Arc::new(AppState {
        captions: CaptionService::new(Renderer::new(&cfg)),
        cfg,
        messenger,
    });

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(handlers::handle_message))
        .branch(Update::filter_edited_message().endpoint(handlers::handle_edited_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .build()
        .dispatch()
        .await;

    Ok(())
}
