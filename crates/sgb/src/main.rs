use std::sync::Arc;

use sgb_core::config::Config;

const CONFIG_FILE: &str = "config.json";

#[tokio::main]
async fn main() -> Result<(), sgb_core::Error> {
    sgb_core::logging::init("sgb");

    let token = std::env::args()
        .nth(1)
        .ok_or_else(|| sgb_core::Error::Config("usage: sgb <bot-token>".to_string()))?;

    let cfg = Arc::new(Config::load(token, CONFIG_FILE)?);

    sgb_telegram::router::run_polling(cfg)
        .await
        .map_err(|e| sgb_core::Error::External(format!("telegram bot failed: {e}")))?;

    Ok(())
}
