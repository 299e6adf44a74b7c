use std::{
    fs,
    path::{Path, PathBuf},
};

use ab_glyph::FontVec;
use serde::Deserialize;

use crate::{errors::Error, Result};

/// The rectangular region of the background image the caption must fit into.
///
/// Invariant: `x2 > x1` and `y2 > y1`, enforced at load time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextBox {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl TextBox {
    pub fn width(&self) -> i32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> i32 {
        self.y2 - self.y1
    }
}

/// Typed configuration, immutable for the process lifetime.
///
/// The token comes from the command line; everything else from the fixed-name
/// `config.json` next to the binary.
#[derive(Clone, Debug)]
pub struct Config {
    pub bot_token: String,
    pub picture: PathBuf,
    pub font: PathBuf,
    pub text_box: TextBox,
}

#[derive(Deserialize)]
struct RawConfig {
    picture: String,
    textbox_coordinates: [i32; 4],
    font: String,
}

impl Config {
    /// Load and validate `config.json`, then probe both assets once so a bad
    /// picture or font path is fatal at startup rather than on first message.
    pub fn load(bot_token: String, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("cannot read config file {}: {e}", path.display()))
        })?;
        let cfg = Self::from_json_str(bot_token, &contents)?;
        cfg.probe_assets()?;
        Ok(cfg)
    }

    pub fn from_json_str(bot_token: String, json: &str) -> Result<Self> {
        let raw: RawConfig = serde_json::from_str(json)?;
        let [x1, y1, x2, y2] = raw.textbox_coordinates;
        if x2 <= x1 || y2 <= y1 {
            return Err(Error::Config(format!(
                "textbox_coordinates must satisfy x2 > x1 and y2 > y1, got [{x1}, {y1}, {x2}, {y2}]"
            )));
        }
        if bot_token.trim().is_empty() {
            return Err(Error::Config("bot token must not be empty".to_string()));
        }
        Ok(Self {
            bot_token,
            picture: PathBuf::from(raw.picture),
            font: PathBuf::from(raw.font),
            text_box: TextBox { x1, y1, x2, y2 },
        })
    }

    /// Decode the background image and parse the font once. Rendering still
    /// re-opens both fresh per call; this only front-loads the failure.
    fn probe_assets(&self) -> Result<()> {
        image::open(&self.picture).map_err(|e| {
            Error::Config(format!(
                "cannot open background image {}: {e}",
                self.picture.display()
            ))
        })?;
        let font_data = fs::read(&self.font).map_err(|e| {
            Error::Config(format!("cannot read font file {}: {e}", self.font.display()))
        })?;
        FontVec::try_from_vec(font_data).map_err(|e| {
            Error::Config(format!("cannot parse font file {}: {e}", self.font.display()))
        })?;
        Ok(())
    }
}
