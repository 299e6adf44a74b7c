use std::{fs, io::Cursor, path::PathBuf};

use ab_glyph::{point, Font, FontVec, GlyphId, PxScale, ScaleFont};
use image::{ImageFormat, RgbImage};
use tracing::debug;

use crate::{config::TextBox, Result};

/// Smallest candidate font size for the fit search.
pub const MIN_FONT_SIZE: u32 = 25;
/// Exclusive upper bound of the fit search.
pub const MAX_FONT_SIZE: u32 = 60;

/// Rendering seam for the caption service, so the orchestration logic can be
/// tested without font or image assets.
pub trait RenderPort: Send + Sync {
    fn render(&self, text: &str) -> Result<Vec<u8>>;
}

/// Draws a caption onto the configured background image and encodes it as
/// JPEG. Both assets are re-opened on every call; nothing is cached.
pub struct Renderer {
    picture: PathBuf,
    font: PathBuf,
    text_box: TextBox,
}

impl Renderer {
    pub fn new(cfg: &crate::config::Config) -> Self {
        Self {
            picture: cfg.picture.clone(),
            font: cfg.font.clone(),
            text_box: cfg.text_box,
        }
    }
}

impl RenderPort for Renderer {
    fn render(&self, text: &str) -> Result<Vec<u8>> {
        let font = FontVec::try_from_vec(fs::read(&self.font)?)?;
        let mut img = image::open(&self.picture)?.to_rgb8();

        let size = fit_font_size(
            |s| measure_line(&font, PxScale::from(s as f32), text),
            self.text_box.width() as f32,
            self.text_box.height() as f32,
        );
        debug!(size, len = text.len(), "selected caption font size");

        draw_line(
            &mut img,
            &font,
            PxScale::from(size as f32),
            self.text_box.x1,
            self.text_box.y1,
            text,
        );

        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Jpeg)?;
        Ok(buf.into_inner())
    }
}

/// Ascending linear search over candidate sizes. The first size whose
/// measured extent overflows the box selects the previous size. If nothing in
/// the range overflows, the last evaluated size wins: very short text lands
/// on `MAX_FONT_SIZE - 1` rather than an intentional default, and overflow at
/// the very first candidate selects `MIN_FONT_SIZE - 1`. Both edges are
/// preserved from the original bot.
pub fn fit_font_size(measure: impl Fn(u32) -> (f32, f32), max_w: f32, max_h: f32) -> u32 {
    for size in MIN_FONT_SIZE..MAX_FONT_SIZE {
        let (w, h) = measure(size);
        if w > max_w || h > max_h {
            return size - 1;
        }
    }
    MAX_FONT_SIZE - 1
}

/// Single-line extent of `text` at `scale`: advance-sum width with kerning,
/// and the font's ascent-to-descent span as height.
fn measure_line(font: &FontVec, scale: PxScale, text: &str) -> (f32, f32) {
    let scaled = font.as_scaled(scale);
    let mut width = 0.0;
    let mut prev: Option<GlyphId> = None;
    for c in text.chars() {
        let id = scaled.glyph_id(c);
        if let Some(p) = prev {
            width += scaled.kern(p, id);
        }
        width += scaled.h_advance(id);
        prev = Some(id);
    }
    (width, scaled.height())
}

/// Rasterize `text` in black with its top-left corner at `(x, y)`, blending
/// each glyph's coverage into the image. No centering, no re-measuring: the
/// chosen size may overflow the box by a unit at the boundary.
fn draw_line(img: &mut RgbImage, font: &FontVec, scale: PxScale, x: i32, y: i32, text: &str) {
    let scaled = font.as_scaled(scale);
    let baseline = y as f32 + scaled.ascent();
    let mut pen_x = x as f32;
    let mut prev: Option<GlyphId> = None;

    for c in text.chars() {
        let id = scaled.glyph_id(c);
        if let Some(p) = prev {
            pen_x += scaled.kern(p, id);
        }
        let glyph = id.with_scale_and_position(scale, point(pen_x, baseline));
        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let px = bounds.min.x as i32 + gx as i32;
                let py = bounds.min.y as i32 + gy as i32;
                if px < 0 || py < 0 || px as u32 >= img.width() || py as u32 >= img.height() {
                    return;
                }
                let coverage = coverage.clamp(0.0, 1.0);
                let pixel = img.get_pixel_mut(px as u32, py as u32);
                for channel in pixel.0.iter_mut() {
                    *channel = (*channel as f32 * (1.0 - coverage)) as u8;
                }
            });
        }
        pen_x += scaled.h_advance(id);
        prev = Some(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TextBox;

    // Box from the worked example in the original bot's docs: 200x50.
    const BOX_W: f32 = 200.0;
    const BOX_H: f32 = 50.0;

    const FIXTURE_FONT: &str = concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/data/DejaVuSansMono-Oblique.ttf"
    );

    fn fixture_font() -> FontVec {
        FontVec::try_from_vec(fs::read(FIXTURE_FONT).unwrap()).unwrap()
    }

    fn fixture_renderer(picture: PathBuf) -> Renderer {
        Renderer {
            picture,
            font: PathBuf::from(FIXTURE_FONT),
            text_box: TextBox {
                x1: 10,
                y1: 10,
                x2: 210,
                y2: 60,
            },
        }
    }

    fn write_background(tag: &str) -> PathBuf {
        let path = PathBuf::from(format!("/tmp/sgb-bg-{tag}-{}.png", std::process::id()));
        RgbImage::from_pixel(300, 200, image::Rgb([230, 230, 230]))
            .save(&path)
            .unwrap();
        path
    }

    #[test]
    fn short_text_exhausts_to_last_size() {
        // Extent never overflows the box at any candidate size.
        let size = fit_font_size(|_| (10.0, 10.0), BOX_W, BOX_H);
        assert_eq!(size, MAX_FONT_SIZE - 1);
    }

    #[test]
    fn first_overflow_steps_back_one() {
        // Width grows linearly with size; crosses 200 strictly above size 40.
        let size = fit_font_size(|s| (s as f32 * 5.0, 10.0), BOX_W, BOX_H);
        // 41 * 5 = 205 > 200 is the first overflow, so 40 is selected.
        assert_eq!(size, 40);
    }

    #[test]
    fn height_overflow_counts_too() {
        let size = fit_font_size(|s| (10.0, s as f32 + 10.0), BOX_W, BOX_H);
        // Height 51 at size 41 is the first overflow.
        assert_eq!(size, 40);
    }

    #[test]
    fn overflow_at_minimum_selects_one_below_minimum() {
        // Long text that already overflows at the first candidate.
        let size = fit_font_size(|s| (s as f32 * 50.0, 10.0), BOX_W, BOX_H);
        assert_eq!(size, MIN_FONT_SIZE - 1);
    }

    #[test]
    fn exact_fit_at_boundary_does_not_overflow() {
        // Comparison is strict: measuring exactly the box width is a fit.
        let size = fit_font_size(|s| (if s <= 30 { BOX_W } else { BOX_W + 1.0 }, 10.0), BOX_W, BOX_H);
        assert_eq!(size, 30);
    }

    #[test]
    fn measure_grows_with_text_and_size() {
        let font = fixture_font();
        let scale = PxScale::from(30.0);

        let (w1, h1) = measure_line(&font, scale, "W");
        let (w2, _) = measure_line(&font, scale, "WW");
        assert!(w1 > 0.0 && h1 > 0.0);
        assert!(w2 > w1);

        let (w_big, h_big) = measure_line(&font, PxScale::from(60.0), "W");
        assert!(w_big > w1);
        assert!(h_big > h1);

        assert_eq!(measure_line(&font, scale, "").0, 0.0);
    }

    #[test]
    fn renders_deterministic_jpeg_of_background_size() {
        let picture = write_background("det");
        let renderer = fixture_renderer(picture.clone());

        let first = renderer.render("Hello sign").unwrap();
        let second = renderer.render("Hello sign").unwrap();
        assert_eq!(first, second);

        assert_eq!(
            image::guess_format(&first).unwrap(),
            image::ImageFormat::Jpeg
        );
        let decoded = image::load_from_memory(&first).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (300, 200));

        let _ = fs::remove_file(&picture);
    }

    #[test]
    fn render_draws_dark_text_inside_the_box() {
        let picture = write_background("draw");
        let renderer = fixture_renderer(picture.clone());

        let jpeg = renderer.render("Hi").unwrap();
        let decoded = image::load_from_memory(&jpeg).unwrap().to_rgb8();

        // The 230-gray background stays light; the glyphs in the box region
        // must push some pixel well below it despite JPEG artifacts.
        let min_in_box = (10..60)
            .flat_map(|y| (10..210).map(move |x| (x, y)))
            .map(|(x, y)| decoded.get_pixel(x, y).0[0])
            .min()
            .unwrap();
        assert!(min_in_box < 128, "min pixel in box was {min_in_box}");

        let _ = fs::remove_file(&picture);
    }

    #[test]
    fn missing_background_fails_the_render() {
        let renderer = fixture_renderer(PathBuf::from(format!(
            "/tmp/sgb-no-such-bg-{}.png",
            std::process::id()
        )));
        assert!(renderer.render("Hi").is_err());
    }
}
