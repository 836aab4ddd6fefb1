use std::time::Instant;

use log::Level;

use super::canvas::IndexedCanvas;
use super::encoder::{EncodedImage, ImageEncoder};
use super::target::{sample_all, Target};
use crate::config::OverlayConfig;
use crate::math::Rect;

/// Result of one render call. Failures are values, never panics or `Err`s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Encoded overlay, ready to display
    Image(EncodedImage),
    /// Nothing to highlight; leave whatever is displayed alone
    Empty,
    /// Rasterized but the encoder failed
    Failed,
}

impl RenderOutcome {
    pub fn image(&self) -> Option<&EncodedImage> {
        match self {
            RenderOutcome::Image(image) => Some(image),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, RenderOutcome::Empty)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RenderOutcome::Failed)
    }
}

/// Stamp one hole per rectangle onto a background-filled canvas of the viewport size.
///
/// Holes are drawn in order with last-write-wins; holes with a non-positive
/// radius draw nothing and pixels off the canvas are clipped.
pub fn rasterize(rects: &[Rect], width: u32, height: u32, config: &OverlayConfig) -> IndexedCanvas {
    let mut canvas = IndexedCanvas::new(width, height, config.background);
    // Two colors always fit in a fresh palette
    let fill = canvas.color(config.fill).unwrap_or(0);

    for rect in rects {
        let center = rect.center();
        let radius = rect.half_extent() * config.radius_multiplier;

        if !center.is_finite() || radius.is_nan() {
            config.log_level.emit(
                Level::Debug,
                format_args!("(rasterize) skipping target with unusable geometry {rect:?}"),
            );
            continue;
        }

        canvas.fill_disk(center.x.floor() as i64, center.y.floor() as i64, radius, fill);
    }

    canvas
}

/// Full render: sample targets, rasterize at the viewport size, encode
pub fn render<T: Target>(
    targets: &[T],
    width: u32,
    height: u32,
    config: &OverlayConfig,
    encoder: &dyn ImageEncoder,
) -> RenderOutcome {
    let log = config.log_level;

    if targets.is_empty() {
        log.emit(
            Level::Warn,
            format_args!("(render) No targets have been specified for highlighting."),
        );
        return RenderOutcome::Empty;
    }

    let build_start = Instant::now();
    let rects = sample_all(targets);
    let canvas = rasterize(&rects, width, height, config);
    let build_time = build_start.elapsed();

    let encode_start = Instant::now();
    let encoded = encoder.encode(&canvas);
    let encode_time = encode_start.elapsed();

    match encoded {
        Ok(image) => {
            log.emit(Level::Debug, format_args!("(render)                Image Size: ({width}, {height})"));
            log.emit(Level::Debug, format_args!("(render)          Image Build Time: {build_time:?}"));
            log.emit(Level::Debug, format_args!("(render)         Image Encode Time: {encode_time:?}"));
            log.emit(
                Level::Debug,
                format_args!("(render) Image Creation Total Time: {:?}", build_time + encode_time),
            );
            RenderOutcome::Image(image)
        }
        Err(err) => {
            log.emit(Level::Error, format_args!("(render) Image generation failed: {err:#}"));
            RenderOutcome::Failed
        }
    }
}
