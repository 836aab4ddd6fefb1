//! Overlay controller: owns the panel, the target list and the resize debounce.
//!
//! The host event loop drives it from a single thread:
//! `show_highlight` / `init` / `clear` on user action, `on_resize` for every
//! resize notification and `tick` with the elapsed time each frame.

use std::fmt;

use log::Level;

use crate::config::OverlayConfig;
use crate::core::{
    rasterizer, Debouncer, EventBinder, ImageEncoder, Panel, PanelFactory, PngDataUriEncoder,
    RenderOutcome, Target, ViewportProbe,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayState {
    Hidden,
    Displayed,
}

/// Counters for what the overlay has done since construction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighlighterStats {
    /// Renders whose image reached the panel
    pub renders: usize,
    /// Render attempts that had no targets
    pub empty: usize,
    /// Render attempts whose encoding failed
    pub failed: usize,
    /// Scheduled renders dropped because a newer resize came in
    pub superseded: usize,
    /// Scheduled renders dropped by `clear`
    pub cancelled: usize,
    /// Times the flat placeholder replaced the image
    pub placeholders: usize,
}

/// Punch-hole overlay over a set of targets
pub struct Highlighter<T: Target, F: PanelFactory> {
    config: OverlayConfig,
    targets: Vec<T>,
    factory: F,
    panel: Option<F::Panel>,
    viewport: ViewportProbe,
    events: EventBinder,
    encoder: Box<dyn ImageEncoder>,
    debouncer: Debouncer,
    state: OverlayState,
    epoch: u64,
    listening: bool,
    showing_image: bool,
    stats: HighlighterStats,
}

impl<T: Target, F: PanelFactory> Highlighter<T, F> {
    /// Replace the targets; re-renders right away if the overlay is showing
    pub fn init(&mut self, targets: Vec<T>) -> Option<RenderOutcome> {
        self.targets = targets;
        self.log(
            Level::Debug,
            format_args!("(Highlighter::init) Initialized highlighter with {} targets.", self.targets.len()),
        );

        match self.state {
            OverlayState::Displayed => Some(self.update_highlight()),
            OverlayState::Hidden => None,
        }
    }

    /// Bind the resize listener, show the overlay and render it immediately
    pub fn show_highlight(&mut self) -> RenderOutcome {
        self.log(Level::Info, format_args!("(Highlighter::show_highlight) Showing highlighter."));

        if !self.listening {
            match self.events.bind() {
                Ok(mechanism) => {
                    self.listening = true;
                    self.log(
                        Level::Debug,
                        format_args!("(Highlighter::show_highlight) Resize listener bound via {mechanism}."),
                    );
                }
                Err(err) => self.log(
                    Level::Warn,
                    format_args!("(Highlighter::show_highlight) {err}; resize refresh disabled."),
                ),
            }
        }

        self.state = OverlayState::Displayed;
        self.update_highlight()
    }

    /// Unbind, drop pending renders and targets, and take the panel off the display
    pub fn clear(&mut self) {
        self.log(Level::Info, format_args!("(Highlighter::clear) Clearing highlighter."));

        if let Err(err) = self.events.unbind() {
            self.log(Level::Warn, format_args!("(Highlighter::clear) {err}."));
        }
        self.listening = false;

        self.stats.cancelled += self.debouncer.cancel_all();
        self.state = OverlayState::Hidden;
        self.showing_image = false;
        self.targets.clear();

        if let Some(mut panel) = self.panel.take() {
            if panel.is_attached() {
                panel.detach();
            }
        }
    }

    /// Resize notification: swap in the placeholder and schedule a debounced render
    pub fn on_resize(&mut self) {
        if self.state != OverlayState::Displayed || !self.listening {
            self.log(Level::Debug, format_args!("(Highlighter::on_resize) Not listening; ignored."));
            return;
        }

        // Only swap once per burst
        if self.showing_image {
            if let Some(panel) = self.panel.as_mut().filter(|p| p.is_attached()) {
                panel.show_color(self.config.background);
                self.showing_image = false;
                self.stats.placeholders += 1;
            }
        }

        self.epoch += 1;
        self.debouncer.schedule(self.epoch);
    }

    /// Advance the debounce delay by `delta` seconds; returns how many renders ran
    pub fn tick(&mut self, delta: f32) -> usize {
        let mut rendered = 0;

        for fired in self.debouncer.tick(delta) {
            if fired.token.is_cancelled() || self.state != OverlayState::Displayed {
                self.stats.cancelled += 1;
                continue;
            }
            if fired.epoch != self.epoch {
                self.stats.superseded += 1;
                continue;
            }

            self.update_highlight();
            rendered += 1;
        }

        rendered
    }

    fn update_highlight(&mut self) -> RenderOutcome {
        self.log(Level::Info, format_args!("(Highlighter::update_highlight) Updating highlighter."));

        let size = self.viewport.size();
        let outcome = rasterizer::render(
            &self.targets,
            size.width,
            size.height,
            &self.config,
            self.encoder.as_ref(),
        );

        match &outcome {
            RenderOutcome::Image(image) => {
                let factory = &mut self.factory;
                let panel = self.panel.get_or_insert_with(|| factory.create_panel());

                if panel.is_attached() {
                    panel.detach();
                }
                panel.show_image(image);
                panel.attach();

                self.showing_image = true;
                self.stats.renders += 1;
            }
            RenderOutcome::Empty => self.stats.empty += 1,
            RenderOutcome::Failed => {
                self.log(
                    Level::Error,
                    format_args!("(Highlighter::update_highlight) Failed to generate the overlay image."),
                );
                self.stats.failed += 1;
            }
        }

        outcome
    }

    fn log(&self, level: Level, args: fmt::Arguments<'_>) {
        self.config.log_level.emit(level, args);
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    pub fn is_displayed(&self) -> bool {
        self.state == OverlayState::Displayed
    }

    /// Whether resize notifications are being honoured
    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn targets(&self) -> &[T] {
        &self.targets
    }

    pub fn panel(&self) -> Option<&F::Panel> {
        self.panel.as_ref()
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn stats(&self) -> HighlighterStats {
        self.stats
    }

    /// Scheduled renders still waiting out the delay
    pub fn pending_renders(&self) -> usize {
        self.debouncer.pending()
    }
}

/// Builder for a highlighter
pub struct HighlighterBuilder<F: PanelFactory> {
    factory: F,
    config: OverlayConfig,
    viewport: ViewportProbe,
    events: EventBinder,
    encoder: Box<dyn ImageEncoder>,
}

impl<F: PanelFactory> HighlighterBuilder<F> {
    /// Start from default config, PNG encoder, an empty viewport chain and no event binding
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            config: OverlayConfig::default(),
            viewport: ViewportProbe::new(),
            events: EventBinder::new(),
            encoder: Box::new(PngDataUriEncoder),
        }
    }

    pub fn config(mut self, config: OverlayConfig) -> Self {
        self.config = config;
        self
    }

    pub fn viewport(mut self, viewport: ViewportProbe) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn events(mut self, events: EventBinder) -> Self {
        self.events = events;
        self
    }

    pub fn encoder(mut self, encoder: impl ImageEncoder + 'static) -> Self {
        self.encoder = Box::new(encoder);
        self
    }

    pub fn build<T: Target>(self) -> Highlighter<T, F> {
        let debouncer = Debouncer::new(self.config.resize_delay_secs());

        Highlighter {
            config: self.config,
            targets: Vec::new(),
            factory: self.factory,
            panel: None,
            viewport: self.viewport,
            events: self.events,
            encoder: self.encoder,
            debouncer,
            state: OverlayState::Hidden,
            epoch: 0,
            listening: false,
            showing_image: false,
            stats: HighlighterStats::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FixedViewport, FlagBinding, MemoryDisplay};
    use crate::math::Rect;

    fn highlighter(display: &MemoryDisplay) -> Highlighter<Rect, MemoryDisplay> {
        HighlighterBuilder::new(display.clone())
            .viewport(ViewportProbe::new().with_source(FixedViewport::new(64.0, 48.0)))
            .events(EventBinder::new().with_mechanism(FlagBinding::new("listen")))
            .build()
    }

    #[test]
    fn test_starts_hidden_without_panel() {
        let display = MemoryDisplay::new();
        let overlay = highlighter(&display);
        assert_eq!(overlay.state(), OverlayState::Hidden);
        assert!(overlay.panel().is_none());
        assert_eq!(overlay.epoch(), 0);
    }

    #[test]
    fn test_init_while_hidden_does_not_render() {
        let display = MemoryDisplay::new();
        let mut overlay = highlighter(&display);
        assert!(overlay.init(vec![Rect::new(0.0, 0.0, 10.0, 10.0)]).is_none());
        assert!(display.panels().is_empty());
    }

    #[test]
    fn test_resize_ignored_while_hidden() {
        let display = MemoryDisplay::new();
        let mut overlay = highlighter(&display);
        overlay.on_resize();
        assert_eq!(overlay.epoch(), 0);
        assert_eq!(overlay.pending_renders(), 0);
    }

    #[test]
    fn test_panel_reused_across_renders() {
        let display = MemoryDisplay::new();
        let mut overlay = highlighter(&display);
        overlay.init(vec![Rect::new(0.0, 0.0, 10.0, 10.0)]);
        overlay.show_highlight();
        overlay.init(vec![Rect::new(20.0, 20.0, 10.0, 10.0)]);

        assert_eq!(display.panels().len(), 1);
        assert_eq!(overlay.stats().renders, 2);
        assert_eq!(display.attached(), 1);
    }
}
