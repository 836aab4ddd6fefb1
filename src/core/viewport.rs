use std::cell::Cell;
use std::rc::Rc;

/// One way of asking the environment how big the visible area is
pub trait ViewportSource {
    fn width(&self) -> Option<f64>;
    fn height(&self) -> Option<f64>;
}

/// Viewport size - dimensions of the visible area in whole pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

impl ViewportSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Total number of pixels
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Ordered fallback chain of viewport sources.
///
/// Width and height are resolved independently: each comes from the first
/// source reporting a positive value, floored to whole pixels, or 0 if none does.
#[derive(Default)]
pub struct ViewportProbe {
    sources: Vec<Box<dyn ViewportSource>>,
}

impl ViewportProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a lower-priority source
    pub fn with_source(mut self, source: impl ViewportSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    pub fn size(&self) -> ViewportSize {
        ViewportSize {
            width: first_positive(self.sources.iter().map(|s| s.width())),
            height: first_positive(self.sources.iter().map(|s| s.height())),
        }
    }
}

fn first_positive(values: impl Iterator<Item = Option<f64>>) -> u32 {
    values
        .flatten()
        .find(|v| *v > 0.0 && v.is_finite())
        .map(|v| v.floor().min(u32::MAX as f64) as u32)
        .unwrap_or(0)
}

/// Source with a fixed size
#[derive(Debug, Clone, Copy)]
pub struct FixedViewport {
    pub width: f64,
    pub height: f64,
}

impl FixedViewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl ViewportSource for FixedViewport {
    fn width(&self) -> Option<f64> {
        Some(self.width)
    }

    fn height(&self) -> Option<f64> {
        Some(self.height)
    }
}

/// Source whose size the host can change; clones share the size
#[derive(Debug, Clone, Default)]
pub struct SharedViewport {
    size: Rc<Cell<(f64, f64)>>,
}

impl SharedViewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Rc::new(Cell::new((width, height))),
        }
    }

    pub fn resize(&self, width: f64, height: f64) {
        self.size.set((width, height));
    }
}

impl ViewportSource for SharedViewport {
    fn width(&self) -> Option<f64> {
        Some(self.size.get().0)
    }

    fn height(&self) -> Option<f64> {
        Some(self.size.get().1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Source that knows nothing
    struct Missing;

    impl ViewportSource for Missing {
        fn width(&self) -> Option<f64> {
            None
        }
        fn height(&self) -> Option<f64> {
            None
        }
    }

    #[test]
    fn test_empty_probe_is_zero() {
        assert_eq!(ViewportProbe::new().size(), ViewportSize::new(0, 0));
    }

    #[test]
    fn test_first_source_wins() {
        let probe = ViewportProbe::new()
            .with_source(FixedViewport::new(800.0, 600.0))
            .with_source(FixedViewport::new(1024.0, 768.0));
        assert_eq!(probe.size(), ViewportSize::new(800, 600));
    }

    #[test]
    fn test_falls_through_missing_and_zero() {
        let probe = ViewportProbe::new()
            .with_source(Missing)
            .with_source(FixedViewport::new(0.0, 480.5))
            .with_source(FixedViewport::new(640.9, 100.0));
        assert_eq!(probe.size(), ViewportSize::new(640, 480));
    }

    #[test]
    fn test_shared_viewport_resizes() {
        let shared = SharedViewport::new(100.0, 100.0);
        let probe = ViewportProbe::new().with_source(shared.clone());
        shared.resize(300.0, 200.0);
        assert_eq!(probe.size(), ViewportSize::new(300, 200));
        assert_eq!(probe.size().pixel_count(), 60_000);
    }
}
