use std::cell::{Ref, RefCell};
use std::rc::Rc;

use super::encoder::EncodedImage;
use crate::math::Rgba;

/// What a panel is currently presenting
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PanelContent {
    #[default]
    Blank,
    Image(EncodedImage),
    /// Flat color, used as the placeholder while resizing
    Color(Rgba),
}

/// Attachable display surface the overlay draws into
pub trait Panel {
    /// Insert into the display tree
    fn attach(&mut self);

    /// Remove from the display tree
    fn detach(&mut self);

    fn is_attached(&self) -> bool;

    fn show_image(&mut self, image: &EncodedImage);

    fn show_color(&mut self, color: Rgba);
}

/// Creates the overlay's panel the first time it is needed
pub trait PanelFactory {
    type Panel: Panel;

    fn create_panel(&mut self) -> Self::Panel;
}

/// Observable state of a `MemoryPanel`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelState {
    pub attached: bool,
    pub content: PanelContent,
    /// Times the panel was inserted into the display tree
    pub attach_count: usize,
    /// Times a raster image was set
    pub image_updates: usize,
    /// Times a flat color was set
    pub color_updates: usize,
}

/// In-memory panel; clones share state so callers can watch what the overlay does
#[derive(Debug, Clone, Default)]
pub struct MemoryPanel {
    state: Rc<RefCell<PanelState>>,
}

impl MemoryPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> Ref<'_, PanelState> {
        self.state.borrow()
    }

    pub fn snapshot(&self) -> PanelState {
        self.state.borrow().clone()
    }
}

impl Panel for MemoryPanel {
    fn attach(&mut self) {
        let mut state = self.state.borrow_mut();
        state.attached = true;
        state.attach_count += 1;
    }

    fn detach(&mut self) {
        self.state.borrow_mut().attached = false;
    }

    fn is_attached(&self) -> bool {
        self.state.borrow().attached
    }

    fn show_image(&mut self, image: &EncodedImage) {
        let mut state = self.state.borrow_mut();
        state.content = PanelContent::Image(image.clone());
        state.image_updates += 1;
    }

    fn show_color(&mut self, color: Rgba) {
        let mut state = self.state.borrow_mut();
        state.content = PanelContent::Color(color);
        state.color_updates += 1;
    }
}

/// Display tree that hands out `MemoryPanel`s and remembers every one it made
#[derive(Debug, Clone, Default)]
pub struct MemoryDisplay {
    panels: Rc<RefCell<Vec<MemoryPanel>>>,
}

impl MemoryDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every panel created so far, oldest first
    pub fn panels(&self) -> Vec<MemoryPanel> {
        self.panels.borrow().clone()
    }

    /// Panels currently in the display tree
    pub fn attached(&self) -> usize {
        self.panels.borrow().iter().filter(|p| p.is_attached()).count()
    }

    /// Most recently created panel
    pub fn latest(&self) -> Option<MemoryPanel> {
        self.panels.borrow().last().cloned()
    }
}

impl PanelFactory for MemoryDisplay {
    type Panel = MemoryPanel;

    fn create_panel(&mut self) -> MemoryPanel {
        let panel = MemoryPanel::new();
        self.panels.borrow_mut().push(panel.clone());
        panel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let panel = MemoryPanel::new();
        let mut handle = panel.clone();
        handle.attach();
        handle.show_color(Rgba::new(1, 2, 3, 4));

        let state = panel.snapshot();
        assert!(state.attached);
        assert_eq!(state.attach_count, 1);
        assert_eq!(state.content, PanelContent::Color(Rgba::new(1, 2, 3, 4)));
    }

    #[test]
    fn test_display_tracks_panels() {
        let mut display = MemoryDisplay::new();
        let mut panel = display.create_panel();
        assert_eq!(display.attached(), 0);

        panel.attach();
        assert_eq!(display.attached(), 1);
        assert_eq!(display.panels().len(), 1);

        panel.detach();
        assert_eq!(display.attached(), 0);
    }
}
