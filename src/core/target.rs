use crate::math::{Bounds, Rect};

/// Anything that can be highlighted: reports where it currently sits in the viewport.
///
/// Queried once per render. `None` means the element has no geometry right now
/// and is skipped for that render.
pub trait Target {
    fn bounds(&self) -> Option<Bounds>;
}

impl Target for Bounds {
    fn bounds(&self) -> Option<Bounds> {
        Some(*self)
    }
}

impl Target for Rect {
    fn bounds(&self) -> Option<Bounds> {
        Some(Bounds::Sized {
            left: self.left,
            top: self.top,
            width: self.width,
            height: self.height,
        })
    }
}

impl<T: Target + ?Sized> Target for &T {
    fn bounds(&self) -> Option<Bounds> {
        (**self).bounds()
    }
}

impl<T: Target + ?Sized> Target for Box<T> {
    fn bounds(&self) -> Option<Bounds> {
        (**self).bounds()
    }
}

impl<T: Target + ?Sized> Target for std::rc::Rc<T> {
    fn bounds(&self) -> Option<Bounds> {
        (**self).bounds()
    }
}

/// Normalized rectangle for one target
pub fn sample<T: Target + ?Sized>(target: &T) -> Option<Rect> {
    target.bounds().map(|b| b.normalize())
}

/// Normalized rectangles for every target that currently has geometry, in order
pub fn sample_all<T: Target>(targets: &[T]) -> Vec<Rect> {
    targets.iter().filter_map(sample).collect()
}
