use crate::math::Rgba;

/// Upper bound on distinct colors an indexed canvas can hold
pub const MAX_PALETTE: usize = 256;

/// Canvas state - grid of palette indices plus the palette they refer to
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedCanvas {
    /// One palette index per pixel, row-major
    indices: Vec<u8>,
    /// Distinct colors referenced by `indices`
    palette: Vec<Rgba>,
    width: u32,
    height: u32,
}

impl IndexedCanvas {
    /// Create canvas filled with `background` (palette entry 0)
    pub fn new(width: u32, height: u32, background: Rgba) -> Self {
        let pixel_count = width as usize * height as usize;

        Self {
            indices: vec![0; pixel_count],
            palette: vec![background],
            width,
            height,
        }
    }

    /// Palette index for `color`, adding it if new.
    /// Returns None once the palette is full.
    pub fn color(&mut self, color: Rgba) -> Option<u8> {
        if let Some(idx) = self.palette.iter().position(|c| *c == color) {
            return Some(idx as u8);
        }
        if self.palette.len() >= MAX_PALETTE {
            return None;
        }
        self.palette.push(color);
        Some((self.palette.len() - 1) as u8)
    }

    /// Fill entire canvas with one palette entry
    pub fn clear(&mut self, index: u8) {
        self.indices.fill(index);
    }

    /// Set single pixel; out-of-bounds coordinates are skipped
    pub fn set_pixel(&mut self, x: i64, y: i64, index: u8) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }

        let idx = y as usize * self.width as usize + x as usize;
        self.indices[idx] = index;
    }

    /// Stamp a filled disk: every integer offset (dx, dy) with dx² + dy² <= radius²
    /// around (cx, cy). A radius <= 0 draws nothing.
    pub fn fill_disk(&mut self, cx: i64, cy: i64, radius: f64, index: u8) {
        if !(radius > 0.0) {
            return;
        }

        let r_sq = radius * radius;
        let reach = radius.floor() as i64;

        // Only scan rows that intersect the canvas
        let y_min = (-reach).max(cy.saturating_neg());
        let y_max = reach.min((self.height as i64 - 1).saturating_sub(cy));

        for dy in y_min..=y_max {
            let dy_f = dy as f64;
            let rem = r_sq - dy_f * dy_f;
            if rem < 0.0 {
                continue;
            }
            let mut span = rem.sqrt().floor();
            // sqrt can land one off at the disk edge
            if (span + 1.0) * (span + 1.0) <= rem {
                span += 1.0;
            } else if span * span > rem {
                span -= 1.0;
            }
            let span = span as i64;

            let x_start = cx.saturating_sub(span).max(0);
            let x_end = cx.saturating_add(span).min(self.width as i64 - 1);
            if x_start > x_end {
                continue;
            }

            let y = cy.saturating_add(dy);
            if y < 0 || y >= self.height as i64 {
                continue;
            }
            let row = y as usize * self.width as usize;
            self.indices[row + x_start as usize..=row + x_end as usize].fill(index);
        }
    }

    /// Palette index at (x, y)
    pub fn index_at(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.indices[y as usize * self.width as usize + x as usize])
    }

    /// Resolved color at (x, y)
    pub fn color_at(&self, x: u32, y: u32) -> Option<Rgba> {
        self.index_at(x, y).map(|i| self.palette[i as usize])
    }

    /// Get index buffer
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    /// Get palette
    pub fn palette(&self) -> &[Rgba] {
        &self.palette
    }

    /// Get canvas dimensions
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of pixels currently holding palette entry `index`
    pub fn count(&self, index: u8) -> usize {
        self.indices.iter().filter(|&&i| i == index).count()
    }
}
