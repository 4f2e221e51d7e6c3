//! Styled glyph grid that views draw into and the renderer diffs.

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Colors plus the two attributes the game uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
    pub dim: bool,
}

impl CellStyle {
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            bold: false,
            dim: false,
        }
    }

    pub const fn bold(self) -> Self {
        Self { bold: true, ..self }
    }

    pub const fn dim(self) -> Self {
        Self { dim: true, ..self }
    }
}

impl Default for CellStyle {
    fn default() -> Self {
        Self::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0))
    }
}

/// One character with its style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub style: CellStyle,
}

impl Glyph {
    pub const fn new(ch: char, style: CellStyle) -> Self {
        Self { ch, style }
    }
}

impl Default for Glyph {
    fn default() -> Self {
        Self::new(' ', CellStyle::default())
    }
}

/// Row-major glyph grid. Writes outside the grid are clipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    glyphs: Vec<Glyph>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            glyphs: vec![Glyph::default(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Same dimensions as `other`
    pub fn same_size(&self, other: &FrameBuffer) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Change dimensions; the allocation is reused when it is large enough.
    pub fn resize(&mut self, width: u16, height: u16) {
        if (self.width, self.height) != (width, height) {
            self.width = width;
            self.height = height;
            self.glyphs
                .resize(width as usize * height as usize, Glyph::default());
        }
    }

    /// Glyphs of row `y`, empty when out of range.
    pub fn row(&self, y: u16) -> &[Glyph] {
        if y >= self.height {
            return &[];
        }
        let w = self.width as usize;
        let start = y as usize * w;
        &self.glyphs[start..start + w]
    }

    /// Mutable glyphs of row `y` from column `x` to the right edge.
    fn row_tail_mut(&mut self, x: u16, y: u16) -> &mut [Glyph] {
        if y >= self.height || x >= self.width {
            return &mut [];
        }
        let w = self.width as usize;
        let start = y as usize * w;
        &mut self.glyphs[start + x as usize..start + w]
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Glyph> {
        self.row(y).get(x as usize).copied()
    }

    pub fn set(&mut self, x: u16, y: u16, glyph: Glyph) {
        if let Some(slot) = self.row_tail_mut(x, y).first_mut() {
            *slot = glyph;
        }
    }

    pub fn clear(&mut self, glyph: Glyph) {
        self.glyphs.fill(glyph);
    }

    pub fn put_char(&mut self, x: u16, y: u16, ch: char, style: CellStyle) {
        self.set(x, y, Glyph::new(ch, style));
    }

    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: CellStyle) {
        for (slot, ch) in self.row_tail_mut(x, y).iter_mut().zip(s.chars()) {
            *slot = Glyph::new(ch, style);
        }
    }

    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, ch: char, style: CellStyle) {
        for row in y..y.saturating_add(h) {
            for slot in self.row_tail_mut(x, row).iter_mut().take(w as usize) {
                *slot = Glyph::new(ch, style);
            }
        }
    }

    /// Characters of one row, for tests and debugging.
    pub fn row_text(&self, y: u16) -> String {
        self.row(y).iter().map(|g| g.ch).collect()
    }
}
