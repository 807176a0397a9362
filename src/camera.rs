use crate::ScreenSize;

/// Hex values of braille dots
///
/// ```text
///  1   8
///  2  10
///  4  20
/// 40  80
/// ```
///
/// Where the base blank pattern is codepoint `0x2800` (or U+2800)
///
/// To get other configurations, just add the numbers above.
const BRAILLE_EMPTY: u32 = 0x2800;

/// Braille dots per character, horizontally and vertically.
pub const DOTS_X: usize = 2;
pub const DOTS_Y: usize = 4;

pub struct Camera {
    /// The pixel buffer
    pb: Vec<bool>,

    /// The frame buffer.
    fb: String,

    /// Codepoints. This allows us to construct the framebuffer more easily
    cp: Vec<u32>,

    /// Width of the pixel buffer
    w: usize,

    /// Height of the pixel buffer
    h: usize,

    /// `x` offset from origin, in pixels
    x: i64,

    /// `y` offset from origin, in pixels
    y: i64,
}

impl Camera {
    /// A camera covering `cols × rows` terminal characters.
    pub fn new(cols: ScreenSize, rows: ScreenSize) -> Self {
        Self::with_pixels(cols as usize * DOTS_X, rows as usize * DOTS_Y)
    }

    /// A camera with a `w × h` pixel buffer.
    pub fn with_pixels(w: usize, h: usize) -> Self {
        // Let `w` and `h` refer to width and height of the pixel buffer. Then `bw = ceil(w / 2)`
        // and `bh = ceil(h / 4)` are the width and height of braille characters of our framebuffer
        // (that is, not accounting for the trailing newlines expected at the end of each line).
        let (bw, bh) = (w.div_ceil(DOTS_X), h.div_ceil(DOTS_Y));

        // Each braille character is 3 bytes, and newlines one byte.
        let fb = String::with_capacity(3 * (bw * bh) + bh);

        Self {
            pb: vec![false; w * h],
            fb,
            cp: vec![BRAILLE_EMPTY; bw * bh],
            w,
            h,
            x: 0,
            y: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    pub fn offset(&self) -> (i64, i64) {
        (self.x, self.y)
    }

    pub fn offset_x(&mut self, offset: i64) {
        self.x += offset;
    }

    pub fn offset_y(&mut self, offset: i64) {
        self.y += offset;
    }

    pub fn reset_view(&mut self) {
        self.x = 0;
        self.y = 0;
    }

    /// Resize to `cols × rows` terminal characters, keeping the view offset.
    pub fn resize(&mut self, cols: ScreenSize, rows: ScreenSize) {
        let (x, y) = (self.x, self.y);

        *self = Self::new(cols, rows);
        self.x = x;
        self.y = y;
    }

    /// Turns on a single pixel, given in field pixel coordinates. Pixels outside the view are
    /// dropped.
    pub fn draw_pixel(&mut self, x: i64, y: i64) {
        if let Some(i) = self.xy_from(x - self.x, y - self.y) {
            self.pb[i] = true;
        }
    }

    /// Turns on a filled `w × h` rectangle of pixels with its top left corner at `(x, y)`.
    pub fn draw_rect(&mut self, x: i64, y: i64, w: i64, h: i64) {
        for dx in 0..w {
            for dy in 0..h {
                self.draw_pixel(x + dx, y + dy);
            }
        }
    }

    /// Turns on the border of a `w × h` rectangle with its top left corner at `(x, y)`.
    pub fn draw_outline(&mut self, x: i64, y: i64, w: i64, h: i64) {
        if w <= 0 || h <= 0 {
            return;
        }

        for dx in 0..w {
            self.draw_pixel(x + dx, y);
            self.draw_pixel(x + dx, y + h - 1);
        }

        for dy in 0..h {
            self.draw_pixel(x, y + dy);
            self.draw_pixel(x + w - 1, y + dy);
        }
    }

    /// Reset the pixel buffer
    pub fn reset(&mut self) {
        self.pb.fill(false);
    }

    /// Turn the pixel buffer into lines of braille characters, one line per `DOTS_Y` pixel rows.
    pub fn render(&mut self) -> &str {
        let bw = self.w.div_ceil(DOTS_X);

        // compute new codepoints
        self.cp.fill(BRAILLE_EMPTY);

        for (n, &px) in self.pb.iter().enumerate() {
            if px {
                let (x, y) = self.xy_to(n);
                self.cp[(y / DOTS_Y) * bw + (x / DOTS_X)] += Self::get_hex_value(x, y);
            }
        }

        self.fb.clear();

        for (i, &c) in self.cp.iter().enumerate() {
            if i > 0 && i % bw == 0 {
                self.fb.push('\n');
            }

            // every codepoint stays within the braille block
            self.fb.push(char::from_u32(c).unwrap_or(' '));
        }
        self.fb.push('\n');

        &self.fb
    }

    fn xy_to(&self, n: usize) -> (usize, usize) {
        (n % self.w, n / self.w)
    }

    fn xy_from(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.w as i64 || y >= self.h as i64 {
            return None;
        }

        Some(y as usize * self.w + x as usize)
    }

    fn get_hex_value(x: usize, y: usize) -> u32 {
        match (x % 2, y % 4) {
            (0, 0) => 0x1,
            (1, 0) => 0x8,
            (0, 1) => 0x2,
            (1, 1) => 0x10,
            (0, 2) => 0x4,
            (1, 2) => 0x20,
            (0, 3) => 0x40,
            (1, 3) => 0x80,
            _ => unreachable!(),
        }
    }
}
