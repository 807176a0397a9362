use crate::LevelOffset;

/// One layer of the tower: a `width × height` grid stored flat in column-major order, so the
/// item at `(x, y)` lives at `x * height + y`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level<T> {
    pub width: LevelOffset,
    pub height: LevelOffset,
    pub items: Vec<T>,
}

impl<T> Level<T> {
    pub fn with_capacity(width: LevelOffset, height: LevelOffset) -> Self {
        Level {
            width,
            height,
            items: Vec::with_capacity(width as usize * height as usize),
        }
    }

    /// Look up the item at `(x, y)`.
    ///
    /// Coordinates are signed so callers can probe around the edges freely; anything outside
    /// `[0, width) × [0, height)` is `None`.
    pub fn get(&self, x: i32, y: i32) -> Option<&T> {
        let i = self.index_of(x, y)?;

        self.items.get(i)
    }

    /// Like [`Level::get`], but also returns the flat index of the item.
    pub fn get_indexed(&self, x: i32, y: i32) -> Option<(usize, &T)> {
        let i = self.index_of(x, y)?;

        self.items.get(i).map(|item| (i, item))
    }

    /// Flat index of `(x, y)`, if it is inside the grid.
    pub fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= self.width as i32 || y < 0 || y >= self.height as i32 {
            return None;
        }

        Some(x as usize * self.height as usize + y as usize)
    }

    /// Grid coordinates of flat index `i`.
    pub fn coords_of(&self, i: usize) -> (LevelOffset, LevelOffset) {
        let h = self.height as usize;

        ((i / h) as LevelOffset, (i % h) as LevelOffset)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether this level has collapsed to a single item, or has nothing left to collapse.
    pub fn is_root(&self) -> bool {
        self.width <= 1 && self.height <= 1
    }
}
