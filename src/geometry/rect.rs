use serde::Serialize;

/// An integer rectangle as written in atlas `bounds:` and `split:` lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Rect2i {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect2i {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// True for a zero-sized rectangle
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}
