mod rect;

pub use rect::Rect2i;
