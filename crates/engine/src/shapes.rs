use shared::domain::{Coord, CursorShape};

/// `(dx, dy)` offsets of each cursor relative to the hovered cell.
pub fn offsets(shape: CursorShape) -> &'static [(i32, i32)] {
    match shape {
        CursorShape::SingleTile => &[(0, 0)],
        CursorShape::Plus => &[(0, 0), (0, -1), (0, 1), (-1, 0), (1, 0)],
        CursorShape::T => &[(0, 0), (-1, 0), (1, 0), (0, -1), (0, -2)],
        CursorShape::L => &[(0, 0), (1, 0), (2, 0), (0, 1), (0, 2)],
        CursorShape::LPlus => &[(-1, -1), (0, -1), (1, -1), (1, 0), (-1, 1)],
        CursorShape::Checker => &[(-1, -1), (1, -1), (-1, 1), (1, 1)],
        CursorShape::LineHorizontal => &[(-2, 0), (-1, 0), (0, 0), (1, 0), (2, 0)],
        CursorShape::LineDiagonalUp => &[(2, -2), (1, -1), (0, 0), (-1, 1), (-2, 2)],
        CursorShape::LineVertical => &[(0, -2), (0, -1), (0, 0), (0, 1), (0, 2)],
        CursorShape::LineDiagonalDown => &[(-2, -2), (-1, -1), (0, 0), (1, 1), (2, 2)],
    }
}

/// Cells of `shape` anchored at `origin` that fall on a `size`×`size` board.
pub fn footprint(shape: CursorShape, origin: Coord, size: usize) -> Vec<Coord> {
    let size = size as i32;
    offsets(shape)
        .iter()
        .map(|(dx, dy)| origin.offset(*dx, *dy))
        .filter(|coord| (0..size).contains(&coord.x) && (0..size).contains(&coord.y))
        .collect()
}
