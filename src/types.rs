use ndarray::Array2;

/// Single coordinate axis used for rows, columns, and board dimensions.
pub type Coord = u8;

/// Count type used for mine totals and cell totals.
pub type CellCount = u16;

/// Grid position as `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, center: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, center: Coord2) -> NeighborIter {
        let dim = self.dim();
        let bounds = (dim.0.try_into().unwrap(), dim.1.try_into().unwrap());
        NeighborIter::new(center, bounds)
    }
}

/// The 8 relative offsets in row-major order, `(0, 0)` excluded.
const OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `center`, returning a value only while it stays in bounds.
fn apply_delta(center: Coord2, delta: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let (row, col) = center;
    let (d_row, d_col) = delta;
    let (rows, cols) = bounds;

    let next_row = row.checked_add_signed(d_row)?;
    if next_row >= rows {
        return None;
    }

    let next_col = col.checked_add_signed(d_col)?;
    if next_col >= cols {
        return None;
    }

    Some((next_row, next_col))
}

/// Iterator over the up-to-8 in-bounds neighbors of a cell.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    offset: usize,
}

impl NeighborIter {
    pub(crate) fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            offset: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while self.offset < OFFSETS.len() {
            let next_item = apply_delta(self.center, OFFSETS[self.offset], self.bounds);
            self.offset += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
        None
    }
}
