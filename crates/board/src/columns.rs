//! Small fixed-capacity list of column indices.

use crate::WIDTH;

/// Up to `WIDTH` column indices kept inline, in insertion order.
///
/// Search and rollouts build these lists on every ply, so they never touch
/// the heap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Columns {
    cols: [u8; WIDTH],
    len: u8,
}

impl Columns {
    /// Creates an empty list.
    #[inline]
    pub const fn new() -> Self {
        Self {
            cols: [0; WIDTH],
            len: 0,
        }
    }

    /// Appends a column.
    ///
    /// # Panics
    /// Panics if the list already holds `WIDTH` columns.
    #[inline]
    pub fn push(&mut self, col: usize) {
        self.cols[self.len as usize] = col as u8;
        self.len += 1;
    }

    /// Removes every column.
    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the column at `index`.
    ///
    /// # Panics
    /// Panics if `index >= self.len()`.
    #[inline]
    pub fn get(&self, index: usize) -> usize {
        assert!(index < self.len(), "column list index {index} out of range");
        self.cols[index] as usize
    }

    /// Returns true if `col` is in the list.
    #[inline]
    pub fn contains(&self, col: usize) -> bool {
        self.iter().any(|c| c == col)
    }

    /// Iterates over the columns in insertion order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.cols[..self.len()].iter().map(|&c| c as usize)
    }
}

impl FromIterator<usize> for Columns {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut columns = Columns::new();
        for col in iter {
            columns.push(col);
        }
        columns
    }
}
