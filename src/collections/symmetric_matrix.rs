/// Dense storage for values keyed by an unordered pair of indices.
///
/// Only the lower triangle (diagonal included) is stored, row by row:
///
/// ```text
///     0 1 2 3
///  0  X
///  1  X X
///  2  X X X
///  3  X X X X
/// ```
///
/// so `(x, y)` and `(y, x)` address the same cell, and growing the dimension
/// appends rows without moving existing ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymmetricMatrix<T> {
    data: Vec<T>,
    dim: usize,
}

#[inline]
fn triangle(n: usize) -> usize {
    n * (n + 1) / 2
}

impl<T: Clone> SymmetricMatrix<T> {
    /// Creates a `dim x dim` matrix with every cell set to `value`.
    #[must_use]
    pub fn new(dim: usize, value: T) -> Self {
        Self {
            data: vec![value; triangle(dim)],
            dim,
        }
    }

    /// Changes the dimension, keeping cells whose indices are both below the
    /// smaller of the two dimensions. New cells are set to `value`.
    pub fn resize(&mut self, dim: usize, value: T) {
        self.data.resize(triangle(dim), value);
        self.dim = dim;
    }

    /// Sets every cell to `value`.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }
}

impl<T> SymmetricMatrix<T> {
    /// Number of rows (and columns).
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.dim && y < self.dim, "({x}, {y}) outside {}", self.dim);
        let (hi, lo) = if x >= y { (x, y) } else { (y, x) };
        triangle(hi) + lo
    }

    /// Returns the cell for the pair, or `None` if either index is out of range.
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if x >= self.dim || y >= self.dim {
            return None;
        }
        self.data.get(self.offset(x, y))
    }

    /// Overwrites the cell for the pair.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn set(&mut self, x: usize, y: usize, value: T) {
        let at = self.offset(x, y);
        self.data[at] = value;
    }
}

impl<T> std::ops::Index<(usize, usize)> for SymmetricMatrix<T> {
    type Output = T;

    fn index(&self, (x, y): (usize, usize)) -> &T {
        &self.data[self.offset(x, y)]
    }
}

impl<T> std::ops::IndexMut<(usize, usize)> for SymmetricMatrix<T> {
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut T {
        let at = self.offset(x, y);
        &mut self.data[at]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_are_unordered() {
        let mut m = SymmetricMatrix::new(4, 0_u32);
        m[(3, 1)] = 7;
        assert_eq!(m[(1, 3)], 7);
        m.set(0, 2, 9);
        assert_eq!(m.get(2, 0), Some(&9));
        assert_eq!(m.get(4, 0), None);
    }

    #[test]
    fn cells_do_not_alias() {
        let n = 6;
        let mut m = SymmetricMatrix::new(n, 0_usize);
        for x in 0..n {
            for y in 0..=x {
                m[(x, y)] = x * 10 + y;
            }
        }
        for x in 0..n {
            for y in 0..=x {
                assert_eq!(m[(y, x)], x * 10 + y);
            }
        }
    }

    #[test]
    fn resize_keeps_leading_block() {
        let mut m = SymmetricMatrix::new(3, false);
        m[(2, 1)] = true;
        m.resize(5, false);
        assert_eq!(m.dim(), 5);
        assert!(m[(1, 2)]);
        assert!(!m[(4, 2)]);
        m.resize(2, false);
        assert_eq!(m.get(2, 1), None);
        m.fill(true);
        assert!(m[(0, 1)]);
    }
}
