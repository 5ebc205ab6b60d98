// grid.rs - The Board type for Conway's Game of Life

use rand::Rng;
use std::fmt;

/// One generation of a bounded, non-wrapping Life grid.
///
/// Cells are stored row-major (`index = y * width + x`) and the cell vector
/// always holds exactly `width * height` entries. A `Board` behaves as a
/// value: `next` and `resize` build new boards. The one in-place exception
/// is single-cell editing through [`Board::set_cell`] and [`Board::toggle`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Board {
    /// All-dead board of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    /// Adopts `values` when its length is `width * height`, otherwise falls
    /// back to an all-dead board of the requested size.
    pub fn from_cells(width: usize, height: usize, values: Vec<bool>) -> Self {
        if values.len() == width * height {
            Self { width, height, cells: values }
        } else {
            Self::new(width, height)
        }
    }

    /// Fresh random board: every cell is new territory of an empty board.
    pub fn random<R: Rng + ?Sized>(
        width: usize,
        height: usize,
        life_ratio: f64,
        border_ratio: f64,
        rng: &mut R,
    ) -> Self {
        Self::default().resize(width, height, life_ratio, border_ratio, rng)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Number of living cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Reads a cell. The caller must keep `(x, y)` inside the board.
    #[inline]
    pub fn cell(&self, x: usize, y: usize) -> bool {
        debug_assert!(x < self.width, "column {x} outside width {}", self.width);
        self.cells[y * self.width + x]
    }

    /// Checked read; `None` outside the board.
    pub fn get(&self, x: usize, y: usize) -> Option<bool> {
        self.contains(x, y).then(|| self.cells[y * self.width + x])
    }

    /// Writes a cell in place. Same precondition as [`Board::cell`].
    pub fn set_cell(&mut self, x: usize, y: usize, value: bool) {
        debug_assert!(x < self.width, "column {x} outside width {}", self.width);
        self.cells[y * self.width + x] = value;
    }

    /// Flips a cell in place. Coordinates outside the board are ignored.
    pub fn toggle(&mut self, x: usize, y: usize) {
        if self.contains(x, y) {
            let index = y * self.width + x;
            self.cells[index] = !self.cells[index];
        }
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Exact structural comparison, used for cycle detection.
    pub fn is_equal(&self, other: &Board) -> bool {
        self == other
    }

    fn live_neighbors(&self, x: usize, y: usize) -> u8 {
        let mut count = 0;
        for ny in y.saturating_sub(1)..=(y + 1).min(self.height - 1) {
            for nx in x.saturating_sub(1)..=(x + 1).min(self.width - 1) {
                if (nx, ny) != (x, y) && self.cell(nx, ny) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Computes the following generation. Every cell reads the same prior
    /// snapshot; anything past the edge counts as dead.
    pub fn next(&self) -> Board {
        let mut cells = Vec::with_capacity(self.cells.len());
        for y in 0..self.height {
            for x in 0..self.width {
                let next_state = match (self.cell(x, y), self.live_neighbors(x, y)) {
                    (true, 2) | (true, 3) => true, // Survival
                    (false, 3) => true,            // Birth
                    _ => false,                    // Death or stays dead
                };
                cells.push(next_state);
            }
        }
        Board {
            width: self.width,
            height: self.height,
            cells,
        }
    }

    /// Builds a board of the new size. Cells inside the old bounds are copied
    /// (anchored at the origin). New territory is dead inside the border band
    /// and otherwise alive with probability `life_ratio`.
    pub fn resize<R: Rng + ?Sized>(
        &self,
        width: usize,
        height: usize,
        life_ratio: f64,
        border_ratio: f64,
        rng: &mut R,
    ) -> Board {
        let (min_x, max_x) = border_band(width, border_ratio);
        let (min_y, max_y) = border_band(height, border_ratio);

        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let alive = if self.contains(x, y) {
                    self.cell(x, y)
                } else if x < min_x || x >= max_x || y < min_y || y >= max_y {
                    false
                } else {
                    rng.random::<f64>() < life_ratio
                };
                cells.push(alive);
            }
        }
        Board { width, height, cells }
    }
}

/// `[floor(ratio * dim), ceil((1 - ratio) * dim))` is the seedable span of one axis.
fn border_band(dim: usize, ratio: f64) -> (usize, usize) {
    let dim = dim as f64;
    let min = (ratio * dim).floor().max(0.0) as usize;
    let max = ((1.0 - ratio) * dim).ceil().max(0.0) as usize;
    (min, max)
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width.max(1)) {
            for &alive in row {
                f.write_str(if alive { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    const F: bool = false;
    const T: bool = true;

    fn vertical_blinker() -> Board {
        Board::from_cells(3, 3, vec![F, T, F, F, T, F, F, T, F])
    }

    #[test]
    fn mismatched_values_fall_back_to_dead_board() {
        let board = Board::from_cells(2, 2, vec![T, T, T]);
        assert_eq!(board.width(), 2);
        assert_eq!(board.height(), 2);
        assert_eq!(board.cells(), &[F, F, F, F]);
    }

    #[test]
    fn blinker_oscillates_with_period_two() {
        let start = vertical_blinker();
        let one = start.next();
        assert_eq!(one.cells(), &[F, F, F, T, T, T, F, F, F]);
        let two = one.next();
        assert!(two.is_equal(&start));
    }

    #[test]
    fn corner_cell_dies_without_wraparound() {
        for size in [2, 3, 5, 10] {
            let mut board = Board::new(size, size);
            board.set_cell(0, 0, true);
            board.set_cell(size - 1, size - 1, true);
            let next = board.next();
            assert!(!next.cell(0, 0), "size {size}");
            assert!(!next.cell(size - 1, size - 1), "size {size}");
        }
    }

    fn board_strategy(max_width: usize, max_height: usize) -> impl Strategy<Value = Board> {
        (1..max_width, 1..max_height).prop_flat_map(|(width, height)| {
            prop::collection::vec(any::<bool>(), width * height)
                .prop_map(move |cells| Board::from_cells(width, height, cells))
        })
    }

    proptest! {
        #[test]
        fn lonely_corner_dies_on_any_board(
            board in board_strategy(30, 30),
            corner in 0..4usize,
            keep_one in any::<bool>(),
        ) {
            let (width, height) = (board.width(), board.height());
            prop_assume!(width >= 2 && height >= 2);
            let x = if corner % 2 == 0 { 0 } else { width - 1 };
            let y = if corner < 2 { 0 } else { height - 1 };
            let nx = if x == 0 { 1 } else { x - 1 };
            let ny = if y == 0 { 1 } else { y - 1 };

            // The cells across the opposite edges stay random.
            let mut board = board;
            board.set_cell(x, y, true);
            board.set_cell(nx, y, keep_one);
            board.set_cell(x, ny, false);
            board.set_cell(nx, ny, false);

            prop_assert!(!board.next().cell(x, y));
        }

        #[test]
        fn blinker_has_period_two_anywhere(
            width in 3..40usize,
            height in 3..40usize,
            ox in any::<u16>(),
            oy in any::<u16>(),
        ) {
            let x = 1 + ox as usize % (width - 2);
            let y = 1 + oy as usize % (height - 2);
            let mut vertical = Board::new(width, height);
            let mut horizontal = Board::new(width, height);
            for d in [0, 1, 2] {
                vertical.set_cell(x, y + d - 1, true);
                horizontal.set_cell(x + d - 1, y, true);
            }

            let one = vertical.next();
            prop_assert_eq!(&one, &horizontal);
            prop_assert!(one.next().is_equal(&vertical));
        }
    }

    #[test]
    fn block_is_still_life() {
        let mut board = Board::new(4, 4);
        for (x, y) in [(1, 1), (2, 1), (1, 2), (2, 2)] {
            board.set_cell(x, y, true);
        }
        assert_eq!(board.next(), board);
    }

    #[test]
    fn toggle_outside_is_ignored() {
        let mut board = vertical_blinker();
        let before = board.clone();
        board.toggle(3, 0);
        board.toggle(0, 3);
        board.toggle(usize::MAX, usize::MAX);
        assert_eq!(board, before);

        board.toggle(0, 0);
        assert!(board.cell(0, 0));
        assert_eq!(board.get(0, 0), Some(true));
        assert_eq!(board.get(5, 0), None);
    }

    #[test]
    fn resize_preserves_overlap() {
        let mut rng = SmallRng::seed_from_u64(7);
        let original = vertical_blinker();
        let bigger = original.resize(8, 6, 0.0, 0.0, &mut rng);
        assert_eq!(bigger.population(), 3);
        for y in 0..3 {
            for x in 0..3 {
                assert_eq!(bigger.cell(x, y), original.cell(x, y));
            }
        }
        let back = bigger.resize(3, 3, 0.0, 0.0, &mut rng);
        assert_eq!(back, original);
    }

    #[test]
    fn resize_keeps_border_band_dead() {
        let mut rng = SmallRng::seed_from_u64(11);
        let board = Board::random(20, 10, 1.0, 0.25, &mut rng);
        // x in [5, 15) and y in [2, 8) are seeded, everything else is dead.
        for y in 0..10 {
            for x in 0..20 {
                let inside = (5..15).contains(&x) && (2..8).contains(&y);
                assert_eq!(board.cell(x, y), inside, "({x}, {y})");
            }
        }
    }

    #[test]
    fn zero_life_ratio_seeds_nothing() {
        let mut rng = SmallRng::seed_from_u64(3);
        let board = Board::random(16, 16, 0.0, 0.0, &mut rng);
        assert_eq!(board.population(), 0);
    }

    #[test]
    fn display_draws_rows() {
        assert_eq!(vertical_blinker().to_string(), ".#.\n.#.\n.#.\n");
    }
}
