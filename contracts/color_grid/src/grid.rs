//! Board geometry and cell records.

use ink::primitives::AccountId;

/// Palette index chosen by the painter. Any value is a valid color.
pub type ColorId = u32;

/// Round counter. Rounds start at 1; 0 means "no round".
pub type RoundId = u32;

/// Last stroke applied to a cell.
///
/// A cell counts as painted only while `round` equals the active round, so
/// advancing the round resets the whole board without rewriting any record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, scale::Encode, scale::Decode)]
#[cfg_attr(
    feature = "std",
    derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
)]
pub struct Cell {
    pub color_id: ColorId,
    pub painter: AccountId,
    pub round: RoundId,
}

impl Cell {
    pub fn is_painted_in(&self, round: RoundId) -> bool {
        self.round == round
    }
}

/// Row-major index of `(x, y)`, or `None` when off the board.
pub fn cell_index(side: u32, x: u32, y: u32) -> Option<u32> {
    if x >= side || y >= side {
        return None;
    }
    // side <= MAX_GRID_SIDE keeps this well inside u32
    Some(y * side + x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_is_row_major() {
        assert_eq!(cell_index(4, 0, 0), Some(0));
        assert_eq!(cell_index(4, 3, 0), Some(3));
        assert_eq!(cell_index(4, 0, 1), Some(4));
        assert_eq!(cell_index(4, 3, 3), Some(15));
    }

    #[test]
    fn every_cell_has_a_distinct_index() {
        let side = 5;
        let mut seen = [false; 25];
        for y in 0..side {
            for x in 0..side {
                let index = cell_index(side, x, y).unwrap() as usize;
                assert!(!seen[index]);
                seen[index] = true;
            }
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn off_board_coordinates_are_rejected() {
        assert_eq!(cell_index(2, 2, 0), None);
        assert_eq!(cell_index(2, 0, 2), None);
        assert_eq!(cell_index(2, u32::MAX, u32::MAX), None);
    }

    #[test]
    fn painted_only_in_its_own_round() {
        let cell = Cell { color_id: 3, painter: AccountId::from([0x01; 32]), round: 2 };
        assert!(cell.is_painted_in(2));
        assert!(!cell.is_painted_in(3));
    }
}
