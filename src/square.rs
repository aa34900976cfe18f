use crate::color::Color;
use std::fmt;

/// Represent a square on the chess board as a `(row, col)` pair.
///
/// Row 0 is White's back rank and column 0 is the a-file.  A `Square` may point off the board
/// (for example, the result of stepping past an edge, or a bad request from a front end); use
/// `is_valid` before trusting it.  Every operation on the `Board` rejects invalid squares.
///
/// ```
/// use chess_rules::Square;
///
/// let e2 = Square::new(1, 4);
/// assert!(e2.is_valid());
/// assert_eq!(e2.to_string(), "e2");
/// assert!(!Square::new(8, 0).is_valid());
/// ```
#[derive(PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Default, Debug, Hash)]
pub struct Square {
    row: i8,
    col: i8,
}

/// How many squares are there?
pub const NUM_SQUARES: usize = 64;

const fn all_squares() -> [Square; NUM_SQUARES] {
    let mut result = [Square { row: 0, col: 0 }; NUM_SQUARES];
    let mut i = 0;
    while i < NUM_SQUARES {
        result[i] = Square {
            row: (i / 8) as i8,
            col: (i % 8) as i8,
        };
        i += 1;
    }
    result
}

/// A list of every square on the chessboard, row by row starting from White's back rank.
pub const ALL_SQUARES: [Square; NUM_SQUARES] = all_squares();

impl Square {
    /// Make a square given a row and a column.
    /// Note: It is allowed to pass in coordinates outside of `[0, 7]`.  The result is simply not
    /// a valid square.
    #[inline]
    pub const fn new(row: i8, col: i8) -> Square {
        Square { row, col }
    }

    /// Return the row of this square.
    #[inline]
    pub fn get_row(&self) -> i8 {
        self.row
    }

    /// Return the column of this square.
    #[inline]
    pub fn get_col(&self) -> i8 {
        self.col
    }

    /// Does this square lie on the board?
    #[inline]
    pub fn is_valid(&self) -> bool {
        0 <= self.row && self.row <= 7 && 0 <= self.col && self.col <= 7
    }

    /// Shift this square by a number of rows and columns.  The result may be off the board.
    #[inline]
    pub fn offset(&self, rows: i8, cols: i8) -> Square {
        Square::new(self.row.saturating_add(rows), self.col.saturating_add(cols))
    }

    /// Go one square "forward", given my `Color`.  The result may be off the board.
    #[inline]
    pub fn forward(&self, color: Color) -> Square {
        self.offset(color.pawn_direction(), 0)
    }

    /// Convert this `Square` to a `usize` for table lookup purposes, if it is on the board.
    #[inline]
    pub fn to_index(&self) -> Option<usize> {
        if self.is_valid() {
            Some((self.row as usize) * 8 + self.col as usize)
        } else {
            None
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_valid() {
            write!(
                f,
                "{}{}",
                (b'a' + self.col as u8) as char,
                (b'1' + self.row as u8) as char
            )
        } else {
            write!(f, "({}, {})", self.row, self.col)
        }
    }
}

#[test]
fn all_squares_are_valid_and_distinct() {
    for (i, sq) in ALL_SQUARES.iter().enumerate() {
        assert!(sq.is_valid());
        assert_eq!(sq.to_index(), Some(i));
    }
}

#[test]
fn off_board_squares() {
    assert!(!Square::new(-1, 0).is_valid());
    assert!(!Square::new(0, 8).is_valid());
    assert_eq!(Square::new(7, 7).offset(1, 0).to_index(), None);
    assert_eq!(Square::new(0, -1).to_string(), "(0, -1)");
}

#[test]
fn forward_depends_on_color() {
    let e4 = Square::new(3, 4);
    assert_eq!(e4.forward(Color::White), Square::new(4, 4));
    assert_eq!(e4.forward(Color::Black), Square::new(2, 4));
    assert_eq!(Square::new(7, 0).forward(Color::White).to_index(), None);
}
