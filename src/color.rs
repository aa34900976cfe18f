use std::ops::Not;

/// Represent a color.
#[derive(PartialOrd, Ord, PartialEq, Eq, Copy, Clone, Debug, Hash)]
pub enum Color {
    White,
    Black,
}

/// How many colors are there?
pub const NUM_COLORS: usize = 2;
/// List all colors
pub const ALL_COLORS: [Color; NUM_COLORS] = [Color::White, Color::Black];

impl Color {
    /// Convert the `Color` to a `usize` for table lookups.
    #[inline]
    pub fn to_index(&self) -> usize {
        *self as usize
    }

    /// Convert the `Color` to the row holding that colors pieces at the start of the game.
    #[inline]
    pub fn to_my_backrank(&self) -> i8 {
        match *self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    /// Convert a `Color` to my opponents backrank, which is also the row my pawns promote on.
    #[inline]
    pub fn to_their_backrank(&self) -> i8 {
        match *self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// Convert a `Color` to my second rank, which represents the starting position for my pawns.
    #[inline]
    pub fn to_second_rank(&self) -> i8 {
        match *self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    /// The row a pawn of this color lands on after advancing two squares.
    #[inline]
    pub fn to_fourth_rank(&self) -> i8 {
        match *self {
            Color::White => 3,
            Color::Black => 4,
        }
    }

    /// Which way is "forward" for my pawns?  `1` for White (up the board), `-1` for Black.
    #[inline]
    pub fn pawn_direction(&self) -> i8 {
        match *self {
            Color::White => 1,
            Color::Black => -1,
        }
    }
}

impl Not for Color {
    type Output = Color;

    /// Get the other color.
    #[inline]
    fn not(self) -> Color {
        if self == Color::White {
            Color::Black
        } else {
            Color::White
        }
    }
}

#[test]
fn negation_is_involutive() {
    for color in ALL_COLORS.iter() {
        assert_ne!(!*color, *color);
        assert_eq!(!!*color, *color);
    }
}

#[test]
fn pawn_ranks_mirror_each_other() {
    for color in ALL_COLORS.iter() {
        assert_eq!(color.to_my_backrank(), (!*color).to_their_backrank());
        assert_eq!(
            color.to_second_rank() + 2 * color.pawn_direction(),
            color.to_fourth_rank()
        );
    }
}
