use failure::Fail;

/// Why a request was refused.
///
/// Every refusal leaves the board exactly as it was, so all of these are safe to show to a player
/// and carry on.
#[derive(Debug, Fail, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Error {
    /// A square is off the board
    #[fail(display = "Invalid coordinates: both squares must lie on the board")]
    InvalidCoordinates,

    /// There is nothing on the source square
    #[fail(display = "There is no piece on the source square")]
    NoPieceAtSource,

    /// The piece on the source square belongs to the player who is not on move
    #[fail(display = "It is not that piece's turn to move")]
    WrongSideToMove,

    /// The destination holds a piece of the mover's own color
    #[fail(display = "Cannot capture a piece of your own color")]
    OwnColorAtTarget,

    /// The piece does not move (or capture) that way
    #[fail(display = "That piece cannot move that way")]
    GeometricallyIllegal,

    /// The move would leave the mover's own king attacked
    #[fail(display = "That move would leave your king in check")]
    ExposesOwnKing,

    /// Checkmate or stalemate has already been reached
    #[fail(display = "The game is already over")]
    GameAlreadyOver,

    /// A pawn may only become a queen, rook, bishop or knight
    #[fail(display = "Invalid promotion piece: choose a queen, rook, bishop or knight")]
    InvalidPromotionKind,

    /// A promotion was requested for a move that is not a pawn reaching the last rank
    #[fail(display = "Only a pawn reaching the last rank can promote")]
    NotAPromotion,

    /// A pawn reaching the last rank must say what it becomes
    #[fail(display = "A pawn reaching the last rank must be promoted")]
    PromotionRequired,

    /// The king or the castling rook has already moved
    #[fail(display = "Cannot castle: the king or rook has already moved")]
    CastlingRightsLost,

    /// A piece stands between the king and the castling rook
    #[fail(display = "Cannot castle: a piece stands between the king and the rook")]
    CastlingPathBlocked,

    /// The king would start, pass or land on an attacked square
    #[fail(display = "Cannot castle while the king's path is attacked")]
    CastlingThroughCheck,

    /// The board created from BoardBuilder was found to be invalid
    #[fail(
        display = "The board specified did not pass sanity checks.  Are you sure each side has exactly one king and the side to move cannot capture the opposing king?"
    )]
    InvalidBoard,
}

#[test]
fn errors_explain_themselves() {
    assert_eq!(
        Error::ExposesOwnKing.to_string(),
        "That move would leave your king in check"
    );
    assert_ne!(Error::CastlingPathBlocked, Error::CastlingThroughCheck);
}
