pub mod piece_type;

mod movegen;
pub use self::movegen::*;
