pub mod board_parser;
pub mod board_serializer;

pub use board_parser::{ParsedBoard, parse_board};
pub use board_serializer::serialize_board;
