pub mod fountain_parser;

pub use fountain_parser::FountainParser;
pub use fountain_parser::CharacterInfo;
pub use fountain_parser::{decode_character, decode_heading};
