pub mod models;
pub mod parser;
pub mod utils;
pub mod writer;

pub use models::{Conf, Element, ElementKind, FountainScript};
pub use parser::{decode_character, decode_heading, CharacterInfo, FountainParser};
pub use writer::{generate_fountain, write_fountain_file, WriterError, WriterResult};

/// Parses a whole Fountain document with the default configuration.
pub fn parse(text: &str) -> FountainScript {
    parse_with_conf(text, Conf::default())
}

/// Parses a whole Fountain document with an explicit configuration.
pub fn parse_with_conf(text: &str, conf: Conf) -> FountainScript {
    let mut parser = FountainParser::with_conf(conf);
    parser.add_text(text);
    parser.into_script()
}
