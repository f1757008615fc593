pub mod fountain_writer;

pub use fountain_writer::{generate_fountain, write_fountain_file, WriterError, WriterResult};
