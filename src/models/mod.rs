pub mod conf;
pub mod element;
pub mod script;

pub use conf::Conf;
pub use element::{Element, ElementKind};
pub use script::FountainScript;
