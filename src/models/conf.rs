use serde::{Deserialize, Serialize};

/// Parser configuration. Both switches are read once at parser construction
/// and stay fixed for the whole pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conf {
    /// Coalesce adjacent action lines into one multi-line Action element.
    pub merge_actions: bool,
    /// Coalesce dialogue continuation lines into one Dialogue element.
    pub merge_dialogue: bool,
}

impl Default for Conf {
    fn default() -> Self {
        Conf {
            merge_actions: true,
            merge_dialogue: true,
        }
    }
}
