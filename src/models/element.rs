use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::is_empty_or_whitespace;

/// One parsed screenplay element. The variant set is fixed by the Fountain
/// grammar; consumers match exhaustively on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Element {
    /// Outline section, `#` to `###`. Text keeps the raw remainder after the
    /// markers.
    Section { text: String, depth: u8 },
    SceneHeading {
        text: String,
        scene_number: Option<String>,
        forced: bool,
    },
    Action {
        text: String,
        forced: bool,
        centered: bool,
    },
    /// A character cue. `raw` is the cue line as written (minus any CONT'D
    /// marker), `name` the decoded name without extension or `^`.
    Character {
        raw: String,
        name: String,
        extension: Option<String>,
        dual: bool,
    },
    Parenthesis { text: String },
    Dialogue { text: String },
    Lyric { text: String },
    Transition { text: String, forced: bool },
    PageBreak,
    Synopsis { text: String },
    /// `/* ... */` comment block, markers kept verbatim.
    Boneyard { text: String },
    /// `[[ ... ]]` note block. The leading `[[` is stripped, the closing `]]`
    /// is kept.
    Notes { text: String },
    /// Title-page entry; lives in the document's header list.
    TitleEntry { key: String, text: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Section,
    SceneHeading,
    Action,
    Character,
    Parenthesis,
    Dialogue,
    Lyric,
    Transition,
    PageBreak,
    Synopsis,
    Boneyard,
    Notes,
    TitleEntry,
}

impl Element {
    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Section { .. } => ElementKind::Section,
            Element::SceneHeading { .. } => ElementKind::SceneHeading,
            Element::Action { .. } => ElementKind::Action,
            Element::Character { .. } => ElementKind::Character,
            Element::Parenthesis { .. } => ElementKind::Parenthesis,
            Element::Dialogue { .. } => ElementKind::Dialogue,
            Element::Lyric { .. } => ElementKind::Lyric,
            Element::Transition { .. } => ElementKind::Transition,
            Element::PageBreak => ElementKind::PageBreak,
            Element::Synopsis { .. } => ElementKind::Synopsis,
            Element::Boneyard { .. } => ElementKind::Boneyard,
            Element::Notes { .. } => ElementKind::Notes,
            Element::TitleEntry { .. } => ElementKind::TitleEntry,
        }
    }

    /// Accumulated text, lines joined by `\n`. Character cues expose their
    /// raw cue line; page breaks have no text.
    pub fn text(&self) -> &str {
        match self {
            Element::Section { text, .. }
            | Element::SceneHeading { text, .. }
            | Element::Action { text, .. }
            | Element::Parenthesis { text }
            | Element::Dialogue { text }
            | Element::Lyric { text }
            | Element::Transition { text, .. }
            | Element::Synopsis { text }
            | Element::Boneyard { text }
            | Element::Notes { text }
            | Element::TitleEntry { text, .. } => text,
            Element::Character { raw, .. } => raw,
            Element::PageBreak => "",
        }
    }

    /// Appends a further raw line to a multi-line element. Only the kinds
    /// that accumulate (Action, Dialogue, Boneyard, Notes, TitleEntry) are
    /// affected; appends to anything else are ignored.
    pub fn append_line(&mut self, line: &str) {
        match self {
            Element::Action { text, .. }
            | Element::Dialogue { text }
            | Element::Boneyard { text }
            | Element::Notes { text }
            | Element::TitleEntry { text, .. } => {
                text.push('\n');
                text.push_str(line);
            }
            _ => {}
        }
    }

    /// True when the element carries no visible text.
    pub fn is_blank(&self) -> bool {
        is_empty_or_whitespace(self.text())
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementKind::Section => "section",
            ElementKind::SceneHeading => "scene_heading",
            ElementKind::Action => "action",
            ElementKind::Character => "character",
            ElementKind::Parenthesis => "parenthesis",
            ElementKind::Dialogue => "dialogue",
            ElementKind::Lyric => "lyric",
            ElementKind::Transition => "transition",
            ElementKind::PageBreak => "page_break",
            ElementKind::Synopsis => "synopsis",
            ElementKind::Boneyard => "boneyard",
            ElementKind::Notes => "notes",
            ElementKind::TitleEntry => "title_entry",
        };
        write!(f, "{}", name)
    }
}
