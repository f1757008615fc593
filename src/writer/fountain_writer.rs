//! Re-serializes a parsed document to Fountain source text.
//!
//! Markers are reconstructed from structure: forced scene headings get their
//! `.` back, centered actions their `>`/`<` pair, and so on. For documents
//! the parser produced from well-formed screenplay text, parsing the writer's
//! output yields a structurally equal document under the same configuration.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::models::{Element, ElementKind, FountainScript};
use crate::utils::FOUNTAIN_REGEX;

#[derive(Error, Debug)]
pub enum WriterError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type WriterResult<T> = Result<T, WriterError>;

/// Renders the whole document back to Fountain source. Title-page entries
/// come first, then the elements, blocks separated by one blank line except
/// within a dialogue run or an action run.
pub fn generate_fountain(script: &FountainScript) -> String {
    let mut out = String::new();

    for header in &script.headers {
        out.push_str(&render_header(header));
        out.push('\n');
    }

    for (index, element) in script.elements.iter().enumerate() {
        if index == 0 {
            if !out.is_empty() {
                out.push('\n');
            }
        } else if continues_block(&script.elements[index - 1], element) {
            out.push('\n');
        } else {
            out.push_str("\n\n");
        }
        out.push_str(&render_element(element));
    }

    if !out.is_empty() {
        out.push('\n');
    }
    out
}

/// Renders the document and writes it to `path`.
pub fn write_fountain_file<P: AsRef<Path>>(
    script: &FountainScript,
    path: P,
) -> WriterResult<()> {
    fs::write(path, generate_fountain(script))?;
    Ok(())
}

/// True when `current` belongs to the same block as `previous` and must be
/// separated by a single newline instead of a blank line: the inside of a
/// dialogue run, or consecutive action elements.
fn continues_block(previous: &Element, current: &Element) -> bool {
    matches!(
        (previous.kind(), current.kind()),
        (
            ElementKind::Character,
            ElementKind::Dialogue | ElementKind::Parenthesis
        ) | (ElementKind::Parenthesis, ElementKind::Dialogue)
            | (
                ElementKind::Dialogue,
                ElementKind::Dialogue | ElementKind::Parenthesis
            )
            | (ElementKind::Action, ElementKind::Action)
    )
}

fn render_header(header: &Element) -> String {
    match header {
        Element::TitleEntry { key, text } => {
            if text.is_empty() {
                format!("{}:", key)
            } else if text.starts_with('\n') {
                // a multi-line value already carries its raw indented lines
                format!("{}:{}", key, text)
            } else {
                format!("{}: {}", key, text)
            }
        }
        other => other.text().to_string(),
    }
}

fn render_element(element: &Element) -> String {
    match element {
        Element::Section { text, depth } => {
            format!("{}{}", "#".repeat(usize::from(*depth)), text)
        }
        Element::Synopsis { text } => {
            if text.is_empty() {
                "=".to_string()
            } else {
                format!("= {}", text)
            }
        }
        Element::Lyric { text } => format!("~ {}", text),
        Element::PageBreak => "===".to_string(),
        Element::SceneHeading {
            text,
            scene_number,
            forced,
        } => {
            let mut line = String::new();
            if *forced {
                line.push('.');
            }
            line.push_str(text);
            if let Some(number) = scene_number {
                line.push_str(" #");
                line.push_str(number);
                line.push('#');
            }
            line
        }
        Element::Transition { text, forced } => {
            if *forced {
                format!("> {}", text)
            } else {
                text.clone()
            }
        }
        Element::Action {
            text, forced: true, ..
        } => format!("!{}", text),
        Element::Action {
            text,
            centered: true,
            ..
        } => format!(">{}<", text),
        Element::Action { text, .. } => text.clone(),
        Element::Character { raw, .. } => {
            // a cue the unforced grammar would not re-recognize needs its
            // forced marker back
            if FOUNTAIN_REGEX["character"].is_match(raw) {
                raw.clone()
            } else {
                format!("@{}", raw)
            }
        }
        Element::Parenthesis { text } => format!("({})", text),
        Element::Dialogue { text } => text
            .split('\n')
            .map(|line| if line.is_empty() { "  " } else { line })
            .collect::<Vec<_>>()
            .join("\n"),
        Element::Boneyard { text } => text.clone(),
        Element::Notes { text } => format!("[[{}", text),
        Element::TitleEntry { .. } => render_header(element),
    }
}
