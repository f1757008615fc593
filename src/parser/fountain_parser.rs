//! The line-by-line Fountain classification engine.
//!
//! One parser instance owns all scan state: the current and previous line,
//! title-page and dialogue flags, speculative ("pending") elements awaiting
//! the next line, buffered blank action lines, and any open boneyard/notes
//! block. Lines are fed one at a time; `finalize` resolves whatever is still
//! open as if a trailing blank line followed the input.

use crate::models::{Conf, Element, ElementKind, FountainScript};
use crate::utils::{is_empty_or_whitespace, strip_cont_marker, FOUNTAIN_REGEX};

/// Decoded pieces of a character cue line. Derived on the fly, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterInfo {
    pub name: String,
    pub extension: Option<String>,
    pub dual: bool,
}

/// A speculative classification held until the next line settles it.
#[derive(Debug, Clone)]
enum Pending {
    Character { element: Element, backup: Element },
    Transition { element: Element, backup: Element },
}

pub struct FountainParser {
    script: FountainScript,
    conf: Conf,
    line: String,
    line_trim: String,
    last_line: String,
    last_line_empty: bool,
    in_title_page: bool,
    multi_line_header: bool,
    in_dialogue: bool,
    pending: Vec<Pending>,
    pad_actions: Vec<String>,
    boneyard: Option<String>,
    notes: Option<String>,
}

impl FountainParser {
    pub fn new() -> Self {
        Self::with_conf(Conf::default())
    }

    pub fn with_conf(conf: Conf) -> Self {
        FountainParser {
            script: FountainScript::new(),
            conf,
            line: String::new(),
            line_trim: String::new(),
            last_line: String::new(),
            last_line_empty: true,
            in_title_page: true,
            multi_line_header: false,
            in_dialogue: false,
            pending: Vec::new(),
            pad_actions: Vec::new(),
            boneyard: None,
            notes: None,
        }
    }

    /// Parses a whole block of text and finalizes. Lines are split on `\n`;
    /// a `\r` before the break and a trailing terminator are not part of any
    /// line.
    pub fn add_text(&mut self, input_text: &str) {
        self.add_lines(input_text.lines());
    }

    /// Feeds a pre-split sequence of lines and finalizes.
    pub fn add_lines<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.add_line(line.as_ref());
        }
        self.finalize();
    }

    /// Feeds a single line. Streaming callers must call [`finalize`] after
    /// the last line.
    ///
    /// [`finalize`]: FountainParser::finalize
    pub fn add_line(&mut self, input_line: &str) {
        self.last_line = std::mem::take(&mut self.line);
        self.last_line_empty = is_empty_or_whitespace(&self.last_line);
        self.line = input_line.to_string();
        self.line_trim = self.line.trim().to_string();

        // open blocks absorb lines before anything else looks at them
        if self.parse_boneyard() || self.parse_notes() {
            return;
        }

        if !self.pending.is_empty() {
            self.parse_pending();
        }

        if self.in_title_page && self.parse_title_page() {
            return;
        }

        if self.parse_section()
            || self.parse_forced_action()
            || self.parse_forced_scene_heading()
            || self.parse_forced_character()
            || self.parse_forced_transition()
            || self.parse_page_break()
            || self.parse_lyrics()
            || self.parse_synopsis()
            || self.parse_centered_text()
            || self.parse_scene_heading()
            || self.parse_transition()
            || self.parse_parenthesis()
            || self.parse_character()
            || self.parse_dialogue()
        {
            return;
        }

        self.parse_action();
    }

    /// Resolves end-of-input state as if one more empty line followed:
    /// outstanding pending elements fall back or commit, and an open
    /// boneyard/notes block is committed with whatever it has accumulated.
    /// Idempotent.
    pub fn finalize(&mut self) {
        self.line.clear();
        self.line_trim.clear();
        self.parse_pending();
        if let Some(text) = self.boneyard.take() {
            self.script.add_element(Element::Boneyard { text });
        }
        if let Some(text) = self.notes.take() {
            self.script.add_element(Element::Notes { text });
        }
    }

    pub fn script(&self) -> &FountainScript {
        &self.script
    }

    /// Finalizes and hands the document to the caller.
    pub fn into_script(mut self) -> FountainScript {
        self.finalize();
        self.script
    }

    fn parse_pending(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let next_is_blank = self.line_trim.is_empty();
        for item in std::mem::take(&mut self.pending) {
            match item {
                // a transition holds only when followed by a blank line
                Pending::Transition { element, backup } => {
                    if next_is_blank {
                        self.add_element(element);
                    } else {
                        self.add_element(backup);
                    }
                }
                // a character cue holds only when dialogue actually follows
                Pending::Character { element, backup } => {
                    if next_is_blank {
                        self.add_element(backup);
                    } else {
                        self.add_element(element);
                    }
                }
            }
        }
    }

    fn parse_boneyard(&mut self) -> bool {
        if let Some(text) = self.boneyard.as_mut() {
            text.push('\n');
            text.push_str(&self.line_trim);
            // the close marker counts only on lines after the opening one
            if self.line_trim.contains("*/") {
                if let Some(text) = self.boneyard.take() {
                    self.script.add_element(Element::Boneyard { text });
                }
            }
            return true;
        }
        if self.line_trim.starts_with("/*") {
            self.boneyard = Some(self.line_trim.clone());
            return true;
        }
        false
    }

    fn parse_notes(&mut self) -> bool {
        if let Some(text) = self.notes.as_mut() {
            text.push('\n');
            text.push_str(&self.line_trim);
            if self.line_trim.contains("]]") {
                if let Some(text) = self.notes.take() {
                    self.script.add_element(Element::Notes { text });
                }
            }
            return true;
        }
        // a one-line [[note]] is not a block, it falls through to the rules
        if self.line_trim.starts_with("[[") && !self.line_trim.contains("]]") {
            self.notes = Some(self.line_trim[2..].to_string());
            return true;
        }
        false
    }

    fn parse_title_page(&mut self) -> bool {
        let entry = FOUNTAIN_REGEX["title_entry"]
            .captures(&self.line)
            .map(|caps| (caps[1].to_string(), caps[2].to_string()));
        if let Some((key, value)) = entry {
            self.multi_line_header = value.is_empty();
            self.script.add_header(Element::TitleEntry { key, text: value });
            return true;
        }

        if self.multi_line_header && FOUNTAIN_REGEX["title_multiline"].is_match(&self.line) {
            if let Some(header) = self.script.headers.last_mut() {
                header.append_line(&self.line);
            }
            return true;
        }

        // first line that is neither pattern ends the title page for good
        self.in_title_page = false;
        false
    }

    fn parse_section(&mut self) -> bool {
        for (marker, depth) in [("###", 3u8), ("##", 2), ("#", 1)] {
            if self.line_trim.starts_with(marker) {
                let text = self.line_trim[marker.len()..].to_string();
                self.add_element(Element::Section { text, depth });
                return true;
            }
        }
        false
    }

    fn parse_forced_action(&mut self) -> bool {
        if let Some(rest) = self.line_trim.strip_prefix('!') {
            let element = Element::Action {
                text: rest.to_string(),
                forced: true,
                centered: false,
            };
            self.add_element(element);
            return true;
        }
        false
    }

    fn parse_forced_scene_heading(&mut self) -> bool {
        if FOUNTAIN_REGEX["scene_heading_force"].is_match(&self.line_trim) {
            let (text, scene_number) = decode_heading(&self.line_trim[1..]);
            self.add_element(Element::SceneHeading {
                text,
                scene_number,
                forced: true,
            });
            return true;
        }
        false
    }

    fn parse_forced_character(&mut self) -> bool {
        if let Some(rest) = self.line_trim.strip_prefix('@') {
            // raw keeps a CONT'D marker here; only the decode strips it
            let raw = rest.trim().to_string();
            if let Some(info) = decode_character(&raw) {
                let element = Element::Character {
                    raw,
                    name: info.name,
                    extension: info.extension,
                    dual: info.dual,
                };
                self.add_element(element);
                return true;
            }
        }
        false
    }

    fn parse_forced_transition(&mut self) -> bool {
        if self.line_trim.starts_with('>') && !self.line_trim.ends_with('<') {
            let text = self.line_trim[1..].trim().to_string();
            self.add_element(Element::Transition { text, forced: true });
            return true;
        }
        false
    }

    fn parse_page_break(&mut self) -> bool {
        if self.line_trim.contains("===") {
            self.add_element(Element::PageBreak);
            return true;
        }
        false
    }

    fn parse_lyrics(&mut self) -> bool {
        if let Some(rest) = self.line_trim.strip_prefix('~') {
            let text = rest.trim().to_string();
            self.add_element(Element::Lyric { text });
            return true;
        }
        false
    }

    fn parse_synopsis(&mut self) -> bool {
        if let Some(rest) = self.line_trim.strip_prefix('=') {
            if !rest.starts_with('=') {
                let text = rest.strip_prefix(' ').unwrap_or(rest).to_string();
                self.add_element(Element::Synopsis { text });
                return true;
            }
        }
        false
    }

    fn parse_centered_text(&mut self) -> bool {
        if self.line_trim.starts_with('>') && self.line_trim.ends_with('<') {
            // interior is kept as written, not re-trimmed
            let text = self.line_trim[1..self.line_trim.len() - 1].to_string();
            self.add_element(Element::Action {
                text,
                forced: false,
                centered: true,
            });
            return true;
        }
        false
    }

    fn parse_scene_heading(&mut self) -> bool {
        if FOUNTAIN_REGEX["scene_heading"].is_match(&self.line_trim) {
            let (text, scene_number) = decode_heading(&self.line_trim);
            self.add_element(Element::SceneHeading {
                text,
                scene_number,
                forced: false,
            });
            return true;
        }
        false
    }

    fn parse_transition(&mut self) -> bool {
        if self.last_line_empty && FOUNTAIN_REGEX["transition"].is_match(&self.line_trim) {
            let element = Element::Transition {
                text: self.line_trim.clone(),
                forced: false,
            };
            let backup = Element::Action {
                text: self.line_trim.clone(),
                forced: false,
                centered: false,
            };
            self.pending.push(Pending::Transition { element, backup });
            return true;
        }
        false
    }

    fn parse_parenthesis(&mut self) -> bool {
        let text = match FOUNTAIN_REGEX["parenthesis"].captures(&self.line) {
            Some(caps) => caps[1].to_string(),
            None => return false,
        };
        let last_kind = self.script.last_element().map(Element::kind);
        if self.in_dialogue
            && matches!(
                last_kind,
                Some(ElementKind::Character | ElementKind::Dialogue)
            )
        {
            self.add_element(Element::Parenthesis { text });
            return true;
        }
        false
    }

    fn parse_character(&mut self) -> bool {
        if !self.last_line_empty {
            return false;
        }
        let no_cont = strip_cont_marker(&self.line_trim);
        if !FOUNTAIN_REGEX["character"].is_match(&no_cont) {
            return false;
        }
        if let Some(info) = decode_character(&no_cont) {
            let element = Element::Character {
                raw: no_cont,
                name: info.name,
                extension: info.extension,
                dual: info.dual,
            };
            let backup = Element::Action {
                text: self.line_trim.clone(),
                forced: false,
                centered: false,
            };
            self.pending.push(Pending::Character { element, backup });
            return true;
        }
        false
    }

    fn parse_dialogue(&mut self) -> bool {
        let last_kind = match self.script.last_element() {
            Some(element) => element.kind(),
            None => return false,
        };

        if !self.line.is_empty()
            && matches!(last_kind, ElementKind::Character | ElementKind::Parenthesis)
        {
            let text = self.line_trim.clone();
            self.add_element(Element::Dialogue { text });
            return true;
        }

        if last_kind == ElementKind::Dialogue {
            // A whitespace-only separator (the two-space convention)
            // continues the block; a truly empty line has already ended it.
            if self.last_line_empty && !self.last_line.is_empty() {
                if self.conf.merge_dialogue {
                    if let Some(element) = self.script.last_element_mut() {
                        element.append_line("");
                        element.append_line(&self.line_trim);
                    }
                } else {
                    self.add_element(Element::Dialogue { text: String::new() });
                    let text = self.line_trim.clone();
                    self.add_element(Element::Dialogue { text });
                }
                return true;
            }

            if !self.last_line_empty && !self.line_trim.is_empty() {
                if self.conf.merge_dialogue {
                    if let Some(element) = self.script.last_element_mut() {
                        element.append_line(&self.line_trim);
                    }
                } else {
                    let text = self.line_trim.clone();
                    self.add_element(Element::Dialogue { text });
                }
                return true;
            }
        }

        false
    }

    fn parse_action(&mut self) {
        self.add_element(Element::Action {
            text: self.line.clone(),
            forced: false,
            centered: false,
        });
    }

    /// Commit policy: blank-action padding, action merging, dialogue-context
    /// tracking. All decisions use the last element as it stood before this
    /// call, even after pads have been flushed into the document.
    fn add_element(&mut self, element: Element) {
        let last_index = self.script.elements.len().checked_sub(1);
        let last_kind = self.script.last_element().map(Element::kind);
        let last_uncentered_action = matches!(
            self.script.last_element(),
            Some(Element::Action { centered: false, .. })
        );

        if let Element::Action {
            text,
            centered: false,
            ..
        } = &element
        {
            if is_empty_or_whitespace(text) {
                self.in_dialogue = false;
                if last_kind == Some(ElementKind::Action) {
                    self.pad_actions.push(text.clone());
                }
                return;
            }
        }

        let incoming_action = matches!(element, Element::Action { .. });
        if incoming_action && !self.pad_actions.is_empty() {
            if self.conf.merge_actions && last_uncentered_action {
                if let Some(index) = last_index {
                    for pad in &self.pad_actions {
                        self.script.elements[index].append_line(pad);
                    }
                }
            } else {
                for pad in std::mem::take(&mut self.pad_actions) {
                    self.script.add_element(Element::Action {
                        text: pad,
                        forced: false,
                        centered: false,
                    });
                }
            }
        }
        self.pad_actions.clear();

        if self.conf.merge_actions && last_uncentered_action {
            if let (Some(index), Element::Action { text, centered: false, .. }) =
                (last_index, &element)
            {
                self.script.elements[index].append_line(text);
                return;
            }
        }

        self.in_dialogue = matches!(
            element.kind(),
            ElementKind::Character | ElementKind::Parenthesis | ElementKind::Dialogue
        );
        self.script.add_element(element);
    }
}

impl Default for FountainParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Splits an optional trailing ` #number#` marker off a scene heading line.
pub fn decode_heading(line: &str) -> (String, Option<String>) {
    match FOUNTAIN_REGEX["scene_number"].captures(line) {
        Some(caps) => {
            let text = caps.get(1).map_or("", |m| m.as_str()).to_string();
            let scene_number = caps.get(2).map(|m| m.as_str().to_string());
            (text, scene_number)
        }
        None => (line.to_string(), None),
    }
}

/// Breaks a character cue into name, optional extension and dual-dialogue
/// marker. Returns `None` when no name part is present (for example a line
/// opening with `(`).
pub fn decode_character(line: &str) -> Option<CharacterInfo> {
    let stripped = strip_cont_marker(line);
    let caps = FOUNTAIN_REGEX["character_decode"].captures(&stripped)?;
    let name = caps[1].to_string();
    let extension = caps.get(2).map(|m| m.as_str().to_string());
    let dual = stripped.ends_with('^');
    Some(CharacterInfo {
        name,
        extension,
        dual,
    })
}
