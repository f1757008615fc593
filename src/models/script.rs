use serde::{Deserialize, Serialize};

use super::element::Element;

/// The parsed document: title-page headers followed by the screenplay
/// elements, both in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FountainScript {
    pub headers: Vec<Element>,
    pub elements: Vec<Element>,
}

impl FountainScript {
    pub fn new() -> Self {
        FountainScript::default()
    }

    pub fn add_element(&mut self, element: Element) {
        self.elements.push(element);
    }

    pub fn add_header(&mut self, header: Element) {
        self.headers.push(header);
    }

    pub fn last_element(&self) -> Option<&Element> {
        self.elements.last()
    }

    pub fn last_element_mut(&mut self) -> Option<&mut Element> {
        self.elements.last_mut()
    }

    /// Looks up a title-page value by key, case-insensitive.
    pub fn title_entry(&self, key: &str) -> Option<&str> {
        self.headers.iter().find_map(|header| match header {
            Element::TitleEntry { key: k, text } if k.eq_ignore_ascii_case(key) => {
                Some(text.as_str())
            }
            _ => None,
        })
    }
}
