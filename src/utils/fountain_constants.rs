use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

lazy_static! {
    /// Line classification patterns. Single-marker checks (`#`, `!`, `~`,
    /// `>`, `===`, `/*`, `[[`) are plain string tests in the parser; only
    /// multi-token shapes live here.
    pub static ref FOUNTAIN_REGEX: HashMap<&'static str, Regex> = {
        let mut map = HashMap::new();
        // title page
        map.insert("title_entry", Regex::new(r"^\s*([A-Za-z0-9 ]+?)\s*:\s*(.*?)\s*$").unwrap());
        map.insert("title_multiline", Regex::new(r"^( {3,}|\t)").unwrap());
        // scene headings
        map.insert("scene_heading", Regex::new(r"(?i)^\s*((INT|EXT|EST|INT\./EXT|INT/EXT|I/E)(\.|\s))|(FADE IN:\s*)").unwrap());
        map.insert("scene_heading_force", Regex::new(r"^\.[a-zA-Z0-9]").unwrap());
        map.insert("scene_number", Regex::new(r"^(.*?)(?:\s*#(.*?)#)?$").unwrap());
        // dialogue machinery
        map.insert("transition", Regex::new(r"^[A-Z\s]+TO:$").unwrap());
        map.insert("parenthesis", Regex::new(r"^\s*\((.*)\)\s*$").unwrap());
        map.insert("character", Regex::new(r"^([A-Z][^a-z]*?)\s*(?:\(.*\))?(?:\s*\^\s*)?$").unwrap());
        map.insert("character_decode", Regex::new(r"^([^\(\^]+?)\s*(?:\((.*)\))?(?:\s*\^\s*)?$").unwrap());
        map
    };
}
