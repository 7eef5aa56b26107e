use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A translation tree for one language.
///
/// Leaves are strings; inner nodes are ordered sequences or keyed maps. JSON
/// objects, arrays and strings map onto the three variants directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TranslationTree {
    Text(String),
    List(Vec<TranslationTree>),
    Map(BTreeMap<String, TranslationTree>),
}

impl TranslationTree {
    pub fn from_json(input: &str) -> serde_json::Result<Self> {
        serde_json::from_str(input)
    }

    /// Resolve a key path such as `have-milk.count.0` or `menu["file.open"]`.
    ///
    /// A top-level key that matches the whole path is preferred over splitting
    /// it, so keys containing dots stay reachable.
    pub fn lookup(&self, path: &str) -> Option<&TranslationTree> {
        if path.is_empty() {
            return None;
        }
        if let TranslationTree::Map(map) = self {
            if let Some(found) = map.get(path) {
                return Some(found);
            }
        }

        parse_path(path)
            .iter()
            .try_fold(self, |node, segment| node.child(segment))
    }

    fn child(&self, segment: &str) -> Option<&TranslationTree> {
        match self {
            TranslationTree::Map(map) => map.get(segment),
            TranslationTree::List(items) => segment
                .parse::<usize>()
                .ok()
                .and_then(|index| items.get(index)),
            TranslationTree::Text(_) => None,
        }
    }

    /// Empty text counts as "nothing there"; sequences and maps never do.
    pub fn is_truthy(&self) -> bool {
        match self {
            TranslationTree::Text(text) => !text.is_empty(),
            TranslationTree::List(_) | TranslationTree::Map(_) => true,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            TranslationTree::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[TranslationTree]> {
        match self {
            TranslationTree::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, TranslationTree>> {
        match self {
            TranslationTree::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Flatten into displayable text. Sequences render their items back to
    /// back; a map has no textual form.
    pub fn render_text(&self) -> Option<String> {
        match self {
            TranslationTree::Text(text) => Some(text.clone()),
            TranslationTree::List(items) => items
                .iter()
                .map(TranslationTree::render_text)
                .collect::<Option<Vec<_>>>()
                .map(|parts| parts.concat()),
            TranslationTree::Map(_) => None,
        }
    }
}

impl From<&str> for TranslationTree {
    fn from(text: &str) -> Self {
        TranslationTree::Text(text.to_string())
    }
}

impl From<String> for TranslationTree {
    fn from(text: String) -> Self {
        TranslationTree::Text(text)
    }
}

/// Split a path into segments: `a.b[0]["c.d"]` becomes `a`, `b`, `0`, `c.d`.
fn parse_path(path: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = path.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '.' => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            }
            '[' => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
                let mut key = String::new();
                match chars.peek().copied() {
                    Some(quote @ ('"' | '\'')) => {
                        chars.next();
                        while let Some(c) = chars.next() {
                            match c {
                                '\\' => {
                                    if let Some(escaped) = chars.next() {
                                        key.push(escaped);
                                    }
                                }
                                c if c == quote => break,
                                c => key.push(c),
                            }
                        }
                        for c in chars.by_ref() {
                            if c == ']' {
                                break;
                            }
                        }
                    }
                    _ => {
                        for c in chars.by_ref() {
                            if c == ']' {
                                break;
                            }
                            key.push(c);
                        }
                    }
                }
                segments.push(key);
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}
