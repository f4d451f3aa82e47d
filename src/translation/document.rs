/*!
 * Tagged document exchanged with the translation provider.
 *
 * All sentences of a pass travel in one markup document so the provider sees
 * them in context:
 *
 * ```text
 * <?xml version="1.0" encoding="UTF-8"?>
 * <subtitles>
 * <subtitle id='1'>First sentence.</subtitle>
 * <subtitle id='4'>Second sentence, spanning cues 4 to 6.</subtitle>
 * </subtitles>
 * ```
 *
 * Each `id` is the index of the first cue of the sentence. The provider is
 * expected to return the same structure with translated element text.
 */

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::DocumentError;
use super::sentences::{normalize_whitespace, SentenceUnit};

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const ROOT_OPEN: &str = "<subtitles>";
const ROOT_CLOSE: &str = "</subtitles>";

/// One `<subtitle>` element; either a self-closing tag or a text element
static ENTRY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)<subtitle\s+id\s*=\s*["'](\d+)["']\s*(?:/>|>(.*?)</subtitle\s*>)"#)
        .expect("entry regex is valid")
});

static DECLARATION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*<\?xml[^>]*\?>").expect("declaration regex is valid")
});

static COMMENT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<!--.*?-->").expect("comment regex is valid")
});

/// Inline child element tag (`<b>`, `</i>`, `<br/>`, `<x:y attr='1'>`)
static INLINE_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"</?[A-Za-z_][\w:.-]*(?:\s[^<>]*?)?/?>").expect("inline tag regex is valid")
});

/// A single identified text entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentEntry {
    /// First cue index of the originating sentence
    pub id: usize,

    /// Plain (unescaped) text
    pub text: String,
}

/// Ordered batch of identified entries
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaggedDocument {
    pub entries: Vec<DocumentEntry>,
}

impl TaggedDocument {
    /// Build the request document, one entry per sentence, keyed by first cue index
    pub fn from_sentences(sentences: &[SentenceUnit]) -> Self {
        let entries = sentences
            .iter()
            .filter_map(|sentence| {
                sentence.id().map(|id| DocumentEntry {
                    id,
                    text: normalize_whitespace(&sentence.text),
                })
            })
            .collect();

        Self { entries }
    }

    /// Append an entry
    pub fn push(&mut self, id: usize, text: impl Into<String>) {
        self.entries.push(DocumentEntry { id, text: text.into() });
    }

    /// Text of the entry with this id, if present
    pub fn get(&self, id: usize) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.text.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total characters of entry text, the unit providers bill by
    pub fn char_count(&self) -> usize {
        self.entries.iter().map(|entry| entry.text.chars().count()).sum()
    }

    /// Render as markup, escaping reserved characters in entry text
    pub fn to_markup(&self) -> String {
        let mut parts = Vec::with_capacity(self.entries.len() + 3);
        parts.push(XML_DECLARATION.to_string());
        parts.push(ROOT_OPEN.to_string());

        for entry in &self.entries {
            let text = escape_markup(&normalize_whitespace(&entry.text));
            parts.push(format!("<subtitle id='{}'>{}</subtitle>", entry.id, text));
        }

        parts.push(ROOT_CLOSE.to_string());
        parts.join("\n")
    }

    /// Parse a markup document back into entries.
    ///
    /// Comments are ignored anywhere. Inline child elements inside an entry
    /// are dropped and their text kept, so `Hola <b>mundo</b>` reads as
    /// `Hola mundo`. Anything outside the expected `<subtitles>`/`<subtitle id=..>`
    /// shape, nested `<subtitle>` elements, unknown entities and repeated ids
    /// are rejected.
    pub fn parse(markup: &str) -> Result<Self, DocumentError> {
        let body = DECLARATION_REGEX.replace(markup, "");
        let body = COMMENT_REGEX.replace_all(&body, "");
        let body = body.trim();

        let inner = body
            .strip_prefix(ROOT_OPEN)
            .ok_or_else(|| DocumentError::new("missing <subtitles> root element"))?
            .strip_suffix(ROOT_CLOSE)
            .ok_or_else(|| DocumentError::new("missing closing </subtitles> tag"))?;

        let mut entries = Vec::new();
        let mut seen = HashSet::new();
        let mut cursor = 0;

        for caps in ENTRY_REGEX.captures_iter(inner) {
            let whole = caps.get(0).ok_or_else(|| DocumentError::new("empty match"))?;
            check_gap(&inner[cursor..whole.start()])?;
            cursor = whole.end();

            let id: usize = caps[1]
                .parse()
                .map_err(|_| DocumentError::new(format!("invalid id '{}'", &caps[1])))?;
            if !seen.insert(id) {
                return Err(DocumentError::new(format!("duplicate id {}", id)));
            }

            let raw = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            entries.push(DocumentEntry {
                id,
                text: entry_text(id, raw)?,
            });
        }

        check_gap(&inner[cursor..])?;

        Ok(Self { entries })
    }
}

/// Element text with inline child tags flattened and entities resolved
fn entry_text(id: usize, raw: &str) -> Result<String, DocumentError> {
    if !raw.contains('<') {
        return unescape_markup(raw);
    }

    if raw.contains("<subtitle") {
        return Err(DocumentError::new(format!("nested <subtitle> inside entry {}", id)));
    }

    // Empty elements such as <br/> separate words; paired tags do not
    let flattened = INLINE_TAG_REGEX.replace_all(raw, |caps: &regex::Captures<'_>| {
        if caps[0].ends_with("/>") { " " } else { "" }
    });
    if flattened.contains('<') {
        return Err(DocumentError::new(format!("unexpected markup inside entry {}", id)));
    }

    Ok(normalize_whitespace(&unescape_markup(&flattened)?))
}

fn check_gap(gap: &str) -> Result<(), DocumentError> {
    let gap = gap.trim();
    if gap.is_empty() {
        Ok(())
    } else {
        let preview: String = gap.chars().take(40).collect();
        Err(DocumentError::new(format!("unexpected content '{}'", preview)))
    }
}

/// Replace the five reserved markup characters with entities
pub fn escape_markup(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Resolve named and numeric entities
pub fn unescape_markup(text: &str) -> Result<String, DocumentError> {
    let mut result = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        result.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        let semi = after
            .find(';')
            .ok_or_else(|| DocumentError::new("unterminated entity"))?;
        let name = &after[..semi];

        let resolved = match name {
            "amp" => '&',
            "lt" => '<',
            "gt" => '>',
            "quot" => '"',
            "apos" => '\'',
            _ => numeric_entity(name)
                .ok_or_else(|| DocumentError::new(format!("unknown entity '&{};'", name)))?,
        };
        result.push(resolved);
        rest = &after[semi + 1..];
    }

    result.push_str(rest);
    Ok(result)
}

fn numeric_entity(name: &str) -> Option<char> {
    let digits = name.strip_prefix('#')?;
    let code = match digits.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => digits.parse().ok()?,
    };
    char::from_u32(code)
}
