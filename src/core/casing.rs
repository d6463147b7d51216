//! Key casing for presented output
//!
//! Converts attribute names between snake_case, camelCase and StudlyCase.
//! Every conversion is idempotent: applying it to an already converted key
//! returns the key unchanged.

use serde::{Deserialize, Serialize};

/// Casing mode applied to every key of a presenter's output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Casing {
    /// `created_at`
    #[default]
    #[serde(alias = "snake_case")]
    Snake,

    /// `createdAt`
    #[serde(alias = "camelCase", alias = "camel_case")]
    Camel,
}

impl Casing {
    /// Rename a single key according to this mode
    ///
    /// # Examples
    ///
    /// ```
    /// use present::core::casing::Casing;
    ///
    /// assert_eq!(Casing::Snake.apply("createdAt"), "created_at");
    /// assert_eq!(Casing::Camel.apply("created_at"), "createdAt");
    /// assert_eq!(Casing::Camel.apply("createdAt"), "createdAt");
    /// ```
    pub fn apply(&self, key: &str) -> String {
        match self {
            Casing::Snake => snake_case(key),
            Casing::Camel => camel_case(key),
        }
    }

    /// Whether this is the snake_case mode
    pub fn is_snake(&self) -> bool {
        matches!(self, Casing::Snake)
    }
}

/// Convert a key to snake_case (`FullName` → `full_name`)
pub fn snake_case(input: &str) -> String {
    let (prefix, words) = split_words(input);
    let body = words
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("_");
    format!("{}{}", prefix, body)
}

/// Convert a key to camelCase (`full_name` → `fullName`)
///
/// Only separators start a new word. Capitals already inside a word are kept,
/// and only the leading uppercase run of the first word is lowered
/// (`HTMLParser` → `htmlParser`), so the output never changes on a second pass.
pub fn camel_case(input: &str) -> String {
    let rest = input.trim_start_matches('_');
    let mut out = String::from(&input[..input.len() - rest.len()]);

    let segments = rest.split(is_separator).filter(|s| !s.is_empty());
    for (i, segment) in segments.enumerate() {
        if i == 0 {
            out.push_str(&lower_leading_run(segment));
        } else {
            out.push_str(&upper_first(segment));
        }
    }
    out
}

/// Convert a key to StudlyCase (`full_name` → `FullName`)
pub fn studly_case(input: &str) -> String {
    let (prefix, words) = split_words(input);
    let mut out = String::from(prefix);
    for word in &words {
        out.push_str(&capitalize(word));
    }
    out
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn upper_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lowercase the uppercase run a word starts with. When a lowercase letter
/// follows a run of several capitals, the last capital opens the next word.
fn lower_leading_run(word: &str) -> String {
    let chars: Vec<char> = word.chars().collect();
    let run = chars.iter().take_while(|c| c.is_uppercase()).count();
    let lowered = if run > 1 && chars.get(run).is_some_and(|c| c.is_lowercase()) {
        run - 1
    } else {
        run
    };

    chars[..lowered]
        .iter()
        .flat_map(|c| c.to_lowercase())
        .chain(chars[lowered..].iter().copied())
        .collect()
}

fn is_separator(c: char) -> bool {
    c == '_' || c == '-' || c.is_whitespace()
}

/// Split a key into its words, returning the leading underscores separately.
///
/// An uppercase letter starts a new word after a lowercase letter or a digit,
/// and ends an acronym when the next letter is lowercase (`HTMLParser`).
fn split_words(input: &str) -> (&str, Vec<String>) {
    let rest = input.trim_start_matches('_');
    let prefix = &input[..input.len() - rest.len()];

    let chars: Vec<char> = rest.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if is_separator(c) {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase()
                || prev.is_numeric()
                || (prev.is_uppercase() && next_is_lower)
            {
                words.push(std::mem::take(&mut current));
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }

    (prefix, words)
}
