//! Prefix/symbol decomposition of the current text.

use crate::text::TextState;

/// The derived render split of the current text: everything except the last
/// character, plus the last character (or empty for empty text).
///
/// `DisplayParams` is recomputed on every render and compared by value to
/// decide whether the symbol transition replays. Because the prefix is part
/// of the value, repeated identical characters at different positions still
/// produce distinct keys.
///
/// Invariant: `prefix + symbol == text` for non-empty text; both fields are
/// empty otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DisplayParams {
    pub prefix: String,
    pub symbol: String,
}

impl DisplayParams {
    /// Splits `text` into the static prefix and the animated last symbol.
    pub fn decompose(text: &str) -> Self {
        match text.chars().next_back() {
            Some(last) => Self {
                prefix: text[..text.len() - last.len_utf8()].to_string(),
                symbol: last.to_string(),
            },
            None => Self::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.symbol.is_empty()
    }
}

impl From<&TextState> for DisplayParams {
    fn from(state: &TextState) -> Self {
        Self::decompose(state.text())
    }
}
