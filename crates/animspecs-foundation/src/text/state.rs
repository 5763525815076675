//! Host-owned text state as a pure reducer.

/// Input events mutating the text. All events are total: removing from an
/// empty state is a no-op, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEvent {
    Append(char),
    RemoveLast,
}

/// Immutable snapshot of the full current string.
///
/// The host keeps one of these in observable state and replaces it through
/// [`TextState::apply`]; the widget only ever sees a snapshot per render.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct TextState {
    text: String,
}

impl TextState {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Produces the successor state for an event. Pure: `self` is untouched.
    pub fn apply(&self, event: TextEvent) -> TextState {
        match event {
            TextEvent::Append(symbol) => {
                let mut text = self.text.clone();
                text.push(symbol);
                TextState { text }
            }
            TextEvent::RemoveLast => {
                let mut text = self.text.clone();
                text.pop();
                TextState { text }
            }
        }
    }
}

impl From<&str> for TextState {
    fn from(text: &str) -> Self {
        TextState::new(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_pushes_one_symbol() {
        let state = TextState::new("ab").apply(TextEvent::Append('c'));
        assert_eq!(state.text(), "abc");
    }

    #[test]
    fn remove_last_pops_one_symbol() {
        let state = TextState::new("abc").apply(TextEvent::RemoveLast);
        assert_eq!(state.text(), "ab");
    }

    #[test]
    fn remove_last_on_empty_is_noop() {
        let state = TextState::default().apply(TextEvent::RemoveLast);
        assert!(state.is_empty());
    }

    #[test]
    fn apply_leaves_original_untouched() {
        let state = TextState::new("a");
        let _next = state.apply(TextEvent::Append('b'));
        assert_eq!(state.text(), "a");
    }

    #[test]
    fn remove_last_handles_multibyte_symbols() {
        let state = TextState::new("aé").apply(TextEvent::RemoveLast);
        assert_eq!(state.text(), "a");
    }
}
