//! Hero banner typing effect.

use std::time::Duration;

pub const TYPE_DELAY: Duration = Duration::from_millis(90);
pub const HOLD_DELAY: Duration = Duration::from_millis(1800);
pub const DELETE_DELAY: Duration = Duration::from_millis(45);
pub const NEXT_PHRASE_DELAY: Duration = Duration::from_millis(400);

pub fn default_phrases() -> Vec<String> {
    [
        "whoami",
        "cat skills.json",
        "git log --oneline",
        "ls -la ~/projects",
        "node server.js",
        "docker build -t portfolio .",
        "ssh user@distributed.system",
        "kubectl get pods --all-namespaces",
    ]
    .iter()
    .map(|s| (*s).to_string())
    .collect()
}

/// Types a phrase out, holds, deletes it, then moves to the next one.
#[derive(Debug, Clone)]
pub struct TypingBanner {
    phrases: Vec<String>,
    phrase: usize,
    chars: usize,
    deleting: bool,
}

impl TypingBanner {
    pub fn new(phrases: Vec<String>) -> Self {
        Self {
            phrases,
            phrase: 0,
            chars: 0,
            deleting: false,
        }
    }

    /// Currently visible prefix of the active phrase.
    pub fn text(&self) -> &str {
        let Some(phrase) = self.phrases.get(self.phrase) else {
            return "";
        };
        match phrase.char_indices().nth(self.chars) {
            Some((byte, _)) => &phrase[..byte],
            None => phrase,
        }
    }

    pub fn phrase_index(&self) -> usize {
        self.phrase
    }

    /// Advance one keystroke and return the delay before the next one.
    pub fn step(&mut self) -> Duration {
        if self.phrases.is_empty() {
            return NEXT_PHRASE_DELAY;
        }
        let len = self.phrases[self.phrase].chars().count();
        if !self.deleting {
            if len == 0 {
                self.advance_phrase();
                return NEXT_PHRASE_DELAY;
            }
            self.chars += 1;
            if self.chars >= len {
                self.deleting = true;
                return HOLD_DELAY;
            }
            TYPE_DELAY
        } else {
            self.chars = self.chars.saturating_sub(1);
            if self.chars == 0 {
                self.advance_phrase();
                return NEXT_PHRASE_DELAY;
            }
            DELETE_DELAY
        }
    }

    fn advance_phrase(&mut self) {
        self.deleting = false;
        self.chars = 0;
        self.phrase = (self.phrase + 1) % self.phrases.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn types_holds_deletes_and_wraps() {
        let mut banner = TypingBanner::new(vec!["ab".into(), "c".into()]);
        assert_eq!(banner.text(), "");

        assert_eq!(banner.step(), TYPE_DELAY);
        assert_eq!(banner.text(), "a");
        assert_eq!(banner.step(), HOLD_DELAY);
        assert_eq!(banner.text(), "ab");
        assert_eq!(banner.step(), DELETE_DELAY);
        assert_eq!(banner.text(), "a");
        assert_eq!(banner.step(), NEXT_PHRASE_DELAY);
        assert_eq!(banner.text(), "");
        assert_eq!(banner.phrase_index(), 1);

        assert_eq!(banner.step(), HOLD_DELAY);
        assert_eq!(banner.text(), "c");
        assert_eq!(banner.step(), NEXT_PHRASE_DELAY);
        assert_eq!(banner.phrase_index(), 0);
    }

    #[test]
    fn multibyte_phrases_slice_on_char_boundaries() {
        let mut banner = TypingBanner::new(vec!["héllo".into()]);
        banner.step();
        banner.step();
        assert_eq!(banner.text(), "hé");
    }

    #[test]
    fn empty_phrase_list_is_inert() {
        let mut banner = TypingBanner::new(Vec::new());
        assert_eq!(banner.step(), NEXT_PHRASE_DELAY);
        assert_eq!(banner.text(), "");
    }

    #[test]
    fn default_phrases_start_with_whoami() {
        assert_eq!(default_phrases()[0], "whoami");
    }
}
