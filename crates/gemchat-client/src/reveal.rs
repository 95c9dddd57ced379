// crates/gemchat-client/src/reveal.rs
// Cosmetic word-by-word reveal of an already complete reply

/// Delay between revealed tokens
pub const REVEAL_INTERVAL_MS: u32 = 30;

/// Steps through a reply one space-delimited token at a time.
///
/// Splits on single `' '` only. Runs of spaces produce empty tokens and
/// newlines stay inside their token; the final markdown render replaces
/// the raw text anyway.
#[derive(Debug, Clone)]
pub struct RevealSchedule {
    tokens: Vec<String>,
    shown: usize,
    visible: String,
}

impl RevealSchedule {
    pub fn new(text: &str) -> Self {
        Self {
            tokens: text.split(' ').map(str::to_string).collect(),
            shown: 0,
            visible: String::new(),
        }
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn revealed(&self) -> usize {
        self.shown
    }

    pub fn is_finished(&self) -> bool {
        self.shown >= self.tokens.len()
    }

    /// Text visible so far
    pub fn visible(&self) -> &str {
        &self.visible
    }

    /// Reveal the next token. Returns `false` once nothing is left.
    pub fn advance(&mut self) -> bool {
        let Some(token) = self.tokens.get(self.shown) else {
            return false;
        };
        if self.shown > 0 {
            self.visible.push(' ');
        }
        self.visible.push_str(token);
        self.shown += 1;
        true
    }
}
