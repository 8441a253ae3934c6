//! Token stream alignment
//!
//! The upstream tokenizer reports `(text, tag)` pairs without offsets. The
//! types here recover a char span for each token by scanning forward through
//! the source text.

use crate::tag::PosTag;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A tokenizer output item: surface text and part-of-speech tag
pub type RawToken = (String, PosTag);

/// External tokenizer collaborator
pub trait Tokenizer: Send + Sync {
    /// Split `text` into an ordered sequence of tagged tokens
    fn tokenize(&self, text: &str) -> Vec<RawToken>;

    /// Get the tokenizer name
    fn name(&self) -> &str;
}

/// Maps char offsets to byte offsets and back for one text
#[derive(Debug, Clone)]
pub struct TextIndex<'a> {
    text: &'a str,
    /// Byte offset of every char, followed by `text.len()`
    offsets: Vec<usize>,
}

impl<'a> TextIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut offsets: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        offsets.push(text.len());
        Self { text, offsets }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Number of chars in the text
    pub fn char_len(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Byte offset of a char offset, clamped to the end of the text
    pub fn byte_of_char(&self, ch: usize) -> usize {
        self.offsets[ch.min(self.char_len())]
    }

    /// Char offset of a byte offset that lies on a char boundary
    pub fn char_of_byte(&self, byte: usize) -> usize {
        self.offsets.partition_point(|&b| b < byte)
    }

    /// Convert a byte range into a char range
    pub fn char_range(&self, byte_start: usize, byte_end: usize) -> (usize, usize) {
        (self.char_of_byte(byte_start), self.char_of_byte(byte_end))
    }

    /// Text covered by the char range `[start, end)`, clamped
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        let from = self.byte_of_char(start);
        let to = self.byte_of_char(end.max(start));
        &self.text[from..to]
    }
}

/// A token with its recovered char span
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Surface text as reported by the tokenizer
    pub text: String,

    /// Part-of-speech tag
    pub tag: PosTag,

    /// Char span in the source text; `None` when the surface text could not
    /// be located from the cursor
    pub span: Option<(usize, usize)>,
}

impl Token {
    pub fn new(text: impl Into<String>, tag: PosTag, span: Option<(usize, usize)>) -> Self {
        Self {
            text: text.into(),
            tag,
            span,
        }
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_aligned(&self) -> bool {
        self.span.is_some()
    }
}

/// Ordered tokens of one annotation run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    /// Run the tokenizer and align its output against `text`
    pub fn from_tokenizer(tokenizer: &dyn Tokenizer, text: &str) -> Self {
        Self::align(text, tokenizer.tokenize(text))
    }

    /// Recover spans for raw tokens.
    ///
    /// Each token is searched for from the cursor onward and the cursor moves
    /// past the match. A token that cannot be found gets no span and the
    /// cursor still advances by its char length so later offsets stay sane.
    pub fn align(text: &str, raw: impl IntoIterator<Item = RawToken>) -> Self {
        let index = TextIndex::new(text);
        let mut cursor = 0usize;
        let mut tokens = Vec::new();

        for (surface, tag) in raw {
            let len = surface.chars().count();
            let from = index.byte_of_char(cursor);

            let span = if surface.is_empty() {
                None
            } else {
                text[from..].find(surface.as_str()).map(|rel| {
                    let start = index.char_of_byte(from + rel);
                    (start, start + len)
                })
            };

            match span {
                Some((_, end)) => cursor = end,
                None => {
                    warn!(
                        token = %surface,
                        cursor,
                        "token not found in source text, emitting without span"
                    );
                    cursor = (cursor + len).min(index.char_len());
                }
            }

            tokens.push(Token::new(surface, tag, span));
        }

        Self { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }

    /// Tokens that carry a span
    pub fn aligned(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(|t| t.is_aligned())
    }

    pub fn misaligned_count(&self) -> usize {
        self.tokens.iter().filter(|t| !t.is_aligned()).count()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }
}

impl IntoIterator for TokenStream {
    type Item = Token;
    type IntoIter = std::vec::IntoIter<Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}
