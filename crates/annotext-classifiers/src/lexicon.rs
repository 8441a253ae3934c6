//! Dictionary-driven tokenizer
//!
//! A small stand-in for a statistical segmenter: forward maximum matching
//! over a word → tag dictionary. The dictionary uses the jieba line format
//! `word [freq] tag`.

use aho_corasick::{AhoCorasick, MatchKind};
use annotext_core::{Error, PosTag, RawToken, Result, Tokenizer};
use std::path::Path;
use tracing::info;

const BUILTIN_DICTIONARY: &str = "\
张三 nr
李四 nr
王五 nr
北京 ns
上海 ns
广州 ns
深圳 ns
中国 ns
北京大学 nt
清华大学 nt
人民银行 nt
今天 t
明天 t
昨天 t
去了 v
喜欢 v
举行 v
天气 n
公司 n
会议 n
比赛 n
很 d
非常 d
好 a
美丽 a
开心 a
糟糕 a
精彩 a
";

pub struct LexiconTokenizer {
    name: String,
    matcher: Option<AhoCorasick>,
    tags: Vec<PosTag>,
}

impl LexiconTokenizer {
    /// Build from `(word, tag)` pairs
    pub fn new(entries: Vec<(String, PosTag)>) -> Result<Self> {
        let entries: Vec<(String, PosTag)> =
            entries.into_iter().filter(|(w, _)| !w.is_empty()).collect();

        let matcher = if entries.is_empty() {
            None
        } else {
            Some(
                AhoCorasick::builder()
                    .match_kind(MatchKind::LeftmostLongest)
                    .build(entries.iter().map(|(w, _)| w.as_str()))
                    .map_err(|e| {
                        Error::config(format!("Failed to build tokenizer dictionary: {}", e))
                    })?,
            )
        };

        Ok(Self {
            name: "lexicon".to_string(),
            matcher,
            tags: entries.into_iter().map(|(_, tag)| tag).collect(),
        })
    }

    /// Parse dictionary text. Blank lines and `#` comments are ignored.
    pub fn from_dictionary(content: &str) -> Result<Self> {
        let mut entries = Vec::new();

        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = line.split_whitespace().collect();
            let (word, tag) = match fields.as_slice() {
                [word, tag] => (*word, *tag),
                [word, _freq, tag] => (*word, *tag),
                _ => {
                    return Err(Error::config(format!(
                        "dictionary line {}: expected 'word [freq] tag'",
                        line_no + 1
                    )))
                }
            };
            entries.push((word.to_string(), PosTag::from(tag)));
        }

        Self::new(entries)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let tokenizer = Self::from_dictionary(&content)?;
        info!(
            "Loaded tokenizer dictionary {:?} with {} words",
            path,
            tokenizer.len()
        );
        Ok(tokenizer)
    }

    /// Tokenizer over the small built-in dictionary
    pub fn builtin() -> Result<Self> {
        Self::from_dictionary(BUILTIN_DICTIONARY)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Split text outside dictionary words: ASCII alphanumeric runs stay
    /// together, whitespace is dropped, everything else is one char per token.
    fn push_unmatched(segment: &str, out: &mut Vec<RawToken>) {
        let mut run = String::new();

        for ch in segment.chars() {
            if ch.is_ascii_alphanumeric() {
                run.push(ch);
                continue;
            }
            Self::flush_run(&mut run, out);

            if ch.is_whitespace() {
                continue;
            }
            let tag = if ch.is_alphanumeric() {
                PosTag::Other("un".to_string())
            } else {
                PosTag::Punctuation
            };
            out.push((ch.to_string(), tag));
        }
        Self::flush_run(&mut run, out);
    }

    fn flush_run(run: &mut String, out: &mut Vec<RawToken>) {
        if run.is_empty() {
            return;
        }
        let tag = if run.chars().all(|c| c.is_ascii_digit()) {
            "m"
        } else {
            "eng"
        };
        out.push((std::mem::take(run), PosTag::from(tag)));
    }
}

impl Tokenizer for LexiconTokenizer {
    fn tokenize(&self, text: &str) -> Vec<RawToken> {
        let mut out = Vec::new();
        let Some(matcher) = &self.matcher else {
            Self::push_unmatched(text, &mut out);
            return out;
        };

        let mut last = 0;
        for m in matcher.find_iter(text) {
            Self::push_unmatched(&text[last..m.start()], &mut out);
            out.push((
                text[m.start()..m.end()].to_string(),
                self.tags[m.pattern().as_usize()].clone(),
            ));
            last = m.end();
        }
        Self::push_unmatched(&text[last..], &mut out);

        out
    }

    fn name(&self) -> &str {
        &self.name
    }
}
