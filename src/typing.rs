//! Per-word typing practice against the active segment text.
//!
//! The text is split into words; punctuation that follows a word is kept
//! with it for display but never has to be typed. Comparison ignores case
//! and, optionally, accents.

use deunicode::deunicode;

/// Punctuation that attaches to the preceding word.
const TRAILING_PUNCTUATION: &[char] = &['.', ',', '!', '?', ';', ':'];

/// One word to type, with the punctuation shown after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub text: String,
    pub punctuation: Option<String>,
}

impl Word {
    /// Length in characters (the input limit for this word).
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_apostrophe(c: char) -> bool {
    c == '\'' || c == '\u{2019}'
}

/// Split subtitle text into words.
///
/// Words are runs of letters, digits and underscores, with inner
/// apostrophes kept ("don't"). Characters from `TRAILING_PUNCTUATION` are
/// appended to the preceding word's punctuation; everything else (quotes,
/// dashes, brackets, leading punctuation) is dropped.
pub fn split_words(text: &str) -> Vec<Word> {
    let chars: Vec<char> = text.chars().collect();
    let mut words: Vec<Word> = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if is_word_char(c) {
            let mut word = String::new();
            while i < chars.len() {
                let c = chars[i];
                let inner_apostrophe = is_apostrophe(c)
                    && !word.is_empty()
                    && chars.get(i + 1).is_some_and(|n| is_word_char(*n));
                if is_word_char(c) || inner_apostrophe {
                    word.push(c);
                    i += 1;
                } else {
                    break;
                }
            }
            words.push(Word {
                text: word,
                punctuation: None,
            });
            continue;
        }

        if TRAILING_PUNCTUATION.contains(&c) {
            if let Some(last) = words.last_mut() {
                last.punctuation.get_or_insert_with(String::new).push(c);
            }
        }
        i += 1;
    }

    words
}

/// Compare a typed word against the expected one.
pub fn words_match(expected: &str, typed: &str, fold_accents: bool) -> bool {
    if typed.is_empty() {
        return false;
    }
    if fold_accents {
        deunicode(expected).to_lowercase() == deunicode(typed).to_lowercase()
    } else {
        expected.to_lowercase() == typed.to_lowercase()
    }
}

/// The learner's progress on one segment text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingAttempt {
    source: String,
    words: Vec<Word>,
    inputs: Vec<String>,
    cursor: usize,
    fold_accents: bool,
}

impl TypingAttempt {
    pub fn new(text: &str, fold_accents: bool) -> Self {
        let words = split_words(text);
        let inputs = vec![String::new(); words.len()];
        Self {
            source: text.to_string(),
            words,
            inputs,
            cursor: 0,
            fold_accents,
        }
    }

    /// Text this attempt was built from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn inputs(&self) -> &[String] {
        &self.inputs
    }

    /// Index of the word receiving input.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Type one character.
    ///
    /// Space moves to the next word. Input stops at the word's length, and
    /// filling a word moves on automatically.
    pub fn push_char(&mut self, c: char) {
        if self.words.is_empty() {
            return;
        }
        if c.is_whitespace() {
            if !self.inputs[self.cursor].is_empty() {
                self.advance();
            }
            return;
        }

        let limit = self.words[self.cursor].char_len();
        let input = &mut self.inputs[self.cursor];
        if input.chars().count() >= limit {
            return;
        }
        input.push(c);
        if input.chars().count() == limit {
            self.advance();
        }
    }

    /// Delete the last character, stepping back into the previous word
    /// when the current one is empty.
    pub fn backspace(&mut self) {
        if self.words.is_empty() {
            return;
        }
        if self.inputs[self.cursor].is_empty() && self.cursor > 0 {
            self.cursor -= 1;
        }
        self.inputs[self.cursor].pop();
    }

    /// Clear all input.
    pub fn reset(&mut self) {
        self.inputs.iter_mut().for_each(String::clear);
        self.cursor = 0;
    }

    pub fn is_correct(&self, index: usize) -> bool {
        match (self.words.get(index), self.inputs.get(index)) {
            (Some(word), Some(input)) => words_match(&word.text, input, self.fold_accents),
            _ => false,
        }
    }

    pub fn correct_count(&self) -> usize {
        (0..self.words.len()).filter(|&i| self.is_correct(i)).count()
    }

    /// Every word typed correctly.
    pub fn is_complete(&self) -> bool {
        !self.words.is_empty() && self.correct_count() == self.words.len()
    }

    fn advance(&mut self) {
        if self.cursor + 1 < self.words.len() {
            self.cursor += 1;
        }
    }
}
