//! Word-boundary tokenizer.
//!
//! Text is cut into maximal runs of alphanumeric characters (words) and
//! maximal runs of everything else (separators). Concatenating the tokens in
//! order gives back the input exactly.

/// One run of a tokenized line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// A maximal run of alphanumeric characters
    Word(&'a str),

    /// A maximal run of non-alphanumeric characters, line breaks included
    Separator(&'a str),
}

impl<'a> Token<'a> {
    /// The text of the token.
    pub fn as_str(&self) -> &'a str {
        match self {
            Token::Word(text) | Token::Separator(text) => text,
        }
    }

    /// Whether this token is a word.
    pub fn is_word(&self) -> bool {
        matches!(self, Token::Word(_))
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric()
}

/// Iterator over the tokens of a string.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.rest.chars().next()?;
        let in_word = is_word_char(first);

        let end = self
            .rest
            .char_indices()
            .find(|&(_, ch)| is_word_char(ch) != in_word)
            .map_or(self.rest.len(), |(idx, _)| idx);

        let (run, rest) = self.rest.split_at(end);
        self.rest = rest;

        Some(if in_word {
            Token::Word(run)
        } else {
            Token::Separator(run)
        })
    }
}

/// Splits `text` into alternating word and separator tokens.
pub fn tokenize(text: &str) -> Tokens<'_> {
    Tokens { rest: text }
}

/// Iterates over the word tokens of `text` only.
pub fn words(text: &str) -> impl Iterator<Item = &str> {
    tokenize(text).filter(Token::is_word).map(|token| token.as_str())
}
