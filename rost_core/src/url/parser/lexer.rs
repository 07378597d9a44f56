use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::PatternError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    // Text between dynamic parts, kept verbatim.
    Literal(String),
    // `{name}` placeholder, braces stripped.
    Variable(String),
    // "["
    GroupOpen,
    // "]"
    GroupClose,
}

impl Token {
    fn push_literal(pattern: &str, start: usize, end: usize, out: &mut Vec<Token>) -> Result<(), PatternError> {
        if start >= end {
            return Ok(());
        }
        let text = &pattern[start..end];
        // Any brace left over here did not form a valid `{identifier}`.
        if let Some(offset) = text.find(['{', '}']) {
            return Err(PatternError::MalformedVariable { at: start + offset });
        }
        out.push(Token::Literal(text.to_string()));
        Ok(())
    }
}

// Dynamic parts of a pattern: `{identifier}` placeholders and bare brackets.
// Identifiers are restricted to ASCII letters and digits.
static DYNAMIC_PARTS: Lazy<Result<Regex, regex::Error>> =
    Lazy::new(|| Regex::new(r"\{[A-Za-z0-9]+\}|[\[\]]"));

// Tokenize a route pattern into an ordered token sequence.
//
// Notes on behavior:
// - Dynamic parts are found left to right. The text between two dynamic parts
//   (and before the first / after the last) becomes a Literal, only if non-empty.
// - "{name}" becomes Variable("name"). Names are letters and digits only, so
//   "{user_id}" or "{}" are rejected as MalformedVariable rather than silently
//   treated as literal text.
// - "[" and "]" become GroupOpen / GroupClose. Nesting is not checked here;
//   see parser::validate_brackets.
// - The tokens cover the whole pattern with no gaps and no overlaps.
pub fn tokenize(pattern: &str) -> Result<Vec<Token>, PatternError> {
    let scanner = DYNAMIC_PARTS
        .as_ref()
        .map_err(|err| PatternError::Malformed(err.to_string()))?;

    let mut out = Vec::new();
    let mut position = 0usize;

    for part in scanner.find_iter(pattern) {
        Token::push_literal(pattern, position, part.start(), &mut out)?;

        let text = part.as_str();
        let token = match text {
            "[" => Token::GroupOpen,
            "]" => Token::GroupClose,
            _ => Token::Variable(text[1..text.len() - 1].to_string()),
        };
        out.push(token);
        position = part.end();
    }

    Token::push_literal(pattern, position, pattern.len(), &mut out)?;
    Ok(out)
}
