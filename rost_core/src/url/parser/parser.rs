use super::lexer::Token;
use crate::error::{PatternError, UnbalancedBrackets};

/// Check that optional group brackets are balanced and properly nested.
///
/// The nesting level starts at 0, goes up on `[` and down on `]`. It must
/// never go negative and must be back at 0 after the last token.
pub fn validate_brackets(tokens: &[Token]) -> Result<(), UnbalancedBrackets> {
    let mut level = 0usize;
    for (at, token) in tokens.iter().enumerate() {
        match token {
            Token::GroupOpen => level += 1,
            Token::GroupClose => {
                level = level
                    .checked_sub(1)
                    .ok_or(UnbalancedBrackets::ClosingWithoutOpening { at })?;
            }
            Token::Literal(_) | Token::Variable(_) => {}
        }
    }
    if level > 0 {
        return Err(UnbalancedBrackets::Unclosed { depth: level });
    }
    Ok(())
}

/// Placeholder names in pattern order. Each name may appear only once.
pub fn variable_names(tokens: &[Token]) -> Result<Vec<String>, PatternError> {
    let mut names: Vec<String> = Vec::new();
    for token in tokens {
        if let Token::Variable(name) = token {
            if names.contains(name) {
                return Err(PatternError::DuplicateVariable(name.clone()));
            }
            names.push(name.clone());
        }
    }
    Ok(names)
}

/// Translate validated tokens into an anchored regex.
///
/// - Literal: escaped, matched verbatim.
/// - Variable: an unnamed capture group of one or more non-`/` characters.
///   The n-th capture group belongs to the n-th variable.
/// - GroupOpen/GroupClose: a non-capturing optional group `(?:...)?`.
///
/// The regex crate runs in linear time, and this grammar cannot produce
/// anything else, so a hostile path cannot make matching blow up.
pub fn build_regex(tokens: &[Token]) -> String {
    let mut regex = String::from("^");
    for token in tokens {
        match token {
            Token::Literal(text) => regex.push_str(&regex::escape(text)),
            Token::Variable(_) => regex.push_str("([^/]+)"),
            Token::GroupOpen => regex.push_str("(?:"),
            Token::GroupClose => regex.push_str(")?"),
        }
    }
    regex.push('$');
    regex
}

/// Index of the `]` closing the innermost group that is open at `from`.
///
/// Scans forward from `from` (inclusive) skipping over nested groups.
/// Returns `tokens.len()` if there is no such bracket, which cannot happen
/// for tokens accepted by [`validate_brackets`].
pub(crate) fn group_end(tokens: &[Token], from: usize) -> usize {
    let mut depth = 0usize;
    for (index, token) in tokens.iter().enumerate().skip(from) {
        match token {
            Token::GroupOpen => depth += 1,
            Token::GroupClose if depth == 0 => return index,
            Token::GroupClose => depth -= 1,
            Token::Literal(_) | Token::Variable(_) => {}
        }
    }
    tokens.len()
}
