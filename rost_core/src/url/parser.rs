use regex::Regex;

use crate::error::PatternError;

pub mod lexer;
pub mod parser;

use self::lexer::Token;

// # `compile` – Turn a route pattern string into tokens plus a matcher

// Pipeline:
// - Lex: lexer::tokenize splits the pattern into Literal / Variable /
//   GroupOpen / GroupClose tokens and rejects malformed placeholders.
// - Validate: parser::validate_brackets checks nesting over the whole token
//   sequence before anything is compiled.
// - Names: parser::variable_names collects placeholder names in order and
//   rejects duplicates.
// - Compile: parser::build_regex produces an anchored regex with one capture
//   group per placeholder, which is compiled once here.

// Input grammar (summary):
// - "{name}" is a placeholder; name is [A-Za-z0-9]+. It matches one or more
//   characters other than "/".
// - "[ ... ]" is an optional group. Groups may nest and may hold literals,
//   placeholders, or other groups.
// - Everything else is literal text.

// Examples:
// - "/users[/{action}][/{id}]"
//   - tokens: Literal("/users"), GroupOpen, Literal("/"), Variable("action"),
//     GroupClose, GroupOpen, Literal("/"), Variable("id"), GroupClose
//   - regex:  ^/users(?:/([^/]+))?(?:/([^/]+))?$
//   - names:  ["action", "id"]
// - "/files/{name}.{ext}"
//   - regex:  ^/files/([^/]+)\.([^/]+)$

// Error cases:
// - "/a[/b"        -> UnbalancedBrackets(Unclosed { depth: 1 })
// - "/a]"          -> UnbalancedBrackets(ClosingWithoutOpening { at: 1 })
// - "/{user_id}"   -> MalformedVariable { at: 1 }
// - "/{id}/{id}"   -> DuplicateVariable("id")

/// A pattern that passed every compile step.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pub tokens: Vec<Token>,
    pub variables: Vec<String>,
    pub regex: Regex,
}

pub fn compile<T: AsRef<str>>(input: T) -> Result<CompiledPattern, PatternError> {
    let tokens = lexer::tokenize(input.as_ref())?;
    parser::validate_brackets(&tokens)?;
    let variables = parser::variable_names(&tokens)?;
    let regex = Regex::new(&parser::build_regex(&tokens))?;
    Ok(CompiledPattern {
        tokens,
        variables,
        regex,
    })
}
