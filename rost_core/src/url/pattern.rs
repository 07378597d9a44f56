use regex::Regex;
use rost_lib::url_encoding::{decode_path_segment, encode_path_segment, encode_query};

use crate::error::{AssembleError, PatternError};
use crate::url::parameters::Parameters;
use crate::url::parser::lexer::Token;
use crate::url::parser::parser::group_end;
use crate::url::parser::{compile, CompiledPattern};
use crate::debug_trace;

/// A route compiled from a pattern such as `/users[/{action}][/{id}]`.
///
/// Matching and assembly only read the compiled state, so one instance can
/// be shared between any number of request handlers.
#[derive(Debug, Clone)]
pub struct PatternRoute {
    pattern: String,
    tokens: Vec<Token>,
    variables: Vec<String>,
    regex: Regex,
    defaults: Parameters,
}

impl PatternRoute {
    pub fn new<T: Into<String>>(pattern: T) -> Result<Self, PatternError> {
        Self::with_defaults(pattern, Parameters::new())
    }

    pub fn with_defaults<T: Into<String>>(pattern: T, defaults: Parameters) -> Result<Self, PatternError> {
        let pattern = pattern.into();
        let CompiledPattern {
            tokens,
            variables,
            regex,
        } = compile(&pattern)?;
        Ok(Self {
            pattern,
            tokens,
            variables,
            regex,
            defaults,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Placeholder names in pattern order.
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    pub fn defaults(&self) -> &Parameters {
        &self.defaults
    }

    /// Match a request path (relative to the application, without query).
    ///
    /// The whole path must match. Returns the route defaults overlaid with the
    /// decoded placeholder values. Placeholders inside an optional group that
    /// did not match are left out, so their defaults (if any) show through.
    pub fn match_path(&self, path: &str) -> Option<Parameters> {
        let captures = self.regex.captures(path)?;
        let mut matched = self.defaults.clone();
        for (index, name) in self.variables.iter().enumerate() {
            if let Some(value) = captures.get(index + 1) {
                matched.set(name.clone(), decode_path_segment(value.as_str()));
            }
        }
        Some(matched)
    }

    /// Build a URL from `parameters` merged over the route defaults.
    ///
    /// Caller parameters whose names are not placeholders of this pattern are
    /// appended as a query string, in the order given. Defaults never end up
    /// in the query string.
    pub fn assemble(&self, parameters: &Parameters) -> Result<String, AssembleError> {
        let merged = parameters.merged_over(&self.defaults);
        let path = self.build_path(&merged)?;

        let query = encode_query(
            parameters
                .iter()
                .filter(|(name, _)| !self.variables.iter().any(|variable| variable == name)),
        );
        if query.is_empty() {
            Ok(path)
        } else {
            Ok(format!("{}?{}", path, query))
        }
    }

    // Walk the tokens with an explicit cursor, keeping one fragment per open
    // optional group.
    //
    // Rules:
    // - A missing value outside every group is an error.
    // - A missing value inside a group drops that whole group (its innermost
    //   enclosing one). The enclosing group carries on; if it later misses a
    //   value too, it is dropped in turn.
    // - Once a group is dropped, later groups under the same parent are
    //   dropped as well, so a later value can never slide into the position
    //   of an earlier, omitted placeholder when the URL is matched again.
    fn build_path(&self, parameters: &Parameters) -> Result<String, AssembleError> {
        let tokens = &self.tokens;
        let mut fragments = FragmentStack::new();
        let mut cursor = 0usize;

        while cursor < tokens.len() {
            match &tokens[cursor] {
                Token::Literal(text) => fragments.push_str(text),
                Token::Variable(name) => match parameters.get(name) {
                    Some(value) => fragments.push_str(&encode_path_segment(value)),
                    None if fragments.depth() == 0 => {
                        return Err(AssembleError::MissingRequiredParameter(name.clone()));
                    }
                    None => {
                        debug_trace!(pattern = %self.pattern, variable = %name, "dropping optional group");
                        cursor = group_end(tokens, cursor + 1);
                        fragments.abandon();
                    }
                },
                Token::GroupOpen => {
                    if fragments.group_dropped() {
                        cursor = group_end(tokens, cursor + 1);
                    } else {
                        fragments.open();
                    }
                }
                Token::GroupClose => fragments.close(),
            }
            cursor += 1;
        }

        Ok(fragments.finish())
    }
}

#[derive(Debug, Default)]
struct Level {
    fragment: String,
    // A group directly under this level has been dropped.
    dropped: bool,
}

// Path fragments per nesting level. Level 0 always exists.
struct FragmentStack {
    levels: Vec<Level>,
}

impl FragmentStack {
    fn new() -> Self {
        Self {
            levels: vec![Level::default()],
        }
    }

    fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    fn top(&mut self) -> &mut Level {
        let depth = self.depth();
        &mut self.levels[depth]
    }

    fn push_str(&mut self, text: &str) {
        self.top().fragment.push_str(text);
    }

    fn group_dropped(&self) -> bool {
        self.levels[self.depth()].dropped
    }

    fn open(&mut self) {
        self.levels.push(Level::default());
    }

    // Completed group: append it to its parent.
    fn close(&mut self) {
        if self.depth() == 0 {
            return;
        }
        if let Some(inner) = self.levels.pop() {
            self.top().fragment.push_str(&inner.fragment);
        }
    }

    // Dropped group: discard it and remember the drop on its parent.
    fn abandon(&mut self) {
        if self.depth() == 0 {
            return;
        }
        self.levels.pop();
        self.top().dropped = true;
    }

    fn finish(self) -> String {
        self.levels
            .into_iter()
            .next()
            .map(|level| level.fragment)
            .unwrap_or_default()
    }
}
