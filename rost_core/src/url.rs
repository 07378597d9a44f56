pub mod parameters;
pub mod parser;
pub mod pattern;

pub use self::parameters::Parameters;
pub use self::parser::lexer::Token;
pub use self::pattern::PatternRoute;
