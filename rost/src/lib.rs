pub mod prelude;

pub use rost_core::url::parser::{CompiledPattern, compile};
pub use rost_core::url::{Parameters, PatternRoute, Token};

pub use rost_core::router::builder::{Builder, RouteConstructor, RouteDefinition, RouteKind, RoutesConfig};
pub use rost_core::router::{Route, RouteMatch, Router};

pub use rost_core::error::{AssembleError, DefinitionError, PatternError, UnbalancedBrackets};

pub use rost_core::{debug_log, debug_trace};

pub use rost_core;
pub use rost_lib;
pub use serde_json;
