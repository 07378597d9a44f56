pub mod debug;
pub mod error;
pub mod router;
pub mod url;

pub use error::{AssembleError, DefinitionError, PatternError, UnbalancedBrackets};
pub use router::builder::{Builder, RouteDefinition, RouteKind, RoutesConfig};
pub use router::{Route, RouteMatch, Router};
pub use url::{Parameters, PatternRoute, Token};

// Used by the debug macros so callers don't need their own `tracing` dependency.
#[doc(hidden)]
pub use tracing as __tracing;
