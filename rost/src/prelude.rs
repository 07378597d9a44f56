pub use crate::{Parameters, PatternRoute, Route, RouteMatch, Router};
pub use crate::{Builder, RouteDefinition, RouteKind, RoutesConfig};
pub use crate::{AssembleError, DefinitionError, PatternError};
