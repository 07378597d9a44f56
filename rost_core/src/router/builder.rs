//! Route construction from configuration.
//!
//! A route table is a list of [`RouteDefinition`]s, usually loaded from
//! JSON:
//!
//! ```json
//! {
//!     "routes": [
//!         {
//!             "name": "users",
//!             "type": "pattern",
//!             "pattern": "/users[/{action}][/{id}]",
//!             "parameters": { "controller": "user", "action": "index" }
//!         }
//!     ]
//! }
//! ```
//!
//! Every definition is compiled when the router is built. The first bad
//! definition aborts construction, so a router never exists half-built.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Route, Router};
use crate::error::DefinitionError;
use crate::url::{Parameters, PatternRoute};

/// Builds a route from its definition.
pub type RouteConstructor = fn(&RouteDefinition) -> Result<Box<dyn Route>, DefinitionError>;

/// Known route types, selected by the `type` tag of a definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    /// `{name}` placeholders and `[...]` optional groups.
    Pattern,
}

impl RouteKind {
    pub const ALL: &'static [RouteKind] = &[RouteKind::Pattern];

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.tag() == tag)
    }

    pub fn tag(self) -> &'static str {
        match self {
            RouteKind::Pattern => "pattern",
        }
    }

    pub fn constructor(self) -> RouteConstructor {
        match self {
            RouteKind::Pattern => build_pattern_route,
        }
    }
}

fn build_pattern_route(definition: &RouteDefinition) -> Result<Box<dyn Route>, DefinitionError> {
    let pattern = definition
        .pattern
        .as_deref()
        .ok_or_else(|| DefinitionError::MissingKey {
            route: definition.name.clone(),
            key: "pattern",
        })?;
    let defaults = definition.default_parameters()?;
    let route = PatternRoute::with_defaults(pattern, defaults).map_err(|source| DefinitionError::Pattern {
        route: definition.name.clone(),
        source,
    })?;
    Ok(Box::new(route))
}

fn default_kind() -> String {
    RouteKind::Pattern.tag().to_string()
}

/// One entry of a route table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteDefinition {
    pub name: String,

    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// Default parameters. Strings, numbers and booleans are accepted;
    /// `null` means no default.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub parameters: Map<String, Value>,
}

impl RouteDefinition {
    /// A `pattern` route with no defaults.
    pub fn pattern<N: Into<String>, P: Into<String>>(name: N, pattern: P) -> Self {
        Self {
            name: name.into(),
            kind: default_kind(),
            pattern: Some(pattern.into()),
            parameters: Map::new(),
        }
    }

    pub fn parameter<K: Into<String>, V: Into<Value>>(mut self, name: K, value: V) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    pub fn default_parameters(&self) -> Result<Parameters, DefinitionError> {
        let mut defaults = Parameters::new();
        for (name, value) in &self.parameters {
            let value = match value {
                Value::Null => continue,
                Value::String(text) => text.clone(),
                Value::Bool(flag) => flag.to_string(),
                Value::Number(number) => number.to_string(),
                Value::Array(_) | Value::Object(_) => {
                    return Err(DefinitionError::InvalidParameterValue {
                        route: self.name.clone(),
                        name: name.clone(),
                    });
                }
            };
            defaults.set(name.clone(), value);
        }
        Ok(defaults)
    }
}

/// A route table, in matching order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoutesConfig {
    #[serde(default)]
    pub routes: Vec<RouteDefinition>,
}

impl RoutesConfig {
    pub fn from_json(json: &str) -> Result<Self, DefinitionError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn build(&self) -> Result<Router, DefinitionError> {
        Builder.create_router(&self.routes)
    }
}

/// Compiles route definitions into routes and routers.
#[derive(Debug, Clone, Copy, Default)]
pub struct Builder;

impl Builder {
    pub fn create_route(&self, definition: &RouteDefinition) -> Result<Box<dyn Route>, DefinitionError> {
        let kind = RouteKind::from_tag(&definition.kind).ok_or_else(|| DefinitionError::UnknownRouteType {
            route: definition.name.clone(),
            kind: definition.kind.clone(),
        })?;
        let route = (kind.constructor())(definition)?;
        tracing::debug!(route = %definition.name, kind = kind.tag(), pattern = route.pattern(), "route compiled");
        Ok(route)
    }

    /// Compile every definition in order and register it under its name.
    pub fn create_router<'a, I>(&self, definitions: I) -> Result<Router, DefinitionError>
    where
        I: IntoIterator<Item = &'a RouteDefinition>,
    {
        let mut router = Router::new();
        for definition in definitions {
            let route = self.create_route(definition)?;
            router.add_boxed_route(definition.name.clone(), route)?;
        }
        tracing::debug!(routes = router.len(), "router built");
        Ok(router)
    }
}

#[cfg(test)]
mod tests {
    use super::{Builder, RouteDefinition, RouteKind, RoutesConfig};
    use crate::error::{DefinitionError, PatternError, UnbalancedBrackets};
    use crate::url::Parameters;
    use serde_json::json;

    const ROUTES: &str = r#"{
        "routes": [
            {
                "name": "users",
                "type": "pattern",
                "pattern": "/users[/{action}][/{id}]",
                "parameters": { "controller": "user", "action": "index" }
            },
            {
                "name": "page",
                "pattern": "/page/{slug}",
                "parameters": { "controller": "page", "cache": true, "ttl": 60, "layout": null }
            }
        ]
    }"#;

    #[test]
    fn kind_tags() {
        assert_eq!(RouteKind::from_tag("pattern"), Some(RouteKind::Pattern));
        assert_eq!(RouteKind::from_tag("literal"), None);
        assert_eq!(RouteKind::Pattern.tag(), "pattern");
    }

    #[test]
    fn router_from_json() {
        let router = RoutesConfig::from_json(ROUTES).unwrap().build().unwrap();
        assert_eq!(router.names().collect::<Vec<_>>(), vec!["users", "page"]);

        let matched = router.match_route("/users/edit/5").unwrap();
        assert_eq!(matched.name, "users");
        assert_eq!(
            matched.parameters,
            Parameters::from_iter([("controller", "user"), ("action", "edit"), ("id", "5")])
        );

        assert_eq!(
            router.match_path("/users").unwrap(),
            Parameters::from_iter([("controller", "user"), ("action", "index")])
        );
    }

    #[test]
    fn scalar_defaults_are_stringified_and_null_skipped() {
        let config = RoutesConfig::from_json(ROUTES).unwrap();
        let defaults = config.routes[1].default_parameters().unwrap();
        assert_eq!(
            defaults,
            Parameters::from_iter([("controller", "page"), ("cache", "true"), ("ttl", "60")])
        );
        assert!(!defaults.has("layout"));
    }

    #[test]
    fn type_defaults_to_pattern() {
        let config = RoutesConfig::from_json(ROUTES).unwrap();
        assert_eq!(config.routes[1].kind, "pattern");
    }

    #[test]
    fn missing_pattern_key() {
        let definition: RouteDefinition = serde_json::from_value(json!({ "name": "broken" })).unwrap();
        let err = Builder.create_route(&definition).unwrap_err();
        assert!(matches!(err, DefinitionError::MissingKey { route, key: "pattern" } if route == "broken"));
    }

    #[test]
    fn unknown_route_type() {
        let definition: RouteDefinition =
            serde_json::from_value(json!({ "name": "home", "type": "literal", "pattern": "/" })).unwrap();
        let err = Builder.create_route(&definition).unwrap_err();
        assert!(matches!(err, DefinitionError::UnknownRouteType { kind, .. } if kind == "literal"));
    }

    #[test]
    fn compound_parameter_values_are_rejected() {
        let definition = RouteDefinition::pattern("tags", "/tags").parameter("list", json!(["a", "b"]));
        let err = Builder.create_route(&definition).unwrap_err();
        assert!(matches!(
            err,
            DefinitionError::InvalidParameterValue { route, name } if route == "tags" && name == "list"
        ));
    }

    #[test]
    fn pattern_errors_name_the_route() {
        let definition = RouteDefinition::pattern("users", "/users[/{id}");
        let err = Builder.create_route(&definition).unwrap_err();
        assert!(matches!(
            err,
            DefinitionError::Pattern {
                ref route,
                source: PatternError::UnbalancedBrackets(UnbalancedBrackets::Unclosed { depth: 1 }),
            } if route == "users"
        ));
        assert!(err.to_string().contains("users"));
    }

    #[test]
    fn first_bad_definition_aborts_the_router() {
        let definitions = vec![
            RouteDefinition::pattern("users", "/users"),
            RouteDefinition::pattern("users", "/people"),
        ];
        let err = Builder.create_router(&definitions).unwrap_err();
        assert!(matches!(err, DefinitionError::DuplicateRouteName(name) if name == "users"));
    }

    #[test]
    fn invalid_json() {
        let err = RoutesConfig::from_json("{ \"routes\": [ { } ] }").unwrap_err();
        assert!(matches!(err, DefinitionError::Json(_)));
    }

    #[test]
    fn builder_helpers_match_parsed_definitions() {
        let built = RouteDefinition::pattern("users", "/users[/{action}][/{id}]")
            .parameter("controller", "user")
            .parameter("action", "index");
        let config = RoutesConfig::from_json(ROUTES).unwrap();
        assert_eq!(built, config.routes[0]);
    }
}
