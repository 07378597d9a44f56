use std::fmt::Debug;

use fnv::FnvHashMap;

use crate::error::{AssembleError, DefinitionError};
use crate::url::{Parameters, PatternRoute};
use crate::{debug_log, debug_trace};

pub mod builder;

/// A compiled route: matches request paths and assembles URLs.
pub trait Route: Send + Sync + Debug {
    /// Parameters for `path`, or `None` if this route does not apply.
    fn match_path(&self, path: &str) -> Option<Parameters>;

    fn assemble(&self, parameters: &Parameters) -> Result<String, AssembleError>;

    /// The source pattern, for diagnostics.
    fn pattern(&self) -> &str;
}

impl Route for PatternRoute {
    fn match_path(&self, path: &str) -> Option<Parameters> {
        PatternRoute::match_path(self, path)
    }

    fn assemble(&self, parameters: &Parameters) -> Result<String, AssembleError> {
        PatternRoute::assemble(self, parameters)
    }

    fn pattern(&self) -> &str {
        PatternRoute::pattern(self)
    }
}

/// Result of [`Router::match_route`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub name: String,
    pub parameters: Parameters,
}

/// Named routes, matched in registration order.
///
/// Built once at startup and read-only afterwards. Register more specific
/// routes first: the first route that matches wins.
#[derive(Debug, Default)]
pub struct Router {
    routes: Vec<(String, Box<dyn Route>)>,
    index: FnvHashMap<String, usize>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_route<R: Route + 'static>(&mut self, name: impl Into<String>, route: R) -> Result<(), DefinitionError> {
        self.add_boxed_route(name, Box::new(route))
    }

    /// Register `route` under `name`. Names are unique.
    pub fn add_boxed_route(&mut self, name: impl Into<String>, route: Box<dyn Route>) -> Result<(), DefinitionError> {
        let name = name.into();
        if self.index.contains_key(&name) {
            tracing::warn!(route = %name, pattern = route.pattern(), "route name already registered");
            return Err(DefinitionError::DuplicateRouteName(name));
        }
        debug_log!(route = %name, pattern = route.pattern(), "route registered");
        self.index.insert(name.clone(), self.routes.len());
        self.routes.push((name, route));
        Ok(())
    }

    /// Parameters of the first route matching `path`.
    pub fn match_path(&self, path: &str) -> Option<Parameters> {
        self.match_route(path).map(|matched| matched.parameters)
    }

    /// Like [`Router::match_path`], also naming the route that matched.
    pub fn match_route(&self, path: &str) -> Option<RouteMatch> {
        for (name, route) in &self.routes {
            debug_trace!(route = %name, path, "trying route");
            if let Some(parameters) = route.match_path(path) {
                debug_log!(route = %name, path, "route matched");
                return Some(RouteMatch {
                    name: name.clone(),
                    parameters,
                });
            }
        }
        None
    }

    pub fn assemble(&self, name: &str, parameters: &Parameters) -> Result<String, AssembleError> {
        self.route(name)
            .ok_or_else(|| AssembleError::UnknownRouteName(name.to_string()))?
            .assemble(parameters)
    }

    pub fn route(&self, name: &str) -> Option<&dyn Route> {
        self.index.get(name).map(|&at| self.routes[at].1.as_ref())
    }

    /// Route names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{RouteMatch, Router};
    use crate::error::{AssembleError, DefinitionError};
    use crate::url::{Parameters, PatternRoute};

    fn route(pattern: &str) -> PatternRoute {
        PatternRoute::new(pattern).unwrap()
    }

    fn sample() -> Router {
        let mut router = Router::new();
        router.add_route("user", route("/users/{id}")).unwrap();
        router.add_route("any", route("/{controller}[/{action}]")).unwrap();
        router
    }

    #[test]
    fn first_registered_match_wins() {
        let router = sample();
        assert_eq!(
            router.match_route("/users/5"),
            Some(RouteMatch {
                name: "user".to_string(),
                parameters: Parameters::from_iter([("id", "5")]),
            })
        );
        assert_eq!(
            router.match_path("/posts/list"),
            Some(Parameters::from_iter([("controller", "posts"), ("action", "list")]))
        );
    }

    #[test]
    fn registration_order_decides_shadowing() {
        let mut router = Router::new();
        router.add_route("any", route("/{controller}[/{action}]")).unwrap();
        router.add_route("user", route("/users/{id}")).unwrap();
        assert_eq!(router.match_route("/users/5").unwrap().name, "any");
    }

    #[test]
    fn no_match_is_none() {
        assert_eq!(sample().match_path("/a/b/c"), None);
        assert_eq!(Router::new().match_path("/"), None);
    }

    #[test]
    fn assemble_by_name() {
        let router = sample();
        let given = Parameters::new().with("id", 5).with("tab", "posts");
        assert_eq!(router.assemble("user", &given).unwrap(), "/users/5?tab=posts");
    }

    #[test]
    fn unknown_route_name() {
        assert_eq!(
            sample().assemble("nonexistent", &Parameters::new()),
            Err(AssembleError::UnknownRouteName("nonexistent".to_string()))
        );
    }

    #[test]
    fn assembly_errors_propagate() {
        assert_eq!(
            sample().assemble("user", &Parameters::new()),
            Err(AssembleError::MissingRequiredParameter("id".to_string()))
        );
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut router = sample();
        let err = router.add_route("user", route("/people/{id}")).unwrap_err();
        assert!(matches!(err, DefinitionError::DuplicateRouteName(name) if name == "user"));
        // The first registration is untouched.
        assert_eq!(router.route("user").unwrap().pattern(), "/users/{id}");
        assert_eq!(router.len(), 2);
    }

    #[test]
    fn names_keep_registration_order() {
        let router = sample();
        assert_eq!(router.names().collect::<Vec<_>>(), vec!["user", "any"]);
        assert!(!router.is_empty());
    }

    #[test]
    fn router_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Router>();

        let router = std::sync::Arc::new(sample());
        let handles: Vec<_> = (0..4)
            .map(|id| {
                let router = router.clone();
                std::thread::spawn(move || {
                    let path = format!("/users/{}", id);
                    router.match_path(&path).unwrap().get("id").map(str::to_string)
                })
            })
            .collect();
        for (id, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap(), Some(id.to_string()));
        }
    }
}
