use http::Method;
use regex::Regex;
use smallvec::SmallVec;
use std::sync::Arc;
use tracing::{debug, info};

/// Maximum number of path parameters kept inline before spilling to the heap.
pub const MAX_INLINE_PARAMS: usize = 4;

/// Path parameters in declaration order. Names are shared with the routing
/// table; values are per-request.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// A routing table entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMeta {
    pub method: Method,
    /// Pattern with `{name}` placeholders, e.g. `/v1/movies/{id}`.
    pub path_pattern: String,
    /// Key the dispatcher uses to find the handler.
    pub handler_name: String,
}

impl RouteMeta {
    pub fn new(method: Method, path_pattern: impl Into<String>, handler_name: impl Into<String>) -> Self {
        Self {
            method,
            path_pattern: path_pattern.into(),
            handler_name: handler_name.into(),
        }
    }
}

/// Result of successfully matching a request to a route.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    pub route: Arc<RouteMeta>,
    pub path_params: ParamVec,
}

impl RouteMatch {
    /// Get a path parameter by name. The last occurrence wins when a pattern
    /// repeats a name.
    #[inline]
    #[must_use]
    pub fn get_path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn handler_name(&self) -> &str {
        &self.route.handler_name
    }
}

#[derive(Debug, Clone)]
pub enum RouteOutcome {
    Matched(RouteMatch),
    /// The path is known but not for this method. Carries the methods that
    /// are registered for it, in table order.
    MethodNotAllowed(Vec<Method>),
    /// An `OPTIONS` request for a known path with no `OPTIONS` route of its
    /// own. Carries the registered methods followed by `OPTIONS`.
    Options(Vec<Method>),
    /// The path only differs from a static route for this method by a
    /// trailing slash. Carries that route's pattern.
    RedirectTrailingSlash(Arc<str>),
    NotFound,
}

/// Render methods as an `Allow` header value, e.g. `GET, POST`.
#[must_use]
pub fn allow_value(methods: &[Method]) -> String {
    methods
        .iter()
        .map(Method::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone)]
struct CompiledRoute {
    regex: Regex,
    param_names: Vec<Arc<str>>,
    static_path: Arc<str>,
    meta: Arc<RouteMeta>,
}

/// Regex-backed routing table.
///
/// Lookup is a linear scan over the compiled patterns, which is plenty for a
/// handful of routes.
#[derive(Debug, Clone)]
pub struct Router {
    routes: Vec<CompiledRoute>,
}

impl Router {
    #[must_use]
    pub fn new(routes: Vec<RouteMeta>) -> Self {
        let routes: Vec<CompiledRoute> = routes
            .into_iter()
            .map(|meta| {
                let (regex, param_names) = Self::path_to_regex(&meta.path_pattern);
                CompiledRoute {
                    regex,
                    param_names: param_names.into_iter().map(Arc::from).collect(),
                    static_path: Arc::from(meta.path_pattern.as_str()),
                    meta: Arc::new(meta),
                }
            })
            .collect();

        let routes_summary: Vec<String> = routes
            .iter()
            .map(|r| format!("{} {}", r.meta.method, r.meta.path_pattern))
            .collect();
        info!(
            routes_count = routes.len(),
            routes_summary = ?routes_summary,
            "Routing table loaded"
        );

        Self { routes }
    }

    /// Resolve a request path. `path` must not contain the query string.
    #[must_use]
    pub fn route(&self, method: &Method, path: &str) -> RouteOutcome {
        let mut allowed = Vec::new();

        for route in &self.routes {
            let Some(captures) = route.regex.captures(path) else {
                continue;
            };
            if route.meta.method != *method {
                if !allowed.contains(&route.meta.method) {
                    allowed.push(route.meta.method.clone());
                }
                continue;
            }

            let path_params: ParamVec = route
                .param_names
                .iter()
                .zip(captures.iter().skip(1))
                .filter_map(|(name, cap)| cap.map(|c| (Arc::clone(name), c.as_str().to_owned())))
                .collect();

            debug!(
                method = %method,
                path = %path,
                handler_name = %route.meta.handler_name,
                route_pattern = %route.meta.path_pattern,
                path_params = ?path_params,
                "Route matched"
            );
            return RouteOutcome::Matched(RouteMatch {
                route: Arc::clone(&route.meta),
                path_params,
            });
        }

        if allowed.is_empty() {
            if let Some(location) = self.trailing_slash_target(method, path) {
                debug!(method = %method, path = %path, location = %location, "Redirecting trailing slash");
                return RouteOutcome::RedirectTrailingSlash(location);
            }
            debug!(method = %method, path = %path, "No route matched");
            RouteOutcome::NotFound
        } else if *method == Method::OPTIONS {
            allowed.push(Method::OPTIONS);
            RouteOutcome::Options(allowed)
        } else {
            debug!(method = %method, path = %path, allowed = ?allowed, "Method not allowed");
            RouteOutcome::MethodNotAllowed(allowed)
        }
    }

    /// Only static patterns are redirect targets, so the `Location` value is
    /// always taken from the routing table.
    fn trailing_slash_target(&self, method: &Method, path: &str) -> Option<Arc<str>> {
        let trimmed = path.strip_suffix('/').filter(|p| !p.is_empty())?;
        self.routes
            .iter()
            .find(|r| {
                r.meta.method == *method && r.param_names.is_empty() && r.meta.path_pattern == trimmed
            })
            .map(|r| Arc::clone(&r.static_path))
    }

    /// All registered `(method, pattern)` pairs, in table order.
    #[must_use]
    pub fn routes(&self) -> Vec<(Method, String)> {
        self.routes
            .iter()
            .map(|r| (r.meta.method.clone(), r.meta.path_pattern.clone()))
            .collect()
    }

    /// Convert a path pattern to an anchored regex and its parameter names.
    ///
    /// `/v1/movies/{id}` becomes `^/v1/movies/([^/]+)$` with names `["id"]`.
    /// Literal segments are escaped.
    pub(crate) fn path_to_regex(path: &str) -> (Regex, Vec<String>) {
        if path == "/" {
            return (
                Regex::new(r"^/$").expect("Failed to compile path regex"),
                Vec::new(),
            );
        }

        let mut pattern = String::with_capacity(path.len() + 8);
        pattern.push('^');
        let mut param_names = Vec::with_capacity(path.matches('{').count());

        for segment in path.split('/') {
            if segment.starts_with('{') && segment.ends_with('}') {
                let param_name = segment
                    .trim_start_matches('{')
                    .trim_end_matches('}')
                    .to_string();
                pattern.push_str("/([^/]+)");
                param_names.push(param_name);
            } else if !segment.is_empty() {
                pattern.push('/');
                pattern.push_str(&regex::escape(segment));
            }
        }

        pattern.push('$');
        let regex = Regex::new(&pattern).expect("Failed to compile path regex");

        (regex, param_names)
    }
}
