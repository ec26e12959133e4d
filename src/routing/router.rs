//! Route tables and the per-request routing plan.
//!
//! # Responsibilities
//! - Hold the compiled alias table, rewrite rules, and upstream routes
//! - Produce a routing plan for a request target in one pass
//!
//! # Design Decisions
//! - All tables are compiled once from configuration and immutable after
//!   startup (thread-safe without locks)
//! - Upstream routes are an ordered list; the first prefix match wins
//! - Explicit plan variants rather than implicit middleware call order,
//!   so the short-circuit semantics are testable

use url::Url;

use crate::config::RouterConfig;
use crate::routing::alias::{AliasRedirect, AliasTable};
use crate::routing::matcher::path_has_prefix;
use crate::routing::rewrite::{RewriteRule, Rewriter};

/// A proxy destination matched by path prefix.
///
/// The prefix is not stripped when forwarding: the upstream exposes the
/// same versioned path namespace the client addressed.
#[derive(Debug, Clone)]
pub struct UpstreamRoute {
    /// Route identifier for logging.
    pub name: String,

    /// Path prefix this route claims (segment-boundary match).
    pub path_prefix: String,

    /// Upstream origin requests are forwarded to.
    pub base_url: Url,

    /// Whether protocol-upgrade requests are relayed end-to-end.
    pub supports_websocket: bool,
}

impl UpstreamRoute {
    pub fn new(
        name: impl Into<String>,
        path_prefix: impl Into<String>,
        base_url: Url,
        supports_websocket: bool,
    ) -> Self {
        Self {
            name: name.into(),
            path_prefix: path_prefix.into(),
            base_url,
            supports_websocket,
        }
    }

    /// URI scheme of the upstream origin.
    pub fn scheme(&self) -> &str {
        self.base_url.scheme()
    }

    /// `host[:port]` of the upstream origin. Also becomes the forwarded
    /// `Host` header (origin-changing proxy).
    pub fn authority(&self) -> String {
        let host = self.base_url.host_str().unwrap_or_default();
        match self.base_url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        }
    }

    /// WebSocket URL for a request target, with `http(s)` mapped to
    /// `ws(s)`.
    pub fn websocket_url(&self, path_and_query: &str) -> String {
        let scheme = match self.scheme() {
            "https" => "wss",
            _ => "ws",
        };
        format!("{}://{}{}", scheme, self.authority(), path_and_query)
    }
}

/// Ordered upstream routes with first-match-wins lookup.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<UpstreamRoute>,
}

impl RouteTable {
    pub fn new(routes: Vec<UpstreamRoute>) -> Self {
        Self { routes }
    }

    /// Find the first route whose prefix matches the path. Explicit
    /// `None` rather than a silent default.
    pub fn match_path(&self, path: &str) -> Option<&UpstreamRoute> {
        self.routes
            .iter()
            .find(|route| path_has_prefix(path, &route.path_prefix))
    }
}

/// The routing decision for one request.
#[derive(Debug)]
pub enum RoutePlan<'a> {
    /// A legacy alias matched: answer 307 and stop.
    Redirect { location: &'a str },

    /// Continue with the (possibly rewritten) target: try the static
    /// store, then the matched upstream, then 404.
    Dispatch {
        path_and_query: String,
        upstream: Option<&'a UpstreamRoute>,
    },
}

/// Compiled routing state shared by all requests.
#[derive(Debug, Clone)]
pub struct EdgeRouter {
    aliases: AliasTable,
    rewriter: Rewriter,
    routes: RouteTable,
}

impl EdgeRouter {
    /// Compile the routing tables from configuration.
    ///
    /// The legacy prefixes and aliases are fixed; only the upstream
    /// origins come from the environment.
    pub fn from_config(config: &RouterConfig) -> Result<Self, url::ParseError> {
        let aliases = AliasTable::new(vec![
            AliasRedirect::new("/models", "/v1/models"),
            AliasRedirect::new("/chat/completions", "/v1/chat/completions"),
        ]);

        let rewriter = Rewriter::new(vec![
            RewriteRule::new("/models", "/v1/models"),
            RewriteRule::new("/chat", "/v1/chat"),
        ]);

        // Order matters: the inference prefix is checked first.
        let routes = RouteTable::new(vec![
            UpstreamRoute::new(
                "inference",
                "/v1",
                Url::parse(&config.upstreams.inference_url)?,
                true,
            ),
            UpstreamRoute::new("rag", "/rag", Url::parse(&config.upstreams.rag_url)?, true),
        ]);

        Ok(Self {
            aliases,
            rewriter,
            routes,
        })
    }

    /// Plan the handling of one request target.
    ///
    /// Aliases are matched against the raw, pre-rewrite path: the
    /// rewrite step would otherwise move `/models` into the versioned
    /// namespace before the alias table ever saw it, leaving the
    /// documented redirects unreachable.
    pub fn plan<'a>(&'a self, raw_path_and_query: &str) -> RoutePlan<'a> {
        if let Some(location) = self.aliases.target(raw_path_and_query) {
            return RoutePlan::Redirect { location };
        }

        let path_and_query = self.rewriter.rewrite(raw_path_and_query);
        let upstream = {
            let (path, _query) = crate::routing::matcher::split_path_query(&path_and_query);
            self.routes.match_path(path)
        };

        RoutePlan::Dispatch {
            path_and_query,
            upstream,
        }
    }
}
