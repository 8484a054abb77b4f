//! Cross-origin access gate.
//!
//! Two header layers run on every response, in [`HeaderLayer::ORDER`]:
//!
//! 1. `PermissiveFallback`: any origin, methods and headers, no credentials.
//!    Also answers preflight requests.
//! 2. `OriginGrant`: when the caller's `Origin` matches a trusted rule, the
//!    origin is echoed back with credentials allowed, overwriting layer 1.
//!
//! The gate is advisory. Requests from untrusted origins are still served in
//! full; they just do not receive the credentialed grant.

use aura_common::AccessConfig;
use axum::{
    extract::{Request, State},
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS,
            ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN, ORIGIN,
        },
        HeaderMap, HeaderName, HeaderValue,
    },
    middleware::{self, Next},
    response::Response,
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

fn wildcard() -> HeaderValue {
    HeaderValue::from_static("*")
}

/// A trusted-origin test on the raw `Origin` string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OriginRule {
    /// Origin starts with the pattern
    Prefix(String),
    /// Origin ends with the pattern
    Suffix(String),
}

impl OriginRule {
    pub fn matches(&self, origin: &str) -> bool {
        match self {
            OriginRule::Prefix(p) => origin.starts_with(p.as_str()),
            OriginRule::Suffix(s) => origin.ends_with(s.as_str()),
        }
    }
}

/// Request-scoped outcome of the origin check.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AccessDecision {
    pub allowed: bool,
    pub origin_echo: Option<String>,
}

impl AccessDecision {
    /// Headers this decision grants, empty when not allowed.
    pub fn grant_headers(&self) -> Vec<(HeaderName, HeaderValue)> {
        let Some(origin) = self.origin_echo.as_deref() else {
            return Vec::new();
        };
        let Ok(origin) = HeaderValue::from_str(origin) else {
            return Vec::new();
        };

        vec![
            (ACCESS_CONTROL_ALLOW_ORIGIN, origin),
            (ACCESS_CONTROL_ALLOW_CREDENTIALS, HeaderValue::from_static("true")),
            (ACCESS_CONTROL_ALLOW_METHODS, wildcard()),
            (ACCESS_CONTROL_ALLOW_HEADERS, wildcard()),
        ]
    }
}

/// Header layers in application order; a later layer overwrites an earlier one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderLayer {
    PermissiveFallback,
    OriginGrant,
}

impl HeaderLayer {
    pub const ORDER: [HeaderLayer; 2] = [HeaderLayer::PermissiveFallback, HeaderLayer::OriginGrant];
}

/// Trusted-origin policy, shared read-only by every request.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    rules: Arc<[OriginRule]>,
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self::from_config(&AccessConfig::default())
    }
}

impl AccessPolicy {
    pub fn new(rules: Vec<OriginRule>) -> Self {
        Self {
            rules: rules.into(),
        }
    }

    pub fn from_config(config: &AccessConfig) -> Self {
        let prefixes = config.origin_prefixes.iter().cloned().map(OriginRule::Prefix);
        let suffixes = config.origin_suffixes.iter().cloned().map(OriginRule::Suffix);
        Self::new(prefixes.chain(suffixes).collect())
    }

    pub fn rules(&self) -> &[OriginRule] {
        &self.rules
    }

    /// Decide whether `origin` receives the credentialed grant.
    pub fn decide(&self, origin: Option<&str>) -> AccessDecision {
        match origin {
            Some(origin) if self.rules.iter().any(|rule| rule.matches(origin)) => AccessDecision {
                allowed: true,
                origin_echo: Some(origin.to_string()),
            },
            _ => AccessDecision::default(),
        }
    }

    /// Decide and write the grant onto `headers`, replacing existing values.
    pub fn apply(&self, origin: Option<&str>, headers: &mut HeaderMap) -> AccessDecision {
        let decision = self.decide(origin);
        for (name, value) in decision.grant_headers() {
            headers.insert(name, value);
        }
        decision
    }

    /// Wrap `router` with both header layers in [`HeaderLayer::ORDER`].
    ///
    /// Layers added later sit further out and touch the response last.
    pub fn layer(self, router: Router) -> Router {
        HeaderLayer::ORDER
            .into_iter()
            .fold(router, |router, layer| match layer {
                HeaderLayer::PermissiveFallback => router.layer(fallback_cors()),
                HeaderLayer::OriginGrant => router.layer(middleware::from_fn_with_state(
                    self.clone(),
                    access_gate,
                )),
            })
    }
}

/// Catch-all policy: any origin, not credentialed.
pub fn fallback_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Middleware applying the origin grant to the finished response.
pub async fn access_gate(
    State(policy): State<AccessPolicy>,
    request: Request,
    next: Next,
) -> Response {
    let origin = request
        .headers()
        .get(ORIGIN)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string);

    let mut response = next.run(request).await;
    let decision = policy.apply(origin.as_deref(), response.headers_mut());

    tracing::debug!(
        origin = origin.as_deref().unwrap_or("-"),
        allowed = decision.allowed,
        "Origin evaluated"
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_localhost_permitted_and_echoed() {
        let decision = AccessPolicy::default().decide(Some("http://localhost:3000"));
        assert!(decision.allowed);
        assert_eq!(decision.origin_echo.as_deref(), Some("http://localhost:3000"));
    }

    #[test]
    fn test_vercel_preview_permitted() {
        let decision = AccessPolicy::default().decide(Some("https://preview123.vercel.app"));
        assert!(decision.allowed);
        assert_eq!(
            decision.origin_echo.as_deref(),
            Some("https://preview123.vercel.app")
        );
    }

    #[test]
    fn test_untrusted_and_absent_origins() {
        let policy = AccessPolicy::default();
        assert_eq!(policy.decide(Some("https://evil.example.com")), AccessDecision::default());
        assert_eq!(policy.decide(None), AccessDecision::default());
        assert_eq!(policy.decide(Some("")), AccessDecision::default());
    }

    #[test]
    fn test_prefix_suffix_not_url_parse() {
        let policy = AccessPolicy::default();
        // Plain string tests, so these widened matches are expected.
        assert!(policy.decide(Some("http://localhost.evil.com")).allowed);
        assert!(policy.decide(Some("http://attacker.vercel.app")).allowed);
        // Scheme matters for the prefix rule.
        assert!(!policy.decide(Some("https://localhost:3000")).allowed);
        assert!(!policy.decide(Some("https://vercel.app.evil.com")).allowed);
    }

    #[test]
    fn test_grant_headers() {
        let headers = AccessPolicy::default()
            .decide(Some("http://localhost:5173"))
            .grant_headers();

        assert_eq!(headers.len(), 4);
        assert_eq!(headers[0], (ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("http://localhost:5173")));
        assert_eq!(headers[1].1, "true");
        assert_eq!(headers[2].1, "*");
        assert_eq!(headers[3].1, "*");

        assert!(AccessDecision::default().grant_headers().is_empty());
    }

    #[test]
    fn test_apply_overwrites_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, wildcard());

        let decision = AccessPolicy::default().apply(Some("http://localhost:3000"), &mut headers);
        assert!(decision.allowed);
        assert_eq!(headers.get_all(ACCESS_CONTROL_ALLOW_ORIGIN).iter().count(), 1);
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_ORIGIN], "http://localhost:3000");
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    }

    #[test]
    fn test_apply_leaves_fallback_for_untrusted() {
        let mut headers = HeaderMap::new();
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, wildcard());

        let decision = AccessPolicy::default().apply(Some("https://evil.example.com"), &mut headers);
        assert!(!decision.allowed);
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert!(headers.get(ACCESS_CONTROL_ALLOW_CREDENTIALS).is_none());
    }

    #[test]
    fn test_layer_order_is_fallback_then_grant() {
        assert_eq!(
            HeaderLayer::ORDER,
            [HeaderLayer::PermissiveFallback, HeaderLayer::OriginGrant]
        );
    }

    #[test]
    fn test_rules_from_config() {
        let policy = AccessPolicy::from_config(&AccessConfig {
            origin_prefixes: vec!["https://app.".into()],
            origin_suffixes: vec![".example.org".into(), ".test".into()],
        });

        assert_eq!(policy.rules().len(), 3);
        assert!(policy.decide(Some("https://app.anything")).allowed);
        assert!(policy.decide(Some("http://x.test")).allowed);
        assert!(!policy.decide(Some("http://localhost:3000")).allowed);
    }
}
