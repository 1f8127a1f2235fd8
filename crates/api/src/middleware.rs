//! Cross-cutting HTTP layers: CORS and request tracing.

use axum::http::HeaderValue;
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use storeroom_infra::config::CorsConfig;

/// CORS policy with credentials allowed.
///
/// With no configured origins, or with `"*"` among them, every origin is
/// admitted by echoing the request's `Origin` back (a literal `*` is not
/// valid alongside credentials). Methods and headers are echoed the same way.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origin = if admits_any_origin(config) {
        AllowOrigin::mirror_request()
    } else {
        let origins = config
            .allowed_origins
            .iter()
            .filter_map(|o| match HeaderValue::from_str(o) {
                Ok(v) => Some(v),
                Err(_) => {
                    tracing::warn!(origin = %o, "ignoring invalid CORS origin");
                    None
                }
            })
            .collect::<Vec<_>>();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

fn admits_any_origin(config: &CorsConfig) -> bool {
    config.allowed_origins.is_empty() || config.allowed_origins.iter().any(|o| o.trim() == "*")
}

pub fn trace_layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origins(list: &[&str]) -> CorsConfig {
        CorsConfig {
            allowed_origins: list.iter().map(|o| o.to_string()).collect(),
        }
    }

    #[test]
    fn empty_or_wildcard_lists_admit_any_origin() {
        assert!(admits_any_origin(&origins(&[])));
        assert!(admits_any_origin(&origins(&["*"])));
        assert!(admits_any_origin(&origins(&["http://a.test", " * "])));
        assert!(!admits_any_origin(&origins(&["http://a.test"])));
    }

    #[test]
    fn wildcard_origin_builds_a_layer() {
        let _ = cors_layer(&origins(&["*"]));
        let _ = cors_layer(&origins(&["http://a.test", "*"]));
    }

    #[test]
    fn invalid_origins_are_skipped() {
        let _ = cors_layer(&origins(&["http://a.test", "bad\norigin"]));
    }
}
