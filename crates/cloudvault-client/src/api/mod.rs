//! Endpoint wrappers, grouped the way the API groups its routes.
//!
//! Each wrapper is an `impl ApiClient` block so callers only ever hold one
//! client value.

pub mod auth;
pub mod public;
pub mod shares;

/// Build an endpoint path from raw segments, percent-encoding each one.
///
/// Public ids and download tokens are opaque, so they are never spliced
/// into a path unescaped.
pub fn endpoint(segments: &[&str]) -> String {
    let Ok(mut url) = reqwest::Url::parse("http://endpoint.invalid/") else {
        return format!("/{}", segments.join("/"));
    };
    if let Ok(mut path) = url.path_segments_mut() {
        path.clear().extend(segments);
    }
    url.path().to_string()
}
