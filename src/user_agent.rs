//! User-Agent string sent with every request.
//!
//! Open Library asks API clients to identify themselves; the default names the
//! crate and its version.

/// Where the client's traffic can be traced back to.
const PROJECT_UA_URL: &str = "https://openlibrary.org/developers/api";

#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("openlib/{version} (Open Library API client; +{PROJECT_UA_URL})")
}
