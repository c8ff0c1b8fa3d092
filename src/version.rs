//! Build metadata.

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Commit the binary was built from, injected through `GIT_COMMIT` at build time.
pub const GIT_COMMIT: &str = match option_env!("GIT_COMMIT") {
    Some(commit) => commit,
    None => "unknown",
};
