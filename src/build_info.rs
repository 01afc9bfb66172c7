//! Build-time information
//!
//! Build metadata captured at compile time by `build.rs`: timestamps, cargo
//! configuration, compiler version and git state. Git values fall back to
//! `unknown` when the crate is built outside a repository.

/// Build timestamp (when the binary was compiled)
pub const BUILD_TIMESTAMP: &str = env!("VERGEN_BUILD_TIMESTAMP");

/// Cargo optimization level (0, 1, 2, 3, s, z)
pub const CARGO_OPT_LEVEL: &str = env!("VERGEN_CARGO_OPT_LEVEL");

/// Target triple (e.g., x86_64-unknown-linux-gnu, x86_64-apple-darwin)
pub const CARGO_TARGET_TRIPLE: &str = env!("VERGEN_CARGO_TARGET_TRIPLE");

/// Rust compiler version (e.g., 1.75.0)
pub const RUSTC_SEMVER: &str = env!("VERGEN_RUSTC_SEMVER");

/// Rust channel (stable, beta, or nightly)
pub const RUSTC_CHANNEL: &str = env!("VERGEN_RUSTC_CHANNEL");

pub const GIT_SHA: &str = match option_env!("VERGEN_GIT_SHA") {
    Some(sha) => sha,
    None => "unknown",
};

pub const GIT_BRANCH: &str = match option_env!("VERGEN_GIT_BRANCH") {
    Some(branch) => branch,
    None => "unknown",
};

pub const GIT_COMMIT_TIMESTAMP: &str = match option_env!("VERGEN_GIT_COMMIT_TIMESTAMP") {
    Some(timestamp) => timestamp,
    None => "unknown",
};

const GIT_DIRTY: &str = match option_env!("VERGEN_GIT_DIRTY") {
    Some(dirty) => dirty,
    None => "false",
};

/// First 7 characters of the commit SHA
pub fn git_sha_short() -> &'static str {
    GIT_SHA.get(..7).unwrap_or(GIT_SHA)
}

/// Whether the build captured real git metadata
///
/// vergen substitutes a placeholder when git is unavailable.
pub fn has_git_info() -> bool {
    GIT_SHA != "unknown" && GIT_SHA != "VERGEN_IDEMPOTENT_OUTPUT"
}

/// Whether the working tree had uncommitted changes at build time
pub fn is_git_dirty() -> bool {
    GIT_DIRTY == "true"
}

/// Returns a formatted build version string
///
/// Format: `{target_triple}-opt{opt_level}`
/// Example: `x86_64-apple-darwin-opt3` or `x86_64-unknown-linux-gnu-opt0`
pub fn version_string() -> String {
    format!("{}-opt{}", CARGO_TARGET_TRIPLE, CARGO_OPT_LEVEL)
}

/// Returns a detailed build info string
pub fn detailed_info() -> String {
    format!(
        "Built: {}\nCommit: {}@{}{}\nTarget: {}\nOptimization: {}\nRustc: {} ({})",
        BUILD_TIMESTAMP,
        GIT_BRANCH,
        git_sha_short(),
        if is_git_dirty() { " (dirty)" } else { "" },
        CARGO_TARGET_TRIPLE,
        CARGO_OPT_LEVEL,
        RUSTC_SEMVER,
        RUSTC_CHANNEL
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_sha_is_bounded() {
        assert!(git_sha_short().len() <= 7);
        assert!(GIT_SHA.starts_with(git_sha_short()));
    }

    #[test]
    fn test_version_string_contains_target() {
        assert!(version_string().starts_with(CARGO_TARGET_TRIPLE));
        assert!(detailed_info().contains(RUSTC_SEMVER));
    }
}
