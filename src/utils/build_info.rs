use serde::Serialize;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Metadata embedded by the build script.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BuildInfo {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub git_status: &'static str,
    pub timestamp: &'static str,
    pub target: &'static str,
    pub profile: &'static str,
    pub rustc: &'static str,
}

pub fn current() -> BuildInfo {
    BuildInfo {
        version: VERSION,
        git_hash: option_env!("BUDGETWISE_BUILD_HASH").unwrap_or("unknown"),
        git_status: option_env!("BUDGETWISE_BUILD_STATUS").unwrap_or("unknown"),
        timestamp: option_env!("BUDGETWISE_BUILD_TIMESTAMP").unwrap_or("unknown"),
        target: option_env!("BUDGETWISE_BUILD_TARGET").unwrap_or("unknown"),
        profile: option_env!("BUDGETWISE_BUILD_PROFILE").unwrap_or("unknown"),
        rustc: option_env!("BUDGETWISE_BUILD_RUSTC").unwrap_or("unknown"),
    }
}
