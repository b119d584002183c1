//! Compile-time build metadata

use serde::Serialize;

/// UTC time the crate was compiled
pub const BUILD_TIMESTAMP: &str = match option_env!("CHOWPLAN_BUILD_TIMESTAMP") {
    Some(s) => s,
    None => "unknown",
};

/// Cargo profile ("debug" or "release")
pub const BUILD_PROFILE: &str = match option_env!("CHOWPLAN_BUILD_PROFILE") {
    Some(s) => s,
    None => "unknown",
};

/// Target triple the binary was built for
pub const BUILD_TARGET: &str = match option_env!("CHOWPLAN_BUILD_TARGET") {
    Some(s) => s,
    None => "unknown",
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub profile: &'static str,
    pub target: &'static str,
    pub build_timestamp: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            name: NAME,
            version: VERSION,
            profile: BUILD_PROFILE,
            target: BUILD_TARGET,
            build_timestamp: BUILD_TIMESTAMP,
        }
    }

    /// One-line summary, e.g. "chowplan 1.0.0 (release, x86_64-unknown-linux-gnu)"
    pub fn summary(&self) -> String {
        format!("{} {} ({}, {})", self.name, self.version, self.profile, self.target)
    }
}

/// Print the startup banner to stderr; stdout carries the MCP transport
pub fn print_startup_banner(tables_source: &str) {
    let info = BuildInfo::current();
    eprintln!("{}", info.summary());
    eprintln!("  compiled {} | feeding tables: {}", info.build_timestamp, tables_source);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_uses_package_metadata() {
        let info = BuildInfo::current();
        assert_eq!(info.name, "chowplan");
        assert_eq!(info.version, env!("CARGO_PKG_VERSION"));
        assert!(matches!(info.profile, "debug" | "release"));
        assert_ne!(info.target, "unknown");
    }

    #[test]
    fn test_summary_format() {
        let info = BuildInfo {
            name: "chowplan",
            version: "1.2.3",
            profile: "release",
            target: "aarch64-apple-darwin",
            build_timestamp: "2026-01-01T00:00:00Z",
        };
        assert_eq!(info.summary(), "chowplan 1.2.3 (release, aarch64-apple-darwin)");
    }
}
