//! Configuration module for the lexrt runtime
//! Automatically uses generated constants from TOML configuration

// Include generated constants from build.rs
// This file is generated at compile time from the profile TOML under config/
include!(concat!(env!("OUT_DIR"), "/constants.rs"));

// Keep original constants file for reference and runtime configuration
pub mod constants;
pub mod runtime;

/// Build information and configuration metadata
pub mod build_info {
    /// Returns the configuration profile used during build
    pub fn profile() -> &'static str {
        option_env!("LEXRT_BUILD_PROFILE").unwrap_or("development")
    }

    /// Returns the configuration directory used during build
    pub fn config_dir() -> &'static str {
        option_env!("LEXRT_CONFIG_DIR").unwrap_or("config")
    }

    /// Returns configuration source information
    pub fn source_info() -> String {
        format!("Generated from {}/{}.toml", config_dir(), profile())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_constants_match_reference() {
        // The development profile mirrors the documented defaults
        assert_eq!(
            compile_time::driver::MAX_TOKEN_COUNT,
            constants::compile_time::driver::MAX_TOKEN_COUNT
        );
        assert_eq!(
            compile_time::logging::LOG_BUFFER_SIZE,
            constants::compile_time::logging::LOG_BUFFER_SIZE
        );
    }

    #[test]
    fn test_build_info() {
        assert!(!build_info::profile().is_empty());
        assert!(build_info::source_info().contains(".toml"));
    }
}
