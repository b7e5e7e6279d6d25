// build.rs - TOML-driven compile-time constant generation
use std::env;
use std::fs;
use std::path::Path;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    driver: DriverLimits,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
struct DriverLimits {
    max_token_count: usize,
    max_token_text_length: usize,
    mode_depth_warning: usize,
    max_listener_count: usize,
}

#[derive(serde::Deserialize)]
struct LoggingLimits {
    log_buffer_size: usize,
    max_log_message_length: usize,
    min_event_log_level: u8,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=LEXRT_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=LEXRT_CONFIG_DIR");

    let profile = env::var("LEXRT_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("LEXRT_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Find workspace root (parent of the lexrt directory)
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .expect("Could not find workspace root (parent directory)");

    let config_path = workspace_root
        .join(&config_dir)
        .join(format!("{}.toml", profile));

    println!("cargo:rerun-if-changed={}", config_path.display());

    if !config_path.exists() {
        panic!(
            "Configuration file not found: {}\nLooking for: {}/{}/{}.toml",
            config_path.display(),
            workspace_root.display(),
            config_dir,
            profile
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));

    let config: CompileTimeConfig = toml::from_str(&config_content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_constraints(&config, &profile);
    generate_constants(&config, &profile);
}

fn validate_constraints(config: &CompileTimeConfig, profile: &str) {
    const ABSOLUTE_MAX_TOKEN_COUNT: usize = 100_000_000;
    const ABSOLUTE_MAX_TEXT_LENGTH: usize = 100_000_000;

    if config.driver.max_token_count > ABSOLUTE_MAX_TOKEN_COUNT {
        panic!("max_token_count exceeds absolute maximum");
    }

    if config.driver.max_token_text_length > ABSOLUTE_MAX_TEXT_LENGTH {
        panic!("max_token_text_length exceeds absolute maximum");
    }

    if config.logging.min_event_log_level > 3 {
        panic!("min_event_log_level out of range (max: 3)");
    }

    if profile == "production" && config.logging.log_buffer_size > 50_000 {
        panic!("PRODUCTION: log_buffer_size too high for production");
    }
}

fn generate_constants(config: &CompileTimeConfig, profile: &str) {
    let out_dir = env::var("OUT_DIR").unwrap();
    let output_path = Path::new(&out_dir).join("constants.rs");

    let constants_code = format!(
        r#"
// Generated compile-time constants from TOML configuration
// Profile: {}
// DO NOT EDIT - Generated by build.rs

pub mod compile_time {{
    pub mod driver {{
        pub const MAX_TOKEN_COUNT: usize = {};
        pub const MAX_TOKEN_TEXT_LENGTH: usize = {};
        pub const MODE_DEPTH_WARNING: usize = {};
        pub const MAX_LISTENER_COUNT: usize = {};
    }}

    pub mod logging {{
        pub const LOG_BUFFER_SIZE: usize = {};
        pub const MAX_LOG_MESSAGE_LENGTH: usize = {};
        pub const MIN_EVENT_LOG_LEVEL: u8 = {};
    }}
}}
"#,
        profile,
        config.driver.max_token_count,
        config.driver.max_token_text_length,
        config.driver.mode_depth_warning,
        config.driver.max_listener_count,
        config.logging.log_buffer_size,
        config.logging.max_log_message_length,
        config.logging.min_event_log_level,
    );

    fs::write(output_path, constants_code).unwrap();
}
