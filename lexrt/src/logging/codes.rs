//! Consolidated error codes and classification system
//!
//! Single source of truth for all runtime codes, their metadata, and the
//! classification helpers used by the event system.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for a code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

// ============================================================================
// CODE CONSTANTS
// ============================================================================

/// Driver (tokenization loop) codes
pub mod driver {
    use super::Code;

    /// The recognition engine found no viable alternative
    pub const TOKEN_RECOGNITION_ERROR: Code = Code::new("E020");
    /// popMode was invoked with an empty mode stack
    pub const MODE_STACK_UNDERFLOW: Code = Code::new("E021");
    /// Bulk tokenization exceeded the compiled token cap
    pub const TOKEN_LIMIT_EXCEEDED: Code = Code::new("E022");
    /// Explicit token text exceeded the compiled length cap
    pub const TEXT_TOO_LARGE: Code = Code::new("E023");
}

/// Input stream codes
pub mod stream {
    use super::Code;

    /// seek target past the end of the stream
    pub const INVALID_SEEK: Code = Code::new("E010");
    /// release of a marker that was never handed out
    pub const UNBALANCED_RELEASE: Code = Code::new("E011");
}

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I001");
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I005");
}

/// System codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
}

// ============================================================================
// METADATA REGISTRY
// ============================================================================

static METADATA: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

fn metadata_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    METADATA.get_or_init(|| {
        let entries = [
            ErrorMetadata {
                code: "E020",
                category: "Driver",
                severity: Severity::Medium,
                recoverable: true,
                requires_halt: false,
                description: "No lexer rule matched at the current input position",
                recommended_action: "Check the grammar rules for the active mode",
            },
            ErrorMetadata {
                code: "E021",
                category: "Driver",
                severity: Severity::High,
                recoverable: false,
                requires_halt: false,
                description: "popMode without a matching pushMode",
                recommended_action: "Balance pushMode/popMode actions in the grammar",
            },
            ErrorMetadata {
                code: "E022",
                category: "Driver",
                severity: Severity::High,
                recoverable: false,
                requires_halt: false,
                description: "Bulk tokenization produced more tokens than the compiled cap",
                recommended_action: "Split the input or raise the compiled limit",
            },
            ErrorMetadata {
                code: "E023",
                category: "Driver",
                severity: Severity::Medium,
                recoverable: true,
                requires_halt: false,
                description: "Explicit token text exceeds the compiled length cap",
                recommended_action: "Reduce the size of explicit setText overrides",
            },
            ErrorMetadata {
                code: "E010",
                category: "Stream",
                severity: Severity::High,
                recoverable: false,
                requires_halt: false,
                description: "Seek target beyond the end of the character stream",
                recommended_action: "Seek only to indices up to the stream length",
            },
            ErrorMetadata {
                code: "E011",
                category: "Stream",
                severity: Severity::Medium,
                recoverable: true,
                requires_halt: false,
                description: "Marker released that was never handed out",
                recommended_action: "Pair every release with a prior mark",
            },
            ErrorMetadata {
                code: "I001",
                category: "System",
                severity: Severity::Low,
                recoverable: true,
                requires_halt: false,
                description: "Logging system initialized",
                recommended_action: "No specific action available",
            },
            ErrorMetadata {
                code: "I005",
                category: "Driver",
                severity: Severity::Low,
                recoverable: true,
                requires_halt: false,
                description: "Bulk tokenization completed",
                recommended_action: "No specific action available",
            },
            ErrorMetadata {
                code: "ERR001",
                category: "System",
                severity: Severity::Critical,
                recoverable: false,
                requires_halt: true,
                description: "Internal runtime invariant violated",
                recommended_action: "Report this as a runtime bug",
            },
        ];

        entries.into_iter().map(|m| (m.code, m)).collect()
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

pub fn get_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    metadata_registry().get(code)
}

pub fn get_description(code: &str) -> &'static str {
    get_metadata(code).map_or("Unknown error", |m| m.description)
}

pub fn get_category(code: &str) -> &'static str {
    get_metadata(code).map_or("Unknown", |m| m.category)
}

pub fn get_severity(code: &str) -> Severity {
    get_metadata(code).map_or(Severity::Medium, |m| m.severity)
}

pub fn get_action(code: &str) -> &'static str {
    get_metadata(code).map_or("No specific action available", |m| m.recommended_action)
}

pub fn is_recoverable(code: &str) -> bool {
    get_metadata(code).map_or(true, |m| m.recoverable)
}

pub fn requires_halt(code: &str) -> bool {
    get_metadata(code).map_or(false, |m| m.requires_halt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_display() {
        assert_eq!(driver::TOKEN_RECOGNITION_ERROR.as_str(), "E020");
        assert_eq!(format!("{}", driver::MODE_STACK_UNDERFLOW), "E021");
    }

    #[test]
    fn test_metadata_lookup() {
        assert_eq!(get_category("E020"), "Driver");
        assert_eq!(get_category("E010"), "Stream");
        assert!(is_recoverable("E020"));
        assert!(!is_recoverable("E021"));
        assert!(requires_halt("ERR001"));
    }

    #[test]
    fn test_unknown_code_defaults() {
        assert_eq!(get_description("E999"), "Unknown error");
        assert_eq!(get_severity("E999"), Severity::Medium);
        assert!(!requires_halt("E999"));
    }

    #[test]
    fn test_all_declared_codes_have_metadata() {
        for code in [
            driver::TOKEN_RECOGNITION_ERROR,
            driver::MODE_STACK_UNDERFLOW,
            driver::TOKEN_LIMIT_EXCEEDED,
            driver::TEXT_TOO_LARGE,
            stream::INVALID_SEEK,
            stream::UNBALANCED_RELEASE,
            success::SYSTEM_INITIALIZATION_COMPLETED,
            success::TOKENIZATION_COMPLETE,
            system::INTERNAL_ERROR,
        ] {
            assert!(
                get_metadata(code.as_str()).is_some(),
                "missing metadata for {}",
                code
            );
        }
    }
}
