//! Process exit codes for the mdguard binary.
//!
//! - `0`: every document is valid
//! - `1`: at least one document has error-severity diagnostics
//! - `2`: the tool itself failed (bad config, unreadable input, rejected request)

pub const SUCCESS: i32 = 0;
pub const VIOLATIONS_FOUND: i32 = 1;
pub const TOOL_ERROR: i32 = 2;

pub mod exit {
    use super::*;

    pub fn success() -> ! {
        std::process::exit(SUCCESS);
    }

    pub fn violations_found() -> ! {
        std::process::exit(VIOLATIONS_FOUND);
    }

    pub fn tool_error() -> ! {
        std::process::exit(TOOL_ERROR);
    }
}
