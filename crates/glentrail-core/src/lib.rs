#![forbid(unsafe_code)]

use sha2::{Digest, Sha256};

pub mod canonical;
pub mod time;

pub const CRATE_NAME: &str = "glentrail-core";

/// Process exit codes shared by the server and CLI binaries.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    Usage = 2,
    Validation = 3,
    Storage = 4,
    Internal = 10,
}

#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Reads a string environment variable, treating unset and blank as absent.
#[must_use]
pub fn env_string(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Err(_) => None,
    }
}

/// Boolean env flag: `1`, `true`, `yes`, `on` (case-insensitive) are true.
#[must_use]
pub fn env_bool(name: &str, default: bool) -> bool {
    match env_string(name) {
        Some(raw) => matches!(raw.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        None => default,
    }
}

#[must_use]
pub fn env_u64(name: &str, default: u64) -> u64 {
    env_string(name)
        .and_then(|raw| raw.parse::<u64>().ok())
        .unwrap_or(default)
}

#[must_use]
pub fn env_usize(name: &str, default: usize) -> usize {
    env_string(name)
        .and_then(|raw| raw.parse::<usize>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::{env_bool, sha256_hex};

    #[test]
    fn sha256_hex_of_empty_input_matches_known_digest() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn env_bool_accepts_common_truthy_spellings() {
        std::env::set_var("GLENTRAIL_CORE_TEST_FLAG", "Yes");
        assert!(env_bool("GLENTRAIL_CORE_TEST_FLAG", false));
        std::env::set_var("GLENTRAIL_CORE_TEST_FLAG", "0");
        assert!(!env_bool("GLENTRAIL_CORE_TEST_FLAG", true));
        std::env::remove_var("GLENTRAIL_CORE_TEST_FLAG");
        assert!(env_bool("GLENTRAIL_CORE_TEST_FLAG", true));
    }
}
