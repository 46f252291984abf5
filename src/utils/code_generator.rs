//! Short code generation and validation utilities.
//!
//! Codes are drawn uniformly from `[A-Za-z0-9]`. Generation is pure; uniqueness
//! is enforced by the store, which asks for another code on collision
//! (see [`crate::application::services::MappingStore::put`]).

use rand::{Rng, distr::Alphanumeric};
use regex::Regex;
use std::sync::LazyLock;

/// Default length of generated codes. 62^8 ≈ 2.2 × 10^14 possible codes.
pub const DEFAULT_CODE_LENGTH: usize = 8;

/// Longest code accepted on the redirect path.
pub const MAX_CODE_LENGTH: usize = 64;

/// Codes that would shadow fixed routes and are never issued.
const RESERVED_CODES: &[&str] = &["api", "health", "shortUrls"];

static CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("code regex is valid"));

/// Source of candidate short codes.
///
/// Implementations don't talk to storage; a returned code may already be
/// taken and the caller is expected to retry.
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    /// Produces a candidate code.
    fn generate(&self) -> String;
}

/// Random alphanumeric generator backed by the thread-local CSPRNG.
#[derive(Debug, Clone)]
pub struct RandomCodeGenerator {
    length: usize,
}

impl RandomCodeGenerator {
    /// Creates a generator emitting codes of `length` characters.
    pub fn new(length: usize) -> Self {
        Self { length }
    }
}

impl Default for RandomCodeGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_CODE_LENGTH)
    }
}

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        let mut rng = rand::rng();
        loop {
            let code: String = (&mut rng)
                .sample_iter(&Alphanumeric)
                .take(self.length)
                .map(char::from)
                .collect();

            if !is_reserved_code(&code) {
                return code;
            }
        }
    }
}

/// Returns true if `code` collides with a fixed route.
pub fn is_reserved_code(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}

/// Returns true if `code` could have been issued by this service.
///
/// Used on the redirect path to answer obviously bogus codes with 404 without
/// touching the cache or the store.
pub fn is_well_formed_code(code: &str) -> bool {
    !code.is_empty() && code.len() <= MAX_CODE_LENGTH && CODE_REGEX.is_match(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_has_configured_length() {
        assert_eq!(RandomCodeGenerator::default().generate().len(), 8);
        assert_eq!(RandomCodeGenerator::new(12).generate().len(), 12);
    }

    #[test]
    fn test_generate_code_alphanumeric_only() {
        let generator = RandomCodeGenerator::default();
        for _ in 0..100 {
            let code = generator.generate();
            assert!(code.chars().all(|c| c.is_ascii_alphanumeric()), "{code}");
        }
    }

    #[test]
    fn test_generate_code_produces_unique_codes() {
        let generator = RandomCodeGenerator::default();
        let codes: HashSet<String> = (0..1000).map(|_| generator.generate()).collect();
        assert_eq!(codes.len(), 1000);
    }

    #[test]
    fn test_generated_codes_are_well_formed() {
        let generator = RandomCodeGenerator::new(4);
        for _ in 0..100 {
            let code = generator.generate();
            assert!(is_well_formed_code(&code));
            assert!(!is_reserved_code(&code));
        }
    }

    #[test]
    fn test_reserved_codes() {
        assert!(is_reserved_code("health"));
        assert!(is_reserved_code("api"));
        assert!(is_reserved_code("shortUrls"));
        assert!(!is_reserved_code("abc123"));
    }

    #[test]
    fn test_well_formed_code() {
        assert!(is_well_formed_code("abc123"));
        assert!(is_well_formed_code("AbC9"));
        assert!(!is_well_formed_code(""));
        assert!(!is_well_formed_code("abc-123"));
        assert!(!is_well_formed_code("abc 123"));
        assert!(!is_well_formed_code("favicon.ico"));
        assert!(!is_well_formed_code(&"a".repeat(MAX_CODE_LENGTH + 1)));
    }
}
