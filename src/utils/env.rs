/// Get environment variable with TOKOKU_ prefix, falling back to unprefixed version
///
/// This helper function checks for `TOKOKU_{key}` first, then falls back to `{key}`
/// for compatibility with standard environment variable naming.
///
/// # Examples
///
/// ```rust
/// use tokoku::utils::get_env_with_prefix;
///
/// // Checks TOKOKU_API_URL first, then API_URL
/// let api_url = get_env_with_prefix("API_URL");
///
/// // Checks TOKOKU_STATE_PATH first, then STATE_PATH
/// let state_path = get_env_with_prefix("STATE_PATH");
/// ```
pub fn get_env_with_prefix(key: &str) -> Option<String> {
    std::env::var(format!("TOKOKU_{}", key))
        .or_else(|_| std::env::var(key))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_env_with_prefix() {
        // Test with TOKOKU_ prefix
        std::env::set_var("TOKOKU_TEST_VAR", "prefixed_value");
        assert_eq!(get_env_with_prefix("TEST_VAR"), Some("prefixed_value".to_string()));
        std::env::remove_var("TOKOKU_TEST_VAR");

        // Test with unprefixed fallback
        std::env::set_var("FALLBACK_VAR", "unprefixed_value");
        assert_eq!(get_env_with_prefix("FALLBACK_VAR"), Some("unprefixed_value".to_string()));
        std::env::remove_var("FALLBACK_VAR");

        // Test non-existent variable
        assert_eq!(get_env_with_prefix("NON_EXISTENT_VAR"), None);
    }
}
