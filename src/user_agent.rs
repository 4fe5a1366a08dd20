//! User-Agent string for download requests.

/// Default User-Agent for download requests (identifies the tool).
#[must_use]
pub(crate) fn default_download_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("weather-fetch/{version} (dataset-fetch-tool)")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_contains_crate_version() {
        let ua = default_download_user_agent();
        assert_eq!(
            Some(env!("CARGO_PKG_VERSION")),
            ua.strip_prefix("weather-fetch/")
                .and_then(|s| s.split(' ').next()),
            "UA must contain crate version: {ua}"
        );
    }

    #[test]
    fn test_user_agent_identifies_tool_purpose() {
        assert!(default_download_user_agent().contains("dataset-fetch-tool"));
    }
}
