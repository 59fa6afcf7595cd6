use url::Url;

use crate::platform::Platform;

fn normalize_api_url(raw_api_url: &str) -> Result<&str, String> {
    let trimmed = raw_api_url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err("Missing update API URL.".to_string());
    }

    let parsed = Url::parse(trimmed)
        .map_err(|error| format!("Invalid update API URL '{trimmed}': {error}"))?;
    match parsed.scheme() {
        "http" | "https" => Ok(trimmed),
        scheme => Err(format!(
            "Unsupported update API URL scheme '{scheme}', only http/https are allowed."
        )),
    }
}

/// Generic provider endpoint: `{api_url}/update/{platform}/{version}`.
///
/// The result is the templated text as written; parsing only validates it,
/// so explicit default ports and path casing survive.
pub fn build_update_endpoint(
    api_url: &str,
    platform: &Platform,
    current_version: &str,
) -> Result<String, String> {
    let api_url = normalize_api_url(api_url)?;
    let current_version = current_version.trim();
    if current_version.is_empty() {
        return Err("Missing current application version.".to_string());
    }

    let endpoint = format!(
        "{api_url}/update/{}/{current_version}",
        platform.identifier()
    );
    Url::parse(&endpoint)
        .map_err(|error| format!("Invalid update endpoint '{endpoint}': {error}"))?;
    Ok(endpoint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_is_templated_with_platform_and_version() {
        let endpoint = build_update_endpoint(
            "https://localhost:5004/api",
            &Platform::from_identifier("linux"),
            "1.2.3",
        )
        .expect("endpoint should build");
        assert_eq!(endpoint, "https://localhost:5004/api/update/linux/1.2.3");
    }

    #[test]
    fn endpoint_ignores_trailing_slash_on_api_url() {
        let endpoint = build_update_endpoint(
            "https://updates.example.com/api/",
            &Platform::Windows,
            "0.9.0",
        )
        .expect("endpoint should build");
        assert_eq!(endpoint, "https://updates.example.com/api/update/win32/0.9.0");
    }

    #[test]
    fn endpoint_keeps_api_url_text_verbatim() {
        let endpoint = build_update_endpoint(
            "https://updates.example.com:443/API",
            &Platform::Windows,
            "1.0.0",
        )
        .expect("endpoint should build");
        assert_eq!(endpoint, "https://updates.example.com:443/API/update/win32/1.0.0");
    }

    #[test]
    fn endpoint_uses_darwin_identifier_on_macos() {
        let endpoint =
            build_update_endpoint("http://127.0.0.1:8080", &Platform::MacOs, "2.0.0")
                .expect("endpoint should build");
        assert_eq!(endpoint, "http://127.0.0.1:8080/update/darwin/2.0.0");
    }

    #[test]
    fn endpoint_rejects_non_http_api_url() {
        let error = build_update_endpoint("file:///tmp/updates", &Platform::Windows, "1.0.0")
            .expect_err("file scheme should be rejected");
        assert!(error.contains("Unsupported update API URL scheme"));
    }

    #[test]
    fn endpoint_rejects_blank_inputs() {
        assert!(build_update_endpoint("  ", &Platform::Windows, "1.0.0").is_err());
        assert!(build_update_endpoint("https://a.example", &Platform::Windows, " ").is_err());
    }
}
