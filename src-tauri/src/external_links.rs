use std::process::{Command, Stdio};
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationTarget {
    InApp,
    External,
    Blocked,
}

const IN_APP_SCHEMES: [&str; 4] = ["tauri", "asset", "ipc", "about"];
const IN_APP_HOSTS: [&str; 2] = ["tauri.localhost", "ipc.localhost"];

pub fn classify_navigation(url: &Url) -> NavigationTarget {
    if IN_APP_SCHEMES.contains(&url.scheme()) {
        return NavigationTarget::InApp;
    }

    match url.scheme() {
        "http" | "https" => {
            if url
                .host_str()
                .is_some_and(|host| IN_APP_HOSTS.contains(&host))
            {
                NavigationTarget::InApp
            } else {
                NavigationTarget::External
            }
        }
        _ => NavigationTarget::Blocked,
    }
}

/// Navigation hook for the main webview. External pages open in the
/// default browser and the webview stays where it is.
pub fn allow_webview_navigation<F>(url: &Url, log: F) -> bool
where
    F: Fn(&str),
{
    match classify_navigation(url) {
        NavigationTarget::InApp => true,
        NavigationTarget::External => {
            if let Err(error) = open_external_url(url.as_str()) {
                log(&format!("failed to open external url {url}: {error}"));
            }
            false
        }
        NavigationTarget::Blocked => {
            log(&format!("blocked navigation to {url}"));
            false
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewWindowAction {
    OpenInBrowser,
    Ignore,
}

/// Popups (`target="_blank"`, `window.open`) never get a webview of their
/// own; web links go to the system browser instead.
pub fn decide_new_window(url: &Url) -> NewWindowAction {
    match classify_navigation(url) {
        NavigationTarget::External => NewWindowAction::OpenInBrowser,
        NavigationTarget::InApp | NavigationTarget::Blocked => NewWindowAction::Ignore,
    }
}

pub fn handle_new_window_request<F>(url: &Url, log: F) -> NewWindowAction
where
    F: Fn(&str),
{
    let action = decide_new_window(url);
    match action {
        NewWindowAction::OpenInBrowser => {
            if let Err(error) = open_external_url(url.as_str()) {
                log(&format!("failed to open external url {url}: {error}"));
            }
        }
        NewWindowAction::Ignore => log(&format!("denied new window for {url}")),
    }
    action
}

pub fn parse_openable_url(raw_url: &str) -> Result<Url, String> {
    let trimmed = raw_url.trim();
    if trimmed.is_empty() {
        return Err("Missing external URL.".to_string());
    }

    let parsed = Url::parse(trimmed).map_err(|error| format!("Invalid URL: {error}"))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(format!(
            "Unsupported URL scheme '{scheme}', only http/https are allowed."
        )),
    }
}

pub fn open_external_url(raw_url: &str) -> Result<(), String> {
    let parsed = parse_openable_url(raw_url)?;
    open_url_with_system_browser(parsed.as_str())
}

#[cfg(target_os = "macos")]
fn open_url_with_system_browser(url: &str) -> Result<(), String> {
    Command::new("open")
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
        .map_err(|error| format!("Failed to run 'open': {error}"))
}

#[cfg(target_os = "windows")]
fn open_url_with_system_browser(url: &str) -> Result<(), String> {
    Command::new("rundll32")
        .args(["url.dll,FileProtocolHandler", url])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
        .map_err(|error| format!("Failed to run 'rundll32': {error}"))
}

#[cfg(all(unix, not(target_os = "macos")))]
fn open_url_with_system_browser(url: &str) -> Result<(), String> {
    Command::new("xdg-open")
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
        .map_err(|error| format!("Failed to run 'xdg-open': {error}"))
}

#[cfg(not(any(target_os = "macos", target_os = "windows", unix)))]
fn open_url_with_system_browser(_url: &str) -> Result<(), String> {
    Err("Opening external URLs is not supported on this platform.".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(raw: &str) -> Url {
        Url::parse(raw).expect("test url should parse")
    }

    #[test]
    fn app_content_stays_in_webview() {
        assert_eq!(
            classify_navigation(&url("tauri://localhost/index.html")),
            NavigationTarget::InApp
        );
        assert_eq!(
            classify_navigation(&url("http://tauri.localhost/index.html")),
            NavigationTarget::InApp
        );
        assert_eq!(classify_navigation(&url("about:blank")), NavigationTarget::InApp);
    }

    #[test]
    fn web_links_are_external() {
        assert_eq!(
            classify_navigation(&url("https://v2.tauri.app/plugin/updater/")),
            NavigationTarget::External
        );
        assert_eq!(
            classify_navigation(&url("http://example.com")),
            NavigationTarget::External
        );
    }

    #[test]
    fn other_schemes_are_blocked() {
        assert_eq!(
            classify_navigation(&url("file:///etc/passwd")),
            NavigationTarget::Blocked
        );
        assert_eq!(
            classify_navigation(&url("javascript:alert(1)")),
            NavigationTarget::Blocked
        );
    }

    #[test]
    fn blocked_navigation_is_denied_without_opening() {
        assert!(!allow_webview_navigation(&url("file:///tmp/x"), |_| {}));
        assert!(allow_webview_navigation(
            &url("tauri://localhost/index.html"),
            |_| {}
        ));
    }

    #[test]
    fn new_window_for_web_link_opens_in_browser() {
        assert_eq!(
            decide_new_window(&url("https://example.com/docs")),
            NewWindowAction::OpenInBrowser
        );
    }

    #[test]
    fn new_window_for_app_or_blocked_url_is_ignored() {
        assert_eq!(
            decide_new_window(&url("tauri://localhost/index.html")),
            NewWindowAction::Ignore
        );
        assert_eq!(
            decide_new_window(&url("file:///tmp/x")),
            NewWindowAction::Ignore
        );

        let logs = std::cell::RefCell::new(Vec::new());
        let action = handle_new_window_request(&url("file:///tmp/x"), |line| {
            logs.borrow_mut().push(line.to_string())
        });
        assert_eq!(action, NewWindowAction::Ignore);
        assert_eq!(
            logs.into_inner(),
            vec!["denied new window for file:///tmp/x".to_string()]
        );
    }

    #[test]
    fn parse_openable_url_rejects_blank_and_non_http() {
        assert!(parse_openable_url("  ").is_err());
        let error = parse_openable_url("ftp://example.com").expect_err("ftp should be rejected");
        assert!(error.contains("Unsupported URL scheme 'ftp'"));
        assert!(parse_openable_url(" https://example.com ").is_ok());
    }
}
