//! Cookie Management Infrastructure
//!
//! Common cookie handling utilities and configuration.

use axum::http::header::InvalidHeaderValue;
use axum::http::{HeaderMap, HeaderValue, header};
use chrono::{DateTime, Utc};

/// `Expires` value for deletion cookies
const EPOCH_HTTP_DATE: &str = "Thu, 01 Jan 1970 00:00:00 GMT";

/// SameSite policy for cookies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Cookie configuration
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
    pub path: String,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: "session".to_string(),
            secure: true,
            http_only: true,
            same_site: SameSite::Lax,
            path: "/".to_string(),
        }
    }
}

impl CookieConfig {
    /// Build a Set-Cookie value that expires at `expires_at`
    ///
    /// Both `Expires` and `Max-Age` are emitted; `Max-Age` is measured from `now`.
    pub fn build_set_cookie(
        &self,
        value: &str,
        expires_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> String {
        let max_age = (expires_at - now).num_seconds().max(0);
        self.build(value, &http_date(expires_at), max_age)
    }

    /// Build a Set-Cookie value that makes the browser drop the cookie
    pub fn build_delete_cookie(&self) -> String {
        self.build("", EPOCH_HTTP_DATE, 0)
    }

    fn build(&self, value: &str, expires: &str, max_age: i64) -> String {
        let mut cookie = format!("{}={}", self.name, value);

        if self.http_only {
            cookie.push_str("; HttpOnly");
        }
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie.push_str(&format!("; SameSite={}", self.same_site.as_str()));
        cookie.push_str(&format!("; Path={}", self.path));
        cookie.push_str(&format!("; Expires={}", expires));
        cookie.push_str(&format!("; Max-Age={}", max_age));

        cookie
    }
}

/// Format an instant as an IMF-fixdate (`Sun, 06 Nov 1994 08:49:37 GMT`)
pub fn http_date(instant: DateTime<Utc>) -> String {
    instant.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Extract a cookie value from headers
///
/// All `Cookie` headers are searched; the first non-empty match wins.
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|cookie| {
            let (key, value) = cookie.trim().split_once('=')?;

            if key == name && !value.is_empty() {
                Some(value.to_string())
            } else {
                None
            }
        })
}

/// Convert a built cookie string into a header value
///
/// Fails when the configured name or value contains bytes a header cannot carry.
pub fn to_header_value(cookie: &str) -> Result<HeaderValue, InvalidHeaderValue> {
    HeaderValue::from_str(cookie)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn config() -> CookieConfig {
        CookieConfig {
            name: "lifelog_session".to_string(),
            ..CookieConfig::default()
        }
    }

    #[test]
    fn test_set_cookie_attributes() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        let cookie = config().build_set_cookie("tok123", now + Duration::hours(24), now);

        assert!(cookie.starts_with("lifelog_session=tok123"));
        assert!(cookie.contains("; HttpOnly"));
        assert!(cookie.contains("; Secure"));
        assert!(cookie.contains("; SameSite=Lax"));
        assert!(cookie.contains("; Path=/"));
        assert!(cookie.contains("; Expires=Thu, 02 May 2024 08:00:00 GMT"));
        assert!(cookie.contains("; Max-Age=86400"));
    }

    #[test]
    fn test_secure_flag_is_optional() {
        let now = Utc::now();
        let config = CookieConfig {
            secure: false,
            ..config()
        };
        let cookie = config.build_set_cookie("x", now + Duration::hours(1), now);
        assert!(!cookie.contains("Secure"));
    }

    #[test]
    fn test_delete_cookie_expires_in_the_past() {
        let cookie = config().build_delete_cookie();
        assert!(cookie.starts_with("lifelog_session=;"));
        assert!(cookie.contains("Max-Age=0"));
        assert!(cookie.contains(EPOCH_HTTP_DATE));
        assert!(cookie.contains("Path=/"));
    }

    #[test]
    fn test_extract_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("foo=bar; session=abc123; other=xyz"),
        );

        assert_eq!(
            extract_cookie(&headers, "session"),
            Some("abc123".to_string())
        );
        assert_eq!(extract_cookie(&headers, "foo"), Some("bar".to_string()));
        assert_eq!(extract_cookie(&headers, "missing"), None);
    }

    #[test]
    fn test_extract_cookie_across_headers_and_empty_values() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("session="));
        headers.append(header::COOKIE, HeaderValue::from_static("session=second"));

        assert_eq!(
            extract_cookie(&headers, "session"),
            Some("second".to_string())
        );
    }

    #[test]
    fn test_header_value_rejects_invalid_bytes() {
        let cookie = config().build_delete_cookie();
        assert_eq!(to_header_value(&cookie).unwrap().to_str().unwrap(), cookie);

        let broken = CookieConfig {
            name: "lifelog\nsession".to_string(),
            ..config()
        };
        assert!(to_header_value(&broken.build_delete_cookie()).is_err());
    }
}
