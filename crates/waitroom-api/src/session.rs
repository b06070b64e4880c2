//! Session binding: the position token travels in a cookie.

use axum_extra::extract::cookie::{Cookie, CookieJar};

use waitroom_core::config::SessionConfig;
use waitroom_core::error::AppError;
use waitroom_core::result::AppResult;

/// Read the token cookie. Missing or empty cookies are absent.
pub fn extract(jar: &CookieJar, config: &SessionConfig) -> Option<String> {
    jar.get(&config.cookie_name)
        .map(|cookie| cookie.value().trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Attach a freshly issued token to the response jar.
///
/// `Max-Age` is the configured cookie expiry; once it lapses the visitor is
/// unknown again and queues from the back.
pub fn bind(jar: CookieJar, token: &str, config: &SessionConfig) -> AppResult<CookieJar> {
    let mut raw = format!(
        "{}={}; Max-Age={}; Path=/; HttpOnly; SameSite=Lax",
        config.cookie_name, token, config.cookie_expiry_seconds
    );
    if config.secure_cookie {
        raw.push_str("; Secure");
    }

    let cookie = Cookie::parse(raw)
        .map_err(|e| AppError::internal(format!("Failed to build session cookie: {e}")))?;
    Ok(jar.add(cookie))
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderMap, HeaderValue, header};
    use axum::response::IntoResponse;

    use super::*;

    fn config() -> SessionConfig {
        SessionConfig {
            cookie_name: "queue".to_string(),
            cookie_expiry_seconds: 3600,
            secure_cookie: false,
        }
    }

    #[test]
    fn test_extract_present() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; queue=abc.def.ghi"),
        );
        let jar = CookieJar::from_headers(&headers);
        assert_eq!(extract(&jar, &config()), Some("abc.def.ghi".to_string()));
    }

    #[test]
    fn test_extract_absent_or_empty() {
        let jar = CookieJar::new();
        assert_eq!(extract(&jar, &config()), None);

        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("queue="));
        let jar = CookieJar::from_headers(&headers);
        assert_eq!(extract(&jar, &config()), None);
    }

    #[test]
    fn test_bind_sets_cookie_attributes() {
        let jar = bind(CookieJar::new(), "a.b.c", &config()).unwrap();
        let response = (jar, "body").into_response();
        let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();

        assert!(set_cookie.starts_with("queue=a.b.c"));
        assert!(set_cookie.contains("Max-Age=3600"));
        assert!(set_cookie.contains("Path=/"));
        assert!(set_cookie.contains("HttpOnly"));
        assert!(!set_cookie.contains("Secure"));
    }

    #[test]
    fn test_bind_secure() {
        let mut config = config();
        config.secure_cookie = true;
        let jar = bind(CookieJar::new(), "a.b.c", &config).unwrap();
        let response = (jar, "body").into_response();
        let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(set_cookie.contains("Secure"));
    }
}
