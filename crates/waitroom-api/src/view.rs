//! Waiting-room page.

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};

/// Queue page template with `{{visitors_ahead}}` and `{{refresh_interval}}` slots.
const QUEUE_TEMPLATE: &str = include_str!("../templates/queue.html");

/// Render the queue page body.
pub fn render(visitors_ahead: u64, refresh_interval: u64) -> String {
    QUEUE_TEMPLATE
        .replace("{{visitors_ahead}}", &group_thousands(visitors_ahead))
        .replace("{{refresh_interval}}", &refresh_interval.to_string())
}

/// The "not yet admitted" response: 401, HTML, with a refresh hint.
pub fn waiting_room(visitors_ahead: u64, refresh_interval: u64) -> Response {
    let mut response = (
        StatusCode::UNAUTHORIZED,
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8"),
            (header::CACHE_CONTROL, "no-store"),
        ],
        render(visitors_ahead, refresh_interval),
    )
        .into_response();

    if let Ok(value) = HeaderValue::from_str(&refresh_interval.to_string()) {
        response.headers_mut().insert("refresh", value);
    }
    response
}

/// `1234567` -> `"1,234,567"`.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn test_render_fills_slots() {
        let html = render(12_345, 5);
        assert!(html.contains("12,345"));
        assert!(html.contains("content=\"5\""));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn test_waiting_room_response() {
        let response = waiting_room(3, 10);
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/html; charset=utf-8"
        );
        assert_eq!(response.headers()["refresh"], "10");
    }
}
