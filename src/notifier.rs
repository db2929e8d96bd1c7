use serde_json::json;
use tracing::{info, error};

use crate::indicators::curve::Trend;

/// Builds the Slack text for a change in curve trend.
pub fn format_trend_alert(
    previous: Trend,
    current: Trend,
    spread: f64,
    fed_rate: f64,
    time_str: &str,
) -> String {
    let arrow = match current {
        Trend::Steepening => "📈",
        Trend::Flattening => "📉",
        Trend::Flat => "➡️",
    };
    let sign = if spread >= 0.0 { "+" } else { "" };
    let inverted = if spread < 0.0 { " (inverted)" } else { "" };

    format!(
        "{} *US Treasury Curve Trend Change* {}\n\
        > *{}* ➡ *{}*\n\
        > --------------------------------\n\
        > *2s10s Spread*: `{}{:.2}%`{}\n\
        > *Fed Funds Rate*: `{:.2}%`\n\
        > *Time*: `{}`",
        arrow, arrow,
        previous, current,
        sign, spread, inverted,
        fed_rate,
        time_str
    )
}

/// Posts `message` to a Slack webhook. Non-2xx responses are errors.
pub async fn post_alert(
    client: &reqwest::Client,
    webhook_url: &str,
    message: &str,
) -> Result<(), reqwest::Error> {
    client
        .post(webhook_url)
        .json(&json!({"text": message}))
        .send()
        .await?
        .error_for_status()?;
    Ok(())
}

/// Posts a trend-change alert to Slack without blocking the refresh loop.
pub fn send_trend_alert(webhook_url: String, message: String) {
    let client = reqwest::Client::new();

    tokio::spawn(async move {
        match post_alert(&client, &webhook_url, &message).await {
            Ok(()) => info!("🌊 Trend alert delivered successfully."),
            Err(e) => error!("❌ Failed to send trend alert: {:?}", e),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Answers a single HTTP request with `status_line` and returns the webhook URL.
    async fn one_shot_webhook(status_line: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            // Drain the whole request so closing the socket does not reset it.
            let mut req = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                let n = stream.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                req.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&req).to_lowercase();
                if let Some(head_end) = text.find("\r\n\r\n") {
                    let body_len = text[..head_end]
                        .lines()
                        .find_map(|l| l.strip_prefix("content-length:"))
                        .and_then(|v| v.trim().parse::<usize>().ok())
                        .unwrap_or(0);
                    if req.len() >= head_end + 4 + body_len {
                        break;
                    }
                }
            }
            let resp = format!("HTTP/1.1 {}\r\ncontent-length: 2\r\nconnection: close\r\n\r\nok", status_line);
            let _ = stream.write_all(resp.as_bytes()).await;
            let _ = stream.shutdown().await;
        });

        format!("http://{}/hook", addr)
    }

    fn local_client() -> reqwest::Client {
        reqwest::Client::builder().no_proxy().build().unwrap()
    }

    #[tokio::test]
    async fn webhook_success_is_ok() {
        let url = one_shot_webhook("200 OK").await;
        assert!(post_alert(&local_client(), &url, "hi").await.is_ok());
    }

    #[tokio::test]
    async fn webhook_error_status_is_reported() {
        let url = one_shot_webhook("500 Internal Server Error").await;
        let err = post_alert(&local_client(), &url, "hi").await.unwrap_err();
        assert_eq!(err.status(), Some(reqwest::StatusCode::INTERNAL_SERVER_ERROR));

        let url = one_shot_webhook("404 Not Found").await;
        assert!(post_alert(&local_client(), &url, "hi").await.is_err());
    }

    #[test]
    fn alert_marks_inversion() {
        let msg = format_trend_alert(Trend::Steepening, Trend::Flattening, -0.2, 5.13, "10:00:00");
        assert!(msg.contains("*Steepening* ➡ *Flattening*"));
        assert!(msg.contains("`-0.20%` (inverted)"));
        assert!(msg.contains("`5.13%`"));
        assert!(msg.contains("`10:00:00`"));
    }

    #[test]
    fn alert_positive_spread_has_sign() {
        let msg = format_trend_alert(Trend::Flat, Trend::Steepening, 0.35, 5.13, "t");
        assert!(msg.contains("`+0.35%`"));
        assert!(!msg.contains("inverted"));
    }
}
