use anyhow::anyhow;
use chrono::{TimeZone, Utc};
use derive_more::Constructor;
use log::{debug, info};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::StatusCode;
use std::str::FromStr;

/// Rate limit state reported with every API response.
#[derive(Constructor, Debug, PartialEq, Eq)]
pub struct RateLimit {
    pub remaining: u32,
    pub reset: i64,
}

impl RateLimit {
    pub(crate) fn from_headers(headers: &HeaderMap<HeaderValue>) -> Option<RateLimit> {
        let limit = read_header::<u32>(headers, "x-ratelimit-remaining")
            .and_then(|remaining| Ok(RateLimit::new(remaining, read_header::<i64>(headers, "x-ratelimit-reset")?)));
        match limit {
            Ok(limit) => {
                debug!("Rate limit: {:?}", limit);
                Some(limit)
            }
            Err(err) => {
                debug!("No rate limit headers: {}", err);
                None
            }
        }
    }

    /// Reset moment formatted for display, `None` when the timestamp is out of range.
    pub fn reset_time(&self) -> Option<String> {
        Utc.timestamp_opt(self.reset, 0)
            .single()
            .map(|reset| reset.format("%Y-%m-%d %H:%M:%S UTC").to_string())
    }
}

/// Returns the exhausted rate limit when `status` is GitHub's answer to a client over its quota.
pub(crate) fn exhausted(status: StatusCode, headers: &HeaderMap<HeaderValue>) -> Option<RateLimit> {
    if status != StatusCode::FORBIDDEN && status != StatusCode::TOO_MANY_REQUESTS {
        return None;
    }
    let limit = RateLimit::from_headers(headers).filter(|limit| limit.remaining == 0)?;
    info!("API rate limit exhausted until {}", limit.reset);
    Some(limit)
}

fn read_header<T>(headers: &HeaderMap<HeaderValue>, header: &str) -> anyhow::Result<T>
where
    T: FromStr,
    <T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    let header = headers
        .get(header)
        .ok_or_else(|| anyhow!("Header {} not found", header))?
        .to_str()?;
    Ok(header.parse::<T>()?)
}

#[test]
fn exhausted_test() -> anyhow::Result<()> {
    let mut headers = HeaderMap::new();
    headers.insert("x-ratelimit-remaining", HeaderValue::from_str("0")?);
    headers.insert("x-ratelimit-reset", HeaderValue::from_str("1700000000")?);

    let limit = exhausted(StatusCode::FORBIDDEN, &headers);
    assert_eq!(limit, Some(RateLimit::new(0, 1700000000)));
    assert_eq!(
        limit.and_then(|limit| limit.reset_time()),
        Some("2023-11-14 22:13:20 UTC".to_string())
    );

    assert_eq!(exhausted(StatusCode::NOT_FOUND, &headers), None);

    headers.insert("x-ratelimit-remaining", HeaderValue::from_str("12")?);
    assert_eq!(exhausted(StatusCode::FORBIDDEN, &headers), None);
    Ok(())
}

#[test]
fn missing_headers_test() {
    let headers = HeaderMap::new();
    assert_eq!(RateLimit::from_headers(&headers), None);
    assert_eq!(exhausted(StatusCode::TOO_MANY_REQUESTS, &headers), None);
}
