//! HTTP utilities for ESPN API communication

use crate::Result;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, COOKIE},
    Client,
};

pub const USER_AGENT: &str = concat!("espn-flb-stats/", env!("CARGO_PKG_VERSION"));

/// Headers sent with every ESPN request.
///
/// Adds the `SWID`/`espn_s2` cookie when both `ESPN_SWID` and `ESPN_S2` are set
/// (private leagues); public leagues need neither.
pub fn common_headers() -> Result<HeaderMap> {
    let mut h = HeaderMap::new();
    h.insert(ACCEPT, HeaderValue::from_static("application/json"));

    let swid = std::env::var("ESPN_SWID").ok();
    let s2 = std::env::var("ESPN_S2").ok();
    if let (Some(swid), Some(s2)) = (swid, s2) {
        let cookie = format!("SWID={}; espn_s2={}", swid, s2);
        h.insert(COOKIE, HeaderValue::from_str(&cookie)?);
    }
    Ok(h)
}

/// Shared client for ESPN and the sinks. No client-wide timeout.
pub fn build_http_client() -> Result<Client> {
    Ok(Client::builder().user_agent(USER_AGENT).build()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Both env-var cases live in one test so parallel tests never race on them.
    #[test]
    fn test_common_headers_cookie_handling() {
        std::env::remove_var("ESPN_SWID");
        std::env::remove_var("ESPN_S2");

        let headers = common_headers().unwrap();
        assert_eq!(headers.get(ACCEPT).unwrap(), "application/json");
        assert!(!headers.contains_key(COOKIE));

        std::env::set_var("ESPN_SWID", "{test-swid}");
        let headers = common_headers().unwrap();
        assert!(!headers.contains_key(COOKIE));

        std::env::set_var("ESPN_S2", "test_s2");
        let headers = common_headers().unwrap();
        assert_eq!(
            headers.get(COOKIE).unwrap(),
            "SWID={test-swid}; espn_s2=test_s2"
        );

        std::env::remove_var("ESPN_SWID");
        std::env::remove_var("ESPN_S2");
    }

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client().is_ok());
        assert!(USER_AGENT.starts_with("espn-flb-stats/"));
    }
}
