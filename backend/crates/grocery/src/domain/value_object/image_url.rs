//! Image URL Value Object
//!
//! Absolute `http`/`https` URL whose host is a name with a top-level domain,
//! an IPv4 address, or a bracketed IPv6 address. Single-label hosts such as
//! `localhost` are rejected. Only the authority is checked closely; the path
//! and query just have to be free of whitespace and control characters.

use std::net::{Ipv4Addr, Ipv6Addr};

use kernel::error::app_error::{AppError, AppResult};

pub const IMAGE_URL_MAX_LENGTH: usize = 2048;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrl(String);

impl ImageUrl {
    pub fn new(value: impl AsRef<str>) -> AppResult<Self> {
        let value = value.as_ref().trim();

        if value.len() > IMAGE_URL_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "imageUrl must be at most {} characters",
                IMAGE_URL_MAX_LENGTH
            )));
        }

        if !Self::is_valid(value) {
            return Err(AppError::bad_request("imageUrl must be a URL address")
                .with_action("Use an absolute http or https URL"));
        }

        Ok(Self(value.to_owned()))
    }

    fn is_valid(value: &str) -> bool {
        if value.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return false;
        }

        let Some((scheme, rest)) = value.split_once("://") else {
            return false;
        };
        if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
            return false;
        }

        let authority = rest
            .split(['/', '?', '#'])
            .next()
            .unwrap_or_default();
        // Drop userinfo
        let host_port = authority.rsplit_once('@').map_or(authority, |(_, hp)| hp);

        // `[v6]` or `[v6]:port`
        if let Some(bracketed) = host_port.strip_prefix('[') {
            let Some((host, rest)) = bracketed.split_once(']') else {
                return false;
            };
            let port_ok = match rest.strip_prefix(':') {
                Some(port) => Self::is_valid_port(port),
                None => rest.is_empty(),
            };
            return port_ok && host.parse::<Ipv6Addr>().is_ok();
        }

        let (host, port) = match host_port.rsplit_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (host_port, None),
        };

        if port.is_some_and(|port| !Self::is_valid_port(port)) {
            return false;
        }

        Self::is_valid_host(host)
    }

    fn is_valid_port(port: &str) -> bool {
        !port.is_empty() && port.parse::<u16>().is_ok()
    }

    fn is_valid_host(host: &str) -> bool {
        if host.parse::<Ipv4Addr>().is_ok() {
            return true;
        }

        let labels: Vec<&str> = host.split('.').collect();
        let Some(tld) = labels.last() else {
            return false;
        };

        labels.len() >= 2
            && tld.len() >= 2
            && tld.chars().all(|c| c.is_ascii_alphabetic())
            && labels.iter().all(|label| {
                !label.is_empty()
                    && label.len() <= 63
                    && !label.starts_with('-')
                    && !label.ends_with('-')
                    && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
            })
    }

    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_urls() {
        for url in [
            "https://example.com/images/bananas.jpg",
            "http://cdn.market.co.uk:8080/a/b.png?size=large#top",
            "HTTPS://EXAMPLE.COM",
            "http://192.168.0.10/img.png",
            "http://[::1]/a.png",
            "https://[2001:db8::7]:8443/a.png",
        ] {
            assert!(ImageUrl::new(url).is_ok(), "{url} should be accepted");
        }
    }

    #[test]
    fn test_invalid_urls() {
        for url in [
            "",
            "bananas.jpg",
            "ftp://example.com/bananas.jpg",
            "javascript:alert(1)",
            "https://",
            "https://example",
            "https://exa mple.com/x.png",
            "https://-example.com",
            "https://example.com:99999/x.png",
            "https://example.com:/x.png",
            "http://localhost:3000/img.png",
            "http://[::1/a.png",
            "http://[::1]x/a.png",
            "http://[not-an-ip]/a.png",
            "http://[::1]:99999/a.png",
        ] {
            assert!(ImageUrl::new(url).is_err(), "{url} should be rejected");
        }
    }
}
