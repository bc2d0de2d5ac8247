//! Client for the places registry.

use tracing::debug;

use cachecache_common::types::parse_places;
use cachecache_common::{Place, WirePlace};

use crate::error::{ClientError, Result};
use crate::http_client;

pub struct PlacesClient {
    client: reqwest::Client,
    base_url: String,
}

impl PlacesClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: http_client(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Every place the registry knows. Records with unparseable coordinates
    /// are dropped at this boundary; the map core only sees finite points.
    pub async fn fetch_all(&self) -> Result<Vec<Place>> {
        let wire = self.get_places(&format!("{}/places", self.base_url)).await?;
        Ok(parse_places(wire))
    }

    /// Search the registry. Zero matches is an ordinary empty result.
    pub async fn search(&self, query: &str) -> Result<Vec<Place>> {
        let url = format!("{}/places/search?query={}", self.base_url, urlencode(query));
        let wire = self.get_places(&url).await?;
        debug!(query = %query, matches = wire.len(), "Place search");
        Ok(parse_places(wire))
    }

    /// Resolve a single place by exact name. The registry has no by-name
    /// endpoint, so this searches and filters.
    pub async fn get(&self, name: &str) -> Result<Option<Place>> {
        let matches = self.search(name).await?;
        Ok(matches.into_iter().find(|p| p.name == name))
    }

    async fn get_places(&self, url: &str) -> Result<Vec<WirePlace>> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(ClientError::Api { status: status.as_u16(), message });
        }
        Ok(resp.json().await?)
    }
}

/// Percent-encode the characters that matter in a query-string value.
fn urlencode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urlencode_escapes_reserved_characters() {
        assert_eq!(urlencode("Louvre"), "Louvre");
        assert_eq!(urlencode("Notre Dame"), "Notre%20Dame");
        assert_eq!(urlencode("Panthéon"), "Panth%C3%A9on");
        assert_eq!(urlencode("a&b=c"), "a%26b%3Dc");
    }
}
