//! Session configuration, resolved once at startup.
//!
//! The role of a connection is decided by tokens that arrive out-of-band (in a
//! browser they live in the page's query string). They are parsed here into an
//! explicit [`SessionConfig`] that the session core receives as a value.

use url::Url;

use crate::error::ConfigError;

/// Default WebSocket URL of the game authority
pub const DEFAULT_SERVER_URL: &str = "ws://localhost:8001/";

/// Default page URL that shareable links point at
pub const DEFAULT_PAGE_URL: &str = "http://localhost:8000/";

pub const SERVER_URL_VAR: &str = "CONNECT4_SERVER_URL";
pub const PAGE_URL_VAR: &str = "CONNECT4_PAGE_URL";
pub const JOIN_TOKEN_VAR: &str = "CONNECT4_JOIN";
pub const WATCH_TOKEN_VAR: &str = "CONNECT4_WATCH";

/// Role tokens supplied out-of-band.
///
/// Empty values are normalized to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AmbientTokens {
    pub join: Option<String>,
    pub watch: Option<String>,
}

impl AmbientTokens {
    pub fn new(join: Option<String>, watch: Option<String>) -> Self {
        Self {
            join: join.filter(|token| !token.is_empty()),
            watch: watch.filter(|token| !token.is_empty()),
        }
    }

    /// Parse a query string such as `?join=abc` or `watch=xyz&foo=1`.
    ///
    /// Like `URLSearchParams.get`, the first occurrence of a key wins.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut join = None;
        let mut watch = None;

        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "join" if join.is_none() => join = Some(value.into_owned()),
                "watch" if watch.is_none() => watch = Some(value.into_owned()),
                _ => {}
            }
        }

        Self::new(join, watch)
    }

    /// Extract tokens from a full shared link.
    pub fn from_url(url: &Url) -> Self {
        url.query().map(Self::from_query).unwrap_or_default()
    }

    /// Overlay `other` on top of `self`; tokens present in `other` win.
    pub fn merged_with(self, other: AmbientTokens) -> Self {
        Self {
            join: other.join.or(self.join),
            watch: other.watch.or(self.watch),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.join.is_none() && self.watch.is_none()
    }
}

/// Builds the links a player shares to invite an opponent or spectators.
#[derive(Debug, Clone)]
pub struct ShareLinks {
    page_url: Url,
}

impl ShareLinks {
    pub fn new(page_url: Url) -> Self {
        Self { page_url }
    }

    pub fn join_link(&self, token: &str) -> String {
        self.link("join", token)
    }

    pub fn watch_link(&self, token: &str) -> String {
        self.link("watch", token)
    }

    fn link(&self, key: &str, token: &str) -> String {
        let mut url = self.page_url.clone();
        url.set_fragment(None);
        url.set_query(None);
        url.query_pairs_mut().append_pair(key, token);
        url.to_string()
    }
}

/// Everything a session needs before the connection opens.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub server_url: String,
    pub page_url: Url,
    pub tokens: AmbientTokens,
}

impl SessionConfig {
    /// Build a configuration from explicit values.
    pub fn new(
        server_url: &str,
        page_url: &str,
        tokens: AmbientTokens,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            server_url: parse_server_url(server_url)?,
            page_url: parse_url("page", page_url)?,
            tokens,
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Call `dotenvy::dotenv()` first if a `.env` file should be honoured.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_url = lookup(SERVER_URL_VAR).unwrap_or_else(|| DEFAULT_SERVER_URL.into());
        let page_url = lookup(PAGE_URL_VAR).unwrap_or_else(|| DEFAULT_PAGE_URL.into());
        let tokens = AmbientTokens::new(lookup(JOIN_TOKEN_VAR), lookup(WATCH_TOKEN_VAR));

        Self::new(&server_url, &page_url, tokens)
    }

    pub fn share_links(&self) -> ShareLinks {
        ShareLinks::new(self.page_url.clone())
    }
}

fn parse_url(name: &'static str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|source| ConfigError::InvalidUrl {
        name,
        value: value.to_string(),
        source,
    })
}

fn parse_server_url(value: &str) -> Result<String, ConfigError> {
    let url = parse_url("server", value)?;
    match url.scheme() {
        "ws" | "wss" => Ok(value.to_string()),
        _ => Err(ConfigError::UnsupportedScheme(value.to_string())),
    }
}
