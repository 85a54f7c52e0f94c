use serde::Deserialize;

/// Main configuration structure for the scraper
///
/// Every section is optional; an empty file yields [`Config::default`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub http: HttpConfig,
    pub output: OutputConfig,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: Option<String>,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: env!("CARGO_PKG_NAME").to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: None,
        }
    }
}

impl UserAgentConfig {
    /// Formats the User-Agent header value
    ///
    /// Format: `CrawlerName/Version` or `CrawlerName/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        match &self.contact_url {
            Some(contact) => format!(
                "{}/{} (+{})",
                self.crawler_name, self.crawler_version, contact
            ),
            None => format!("{}/{}", self.crawler_name, self.crawler_version),
        }
    }
}

/// HTTP transport configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Overall request timeout in seconds; 0 disables it
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Connection timeout in seconds; 0 disables it
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,
}

/// Output rendering configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Number of spaces used to indent pretty-printed JSON
    pub indent: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { indent: 4 }
    }
}
