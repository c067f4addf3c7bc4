use std::fmt;
use std::time::Duration;

use clap::Args;

use crate::Credentials;

pub const DEFAULT_API: &str = "https://www.instapaper.com/api";

/// Connection and account settings. Every flag can also come from the
/// environment.
#[derive(Clone, Args)]
pub struct Config {
    /// OAuth consumer key of the application.
    #[arg(long, env = "IP_OAUTH_CONSUMER_ID")]
    pub consumer_key: String,

    /// OAuth consumer secret of the application.
    #[arg(long, env = "IP_OAUTH_CONSUMER_SECRET", hide_env_values = true)]
    pub consumer_secret: String,

    /// Base URL of the API.
    #[arg(long, env = "IP_API", default_value = DEFAULT_API)]
    pub api: String,

    /// API version path segment.
    #[arg(long, env = "IP_API_VERSION", default_value = "1")]
    pub api_version: String,

    /// Access-token endpoint, relative to the versioned API root.
    #[arg(long, env = "IP_ACCESS_TOKEN_ENDPOINT", default_value = "oauth/access_token")]
    pub access_token_endpoint: String,

    /// Account username (usually an email address).
    #[arg(long = "user", env = "IP_USER")]
    pub username: String,

    /// Account password.
    #[arg(long, env = "IP_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Per-request timeout in seconds.
    #[arg(
        long,
        env = "IP_TIMEOUT_SECS",
        default_value = "10",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_secs: u64,
}

impl Config {
    /// `{api}/{api_version}`, without a trailing slash.
    pub fn api_root(&self) -> String {
        format!(
            "{}/{}",
            self.api.trim_end_matches('/'),
            self.api_version.trim_matches('/')
        )
    }

    /// `{api}/{api_version}/{access_token_endpoint}`.
    pub fn access_token_url(&self) -> String {
        format!(
            "{}/{}",
            self.api_root(),
            self.access_token_endpoint.trim_start_matches('/')
        )
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(
            self.consumer_key.as_str(),
            self.consumer_secret.as_str(),
            self.username.as_str(),
            self.password.as_str(),
        )
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("consumer_key", &self.consumer_key)
            .field("api", &self.api)
            .field("api_version", &self.api_version)
            .field("access_token_endpoint", &self.access_token_endpoint)
            .field("username", &self.username)
            .field("timeout_secs", &self.timeout_secs)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::SecretsProvider;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        config: Config,
    }

    fn parse(extra: &[&str]) -> Config {
        let mut args = vec![
            "test",
            "--consumer-key",
            "ck",
            "--consumer-secret",
            "cs",
            "--user",
            "jane@example.test",
            "--password",
            "hunter2",
        ];
        args.extend_from_slice(extra);
        TestCli::parse_from(args).config
    }

    #[test]
    fn urls_from_explicit_values() {
        let config = parse(&[
            "--api",
            "https://example.test/api/",
            "--api-version",
            "1.1",
            "--access-token-endpoint",
            "/oauth/access_token",
        ]);
        assert_eq!(config.api_root(), "https://example.test/api/1.1");
        assert_eq!(
            config.access_token_url(),
            "https://example.test/api/1.1/oauth/access_token"
        );
    }

    #[test]
    fn timeout_flag() {
        let config = parse(&["--timeout-secs", "3"]);
        assert_eq!(config.timeout(), Duration::from_secs(3));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let result = TestCli::try_parse_from([
            "test",
            "--consumer-key",
            "ck",
            "--consumer-secret",
            "cs",
            "--user",
            "jane@example.test",
            "--password",
            "hunter2",
            "--timeout-secs",
            "0",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn credentials_bind_user_and_password() {
        let credentials = parse(&[]).credentials();
        assert_eq!(credentials.username(), "jane@example.test");
        assert_eq!(credentials.password(), "hunter2");
        assert_eq!(credentials.get_consumer_key_pair(), ("ck", "cs"));
    }

    #[test]
    fn debug_hides_secrets() {
        let printed = format!("{:?}", parse(&[]));
        assert!(printed.contains("jane@example.test"));
        assert!(!printed.contains("hunter2"));
        assert!(!printed.contains("\"cs\""));
    }
}
