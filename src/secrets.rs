use std::borrow::Cow;
use std::fmt;

pub trait SecretsProvider {
    fn get_consumer_key_pair(&self) -> (&str, &str);

    fn get_token_pair_option(&self) -> Option<(&str, &str)>;

    fn get_token_option_pair(&self) -> (Option<&str>, Option<&str>) {
        self.get_token_pair_option()
            .map(|s| (Some(s.0), Some(s.1)))
            .unwrap_or((None, None))
    }
}

/// Consumer key pair, optionally with a token pair.
///
/// `Secrets<'a, ()>` signs the token exchange itself; after
/// [`Secrets::token`] it signs authorized calls.
#[derive(Clone)]
pub struct Secrets<'a, T> {
    token: T,
    token_secret: T,
    consumer_key: Cow<'a, str>,
    consumer_secret: Cow<'a, str>,
}

impl<'a> Secrets<'a, ()> {
    pub fn new<TKey, TSecret>(consumer_key: TKey, consumer_secret: TSecret) -> Self
    where
        TKey: Into<Cow<'a, str>>,
        TSecret: Into<Cow<'a, str>>,
    {
        Secrets {
            token: (),
            token_secret: (),
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
        }
    }

    pub fn token<TKey, TSecret>(
        self,
        token: TKey,
        token_secret: TSecret,
    ) -> Secrets<'a, Cow<'a, str>>
    where
        TKey: Into<Cow<'a, str>>,
        TSecret: Into<Cow<'a, str>>,
    {
        Secrets {
            token: token.into(),
            token_secret: token_secret.into(),
            consumer_key: self.consumer_key,
            consumer_secret: self.consumer_secret,
        }
    }

    /// Attach an access token obtained from the xAuth exchange.
    pub fn access_token(self, token: AccessToken) -> Secrets<'a, Cow<'a, str>> {
        self.token(token.token, token.secret)
    }
}

impl SecretsProvider for Secrets<'_, ()> {
    fn get_consumer_key_pair(&self) -> (&str, &str) {
        (&self.consumer_key, &self.consumer_secret)
    }

    fn get_token_pair_option(&self) -> Option<(&str, &str)> {
        None
    }
}

impl SecretsProvider for Secrets<'_, Cow<'_, str>> {
    fn get_consumer_key_pair(&self) -> (&str, &str) {
        (&self.consumer_key, &self.consumer_secret)
    }

    fn get_token_pair_option(&self) -> Option<(&str, &str)> {
        Some((&self.token, &self.token_secret))
    }
}

impl<T> fmt::Debug for Secrets<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secrets")
            .field("consumer_key", &self.consumer_key)
            .finish_non_exhaustive()
    }
}

/// Everything needed for the xAuth exchange: consumer key pair plus the
/// account's username and password.
#[derive(Clone)]
pub struct Credentials {
    consumer_key: String,
    consumer_secret: String,
    username: String,
    password: String,
}

impl Credentials {
    pub fn new<A, B, C, D>(consumer_key: A, consumer_secret: B, username: C, password: D) -> Self
    where
        A: Into<String>,
        B: Into<String>,
        C: Into<String>,
        D: Into<String>,
    {
        Credentials {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Consumer key pair without a token, borrowed from these credentials.
    pub fn consumer(&self) -> Secrets<'_, ()> {
        Secrets::new(self.consumer_key.as_str(), self.consumer_secret.as_str())
    }
}

impl SecretsProvider for Credentials {
    fn get_consumer_key_pair(&self) -> (&str, &str) {
        (&self.consumer_key, &self.consumer_secret)
    }

    fn get_token_pair_option(&self) -> Option<(&str, &str)> {
        None
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &self.consumer_key)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Access token pair returned by the xAuth exchange.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub token: String,
    pub secret: String,
}

impl AccessToken {
    pub fn new<T: Into<String>, S: Into<String>>(token: T, secret: S) -> Self {
        AccessToken {
            token: token.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &self.token)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static CONSUMER_KEY: &str = "<CONSUMER_KEY>";
    static CONSUMER_SECRET: &str = "<CONSUMER_SECRET>";
    static TOKEN: &str = "<ACCESS_TOKEN>";
    static TOKEN_SECRET: &str = "<TOKEN_SECRET>";

    #[test]
    fn secrets_without_token() {
        let secrets = Secrets::new(CONSUMER_KEY, CONSUMER_SECRET);
        assert_eq!(
            secrets.get_consumer_key_pair(),
            (CONSUMER_KEY, CONSUMER_SECRET)
        );
        assert_eq!(secrets.get_token_option_pair(), (None, None));
    }

    #[test]
    fn secrets_with_access_token() {
        let secrets = Secrets::new(CONSUMER_KEY, CONSUMER_SECRET)
            .access_token(AccessToken::new(TOKEN, TOKEN_SECRET));
        assert_eq!(secrets.get_token_pair_option(), Some((TOKEN, TOKEN_SECRET)));
    }

    #[test]
    fn debug_hides_secret_material() {
        let credentials = Credentials::new(CONSUMER_KEY, CONSUMER_SECRET, "jane", "hunter2");
        let printed = format!("{:?}", credentials);
        assert!(printed.contains("jane"));
        assert!(!printed.contains("hunter2"));
        assert!(!printed.contains(CONSUMER_SECRET));

        let token = format!("{:?}", AccessToken::new(TOKEN, TOKEN_SECRET));
        assert!(!token.contains(TOKEN_SECRET));

        let secrets = format!(
            "{:?}",
            Secrets::new(CONSUMER_KEY, CONSUMER_SECRET).token(TOKEN, TOKEN_SECRET)
        );
        assert!(!secrets.contains(CONSUMER_SECRET));
        assert!(!secrets.contains(TOKEN_SECRET));
    }

    #[test]
    fn credentials_keep_username_and_password_apart() {
        let credentials = Credentials::new("ck", "cs", "user@example.test", "s3cret");
        assert_eq!(credentials.username(), "user@example.test");
        assert_eq!(credentials.password(), "s3cret");
        assert_eq!(credentials.consumer().get_consumer_key_pair(), ("ck", "cs"));
    }
}
