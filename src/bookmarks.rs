use serde::de::Error as _;
use serde::Serialize;
use tracing::{debug, warn};

use crate::models::{Bookmark, BookmarkCollectionResponse, User};
use crate::transport::HttpResponse;
use crate::{Error, Result, Session, Transport};

const BOOKMARKS_LIST: &str = "bookmarks/list";
const BOOKMARKS_GET_TEXT: &str = "bookmarks/get_text";
const VERIFY_CREDENTIALS: &str = "account/verify_credentials";

/// Bookmarks API over an authorized [`Session`].
#[derive(Debug)]
pub struct BookmarkClient<TTransport> {
    session: Session<TTransport>,
    api_root: String,
}

impl<TTransport> BookmarkClient<TTransport>
where
    TTransport: Transport,
{
    /// `api_root` is the versioned base, e.g. `https://www.instapaper.com/api/1`.
    pub fn new<U: Into<String>>(session: Session<TTransport>, api_root: U) -> Self {
        BookmarkClient {
            session,
            api_root: api_root.into().trim_end_matches('/').to_owned(),
        }
    }

    pub fn session(&self) -> &Session<TTransport> {
        &self.session
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_root, path)
    }

    /// Fetch up to `limit` bookmarks with the user and highlights that come
    /// with them.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] for a negative `limit`, before anything is
    /// sent.
    pub fn list_bookmark_collection(&self, limit: i64) -> Result<BookmarkCollectionResponse> {
        if limit < 0 {
            return Err(Error::InvalidArgument(format!(
                "limit must not be negative, got {}",
                limit
            )));
        }
        let response = self.call(BOOKMARKS_LIST, &[("limit", limit.to_string())])?;
        let collection: BookmarkCollectionResponse = serde_json::from_str(&response.body)?;
        debug!(
            count = collection.bookmarks.len(),
            limit, "bookmarks listed"
        );
        Ok(collection)
    }

    /// Fetch up to `limit` bookmarks, in the order the server returns them.
    pub fn list_bookmarks(&self, limit: i64) -> Result<Vec<Bookmark>> {
        Ok(self.list_bookmark_collection(limit)?.bookmarks)
    }

    /// Titles of up to `limit` bookmarks.
    pub fn bookmark_titles(&self, limit: i64) -> Result<Vec<String>> {
        Ok(self
            .list_bookmarks(limit)?
            .into_iter()
            .map(|bookmark| bookmark.title)
            .collect())
    }

    /// Raw HTML of a bookmark's processed text.
    pub fn get_bookmark_text(&self, bookmark_id: i64) -> Result<String> {
        let response = self.call(BOOKMARKS_GET_TEXT, &[("bookmark_id", bookmark_id.to_string())])?;
        Ok(response.body)
    }

    /// The account the access token belongs to.
    pub fn verify_credentials(&self) -> Result<User> {
        let response = self.call(VERIFY_CREDENTIALS, &[] as &[(&str, &str)])?;
        let users: Vec<User> = serde_json::from_str(&response.body)?;
        users.into_iter().next().ok_or_else(|| {
            Error::MalformedResponse(serde_json::Error::custom(
                "verify_credentials returned no user",
            ))
        })
    }

    fn call<K, V>(&self, path: &str, form: &[(K, V)]) -> Result<HttpResponse>
    where
        K: Serialize,
        V: Serialize,
    {
        let response = self.session.post(&self.endpoint(path), form)?;
        if !response.is_ok() {
            warn!(path, status = response.status, "API request failed");
            return Err(Error::ApiRequestFailed {
                status: response.status,
                body: response.body,
            });
        }
        Ok(response)
    }
}
