//! Wire shapes of the remote collection and their mapping to quotes.

use quotesync_core::ExternalId;
use quotesync_core::Quote;
use quotesync_core::constants::DEFAULT_REMOTE_CATEGORY;
use serde::{Deserialize, Serialize};

/// Item as returned by `GET <remote-url>`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RemotePost {
    pub id: ExternalId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

/// Create request sent by `POST <remote-url>`.
#[derive(Debug, Serialize)]
pub(crate) struct NewPost<'a> {
    pub title: &'a str,
    pub body: &'a str,
    #[serde(rename = "userId")]
    pub user_id: u64,
}

/// Echo returned for an accepted create.
#[derive(Debug, Deserialize)]
pub(crate) struct PostEcho {
    #[serde(default)]
    pub id: Option<ExternalId>,
}

/// Acknowledgement for one record accepted by the remote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteAck {
    pub local_id: String,
    /// Id the remote assigned, when the echo carried one.
    pub remote_id: Option<ExternalId>,
}

/// Maps a remote item into a quote; items with a blank body are dropped.
pub(crate) fn map_remote_post(post: RemotePost) -> Option<Quote> {
    let text = post.body.as_deref().map(str::trim).unwrap_or_default();
    if text.is_empty() {
        return None;
    }
    let category = post
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_REMOTE_CATEGORY);
    Some(Quote::from_remote(&post.id, text.to_owned(), category.to_owned()))
}
