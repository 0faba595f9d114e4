use async_trait::async_trait;

use crate::{
    collector::HistorySource, error::CollectError, spotify::client::ApiClient,
    types::RecentlyPlayedResponse,
};

/// Fetches one page of the user's recently played tracks, ending strictly
/// before `before` (epoch milliseconds).
///
/// The response is passed through as received: items in provider order
/// (most recent first) and the cursor object untouched.
pub async fn get_recently_played(
    client: &ApiClient,
    before: i64,
    limit: u32,
) -> Result<RecentlyPlayedResponse, CollectError> {
    client
        .get(
            "/me/player/recently-played",
            &[("before", before.to_string()), ("limit", limit.to_string())],
        )
        .await
}

#[async_trait]
impl HistorySource for ApiClient {
    async fn recently_played(
        &self,
        before: i64,
        limit: u32,
    ) -> Result<RecentlyPlayedResponse, CollectError> {
        get_recently_played(self, before, limit).await
    }
}
