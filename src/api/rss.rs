use futures::future::join_all;

use crate::client::{ApiClient, RequestDescriptor};
use crate::error::{FeedError, Result};
use crate::types::{FeedCreated, FeedPatch, FeedRename, FeedUpdate, NewFeed, RssFeed, StatusMessage};

impl ApiClient {
    /// `GET /rss`
    pub async fn list_feeds(&self) -> Result<Vec<RssFeed>> {
        self.execute_json(RequestDescriptor::get("/rss")).await
    }

    /// `GET /rss/{id}`
    pub async fn get_feed(&self, rss_id: i64) -> Result<RssFeed> {
        self.execute_json(RequestDescriptor::get(format!("/rss/{rss_id}")))
            .await
    }

    /// `POST /rss`
    pub async fn create_feed(&self, feed: &NewFeed) -> Result<FeedCreated> {
        self.execute_json(RequestDescriptor::post("/rss").json(feed)?)
            .await
    }

    /// `DELETE /rss/{id}`
    pub async fn delete_feed(&self, rss_id: i64) -> Result<StatusMessage> {
        self.execute_json(RequestDescriptor::delete(format!("/rss/{rss_id}")))
            .await
    }

    /// `PUT /rss/{id}`
    pub async fn update_feed(&self, rss_id: i64, update: &FeedUpdate) -> Result<StatusMessage> {
        self.execute_json(RequestDescriptor::put(format!("/rss/{rss_id}")).json(update)?)
            .await
    }

    /// `PATCH /rss/{id}`. An empty patch is rejected without a request.
    pub async fn patch_feed(&self, rss_id: i64, patch: &FeedPatch) -> Result<StatusMessage> {
        if patch.is_empty() {
            return Err(FeedError::InvalidArgument(
                "feed patch has no fields to update".to_string(),
            ));
        }
        self.execute_json(RequestDescriptor::patch(format!("/rss/{rss_id}")).json(patch)?)
            .await
    }

    /// `PATCH /rss/{id}/rename`
    pub async fn rename_feed(&self, rss_id: i64, rename: &FeedRename) -> Result<StatusMessage> {
        self.execute_json(
            RequestDescriptor::patch(format!("/rss/{rss_id}/rename")).json(rename)?,
        )
        .await
    }

    /// `POST /rss/{id}/refresh`
    pub async fn refresh_feed(&self, rss_id: i64) -> Result<StatusMessage> {
        self.execute_json(RequestDescriptor::post(format!("/rss/{rss_id}/refresh")))
            .await
    }

    /// Refresh several feeds concurrently.
    ///
    /// Issues one independent request per id and resolves once every one of
    /// them has settled. Results keep the order of `rss_ids`.
    pub async fn refresh_feeds(&self, rss_ids: &[i64]) -> Vec<(i64, Result<StatusMessage>)> {
        let requests = rss_ids
            .iter()
            .map(|&rss_id| async move { (rss_id, self.refresh_feed(rss_id).await) });
        join_all(requests).await
    }
}
