use crate::client::{ApiClient, RequestDescriptor};
use crate::error::Result;
use crate::types::{Magnet, StatusMessage};

impl ApiClient {
    /// `GET /magnets`
    pub async fn list_magnets(&self) -> Result<Vec<Magnet>> {
        self.execute_json(RequestDescriptor::get("/magnets")).await
    }

    /// `GET /magnets/rss/{rssId}`
    pub async fn magnets_for_feed(&self, rss_id: i64) -> Result<Vec<Magnet>> {
        self.execute_json(RequestDescriptor::get(format!("/magnets/rss/{rss_id}")))
            .await
    }

    /// `DELETE /magnets/{id}`
    pub async fn delete_magnet(&self, magnet_id: i64) -> Result<StatusMessage> {
        self.execute_json(RequestDescriptor::delete(format!("/magnets/{magnet_id}")))
            .await
    }

    /// `POST /magnets/{id}/retry`
    pub async fn retry_magnet(&self, magnet_id: i64) -> Result<StatusMessage> {
        self.execute_json(RequestDescriptor::post(format!("/magnets/{magnet_id}/retry")))
            .await
    }
}
