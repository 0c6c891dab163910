use crate::client::{ApiClient, RequestDescriptor};
use crate::error::{FeedError, Result};
use crate::types::{LogPage, LogQuery, LoginLogs};

impl ApiClient {
    /// `GET /logs`
    pub async fn fetch_logs(&self, query: &LogQuery) -> Result<LogPage> {
        validate(query)?;
        let mut request = RequestDescriptor::get("/logs");
        request.query = query.to_query_pairs();
        self.execute_json(request).await
    }

    /// `GET /login_logs`
    pub async fn login_logs(&self) -> Result<LoginLogs> {
        self.execute_json(RequestDescriptor::get("/login_logs"))
            .await
    }
}

fn validate(query: &LogQuery) -> Result<()> {
    if query.page == 0 || query.page_size == 0 {
        return Err(FeedError::InvalidArgument(
            "page and page_size start at 1".to_string(),
        ));
    }
    if let (Some(start), Some(end)) = (query.start_date, query.end_date) {
        if start > end {
            return Err(FeedError::InvalidArgument(format!(
                "start date {start} is after end date {end}"
            )));
        }
    }
    Ok(())
}
