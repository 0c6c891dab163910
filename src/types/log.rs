use bon::Builder;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Level filter for `GET /logs`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum LogLevel {
    #[default]
    All,
    Trace,
    Debug,
    Info,
    Success,
    Warning,
    Error,
    Critical,
}

/// Filter and page selection for `GET /logs`.
///
/// ```
/// use feedctl::types::{LogLevel, LogQuery};
///
/// let query = LogQuery::builder().level(LogLevel::Error).page(2).build();
/// assert_eq!(query.page_size, 20);
/// assert!(query.include_details);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct LogQuery {
    #[builder(default)]
    pub level: LogLevel,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[builder(default = true)]
    pub include_details: bool,
    #[builder(default = 1)]
    pub page: u32,
    #[builder(default = 20)]
    pub page_size: u32,
}

impl Default for LogQuery {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl LogQuery {
    /// Query string pairs in the order the service documents them. Unset
    /// dates are sent as empty strings.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let date = |d: Option<NaiveDate>| {
            d.map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default()
        };
        vec![
            ("level".to_string(), self.level.to_string()),
            ("start_date".to_string(), date(self.start_date)),
            ("end_date".to_string(), date(self.end_date)),
            ("include_details".to_string(), self.include_details.to_string()),
            ("page".to_string(), self.page.to_string()),
            ("page_size".to_string(), self.page_size.to_string()),
        ]
    }
}

/// One page of application log lines, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogPage {
    #[serde(default)]
    pub logs: Vec<String>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u64,
}
