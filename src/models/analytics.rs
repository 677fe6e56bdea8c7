//! Daily page-view aggregate model

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use utoipa::ToSchema;

/// One row per UTC calendar day
///
/// `page_views` always equals the sum of `pages`, and `visitors` never
/// exceeds `page_views`.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DailyAnalytics {
    pub date: NaiveDate,
    pub visitors: i64,
    pub page_views: i64,
    /// Request path -> view count
    pub pages: Json<BTreeMap<String, i64>>,
    pub updated_at: DateTime<Utc>,
}

impl DailyAnalytics {
    /// Row created by the first page view of `date`
    pub fn first_view(date: NaiveDate, path: &str, is_new_visitor: bool) -> Self {
        let mut pages = BTreeMap::new();
        pages.insert(path.to_string(), 1);
        Self {
            date,
            visitors: i64::from(is_new_visitor),
            page_views: 1,
            pages: Json(pages),
            updated_at: Utc::now(),
        }
    }

    /// Merge one more page view into an existing row
    pub fn add_view(&mut self, path: &str, is_new_visitor: bool) {
        self.visitors += i64::from(is_new_visitor);
        self.page_views += 1;
        *self.pages.0.entry(path.to_string()).or_insert(0) += 1;
        self.updated_at = Utc::now();
    }
}

/// Page-view event sent by the site's tracker
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrackRequest {
    /// Requested route, e.g. `/offres`
    pub path: Option<String>,
    /// True on the first tracked request of a browsing session
    #[serde(default)]
    pub is_new_visitor: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 14).unwrap()
    }

    #[test]
    fn first_view_counts_one_page_view() {
        let row = DailyAnalytics::first_view(day(), "/", true);
        assert_eq!(row.visitors, 1);
        assert_eq!(row.page_views, 1);
        assert_eq!(row.pages.0.get("/"), Some(&1));

        let row = DailyAnalytics::first_view(day(), "/", false);
        assert_eq!(row.visitors, 0);
    }

    #[test]
    fn add_view_keeps_histogram_in_sync() {
        let mut row = DailyAnalytics::first_view(day(), "/", true);
        row.add_view("/offres", false);
        row.add_view("/", false);
        row.add_view("/contact", true);

        assert_eq!(row.page_views, 4);
        assert_eq!(row.visitors, 2);
        assert_eq!(row.pages.0.values().sum::<i64>(), row.page_views);
        assert_eq!(row.pages.0.get("/"), Some(&2));
    }

    #[test]
    fn track_request_defaults_to_returning_visitor() {
        let req: TrackRequest = serde_json::from_str(r#"{"path":"/blog"}"#).unwrap();
        assert_eq!(req.path.as_deref(), Some("/blog"));
        assert!(!req.is_new_visitor);

        let req: TrackRequest = serde_json::from_str(r#"{"isNewVisitor":true}"#).unwrap();
        assert!(req.path.is_none());
        assert!(req.is_new_visitor);
    }
}
