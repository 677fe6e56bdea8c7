//! Analytics aggregation service

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};

use crate::{
    api::analytics::{AnalyticsStats, Kpis, PageVisits, TrafficPoint, TrafficSource},
    error::{AppError, AppResult},
    models::{ContactRequest, DailyAnalytics, Subscriber},
    repository::Repository,
};

/// Number of pages listed in `pageData`
const TOP_PAGES: usize = 5;

/// Human-readable names for the site's main routes
const PAGE_NAMES: &[(&str, &str)] = &[
    ("/", "Home"),
    ("/offres", "Offers"),
    ("/solutions", "Solutions"),
    ("/industries", "Industries"),
    ("/contact", "Contact"),
    ("/blog", "Blog"),
    ("/tracking", "Tracking"),
];

/// Placeholder traffic-source split shown until referrers are tracked
const SOURCE_BREAKDOWN: &[(&str, u32, &str)] = &[
    ("Direct", 65, "#008080"),
    ("Google", 15, "#003366"),
    ("LinkedIn", 10, "#0077B5"),
    ("Others", 10, "#94A3B8"),
];

#[derive(Clone)]
pub struct AnalyticsService {
    repository: Repository,
    summary_days: i64,
}

impl AnalyticsService {
    pub fn new(repository: Repository, summary_days: i64) -> Self {
        Self {
            repository,
            summary_days: summary_days.max(1),
        }
    }

    /// Count one page view for today (UTC)
    pub async fn record(&self, path: &str, is_new_visitor: bool) -> AppResult<()> {
        if path.is_empty() {
            return Err(AppError::Validation("path is required".to_string()));
        }

        let today = Utc::now().date_naive();
        let row = self
            .repository
            .analytics
            .record_view(today, path, is_new_visitor)
            .await?;

        tracing::debug!(
            date = %row.date,
            path,
            page_views = row.page_views,
            "page view recorded"
        );
        Ok(())
    }

    /// Dashboard summary over the most recent days
    pub async fn summarize(&self) -> AppResult<AnalyticsStats> {
        let (days, contacts, subscribers) = tokio::try_join!(
            self.repository.analytics.recent(self.summary_days),
            self.repository.contacts.list(),
            self.repository.subscribers.list_active(),
        )?;

        Ok(summarize(&days, &contacts, &subscribers))
    }
}

/// Fold daily rows (newest first) and leads into dashboard statistics
pub fn summarize(
    days: &[DailyAnalytics],
    contacts: &[ContactRequest],
    subscribers: &[Subscriber],
) -> AnalyticsStats {
    let total_visitors: i64 = days.iter().map(|d| d.visitors).sum();
    let total_page_views: i64 = days.iter().map(|d| d.page_views).sum();
    let total_conversions = (contacts.len() + subscribers.len()) as i64;

    let kpis = Kpis {
        total_visitors,
        total_page_views,
        total_conversions,
        conversion_rate: conversion_rate(total_conversions, total_visitors),
    };

    let traffic_data = days
        .iter()
        .rev()
        .map(|day| TrafficPoint {
            date: day.date,
            visitors: day.visitors,
            page_views: day.page_views,
            conversions: conversions_on(day.date, contacts, subscribers),
        })
        .collect();

    AnalyticsStats {
        kpis,
        traffic_data,
        page_data: top_pages(days),
        source_data: SOURCE_BREAKDOWN
            .iter()
            .map(|(name, value, color)| TrafficSource {
                name: name.to_string(),
                value: *value,
                color: color.to_string(),
            })
            .collect(),
    }
}

/// Percentage with one decimal, "0.0" when there were no visitors
fn conversion_rate(conversions: i64, visitors: i64) -> String {
    if visitors == 0 {
        return "0.0".to_string();
    }
    format!("{:.1}", conversions as f64 / visitors as f64 * 100.0)
}

fn conversions_on(date: NaiveDate, contacts: &[ContactRequest], subscribers: &[Subscriber]) -> i64 {
    let contact_count = contacts
        .iter()
        .filter(|c| c.submitted_at.date_naive() == date)
        .count();
    let subscriber_count = subscribers
        .iter()
        .filter(|s| s.subscribed_at.date_naive() == date)
        .count();
    (contact_count + subscriber_count) as i64
}

fn top_pages(days: &[DailyAnalytics]) -> Vec<PageVisits> {
    let mut merged: BTreeMap<&str, i64> = BTreeMap::new();
    for day in days {
        for (path, count) in day.pages.0.iter() {
            *merged.entry(path.as_str()).or_insert(0) += count;
        }
    }

    // BTreeMap iteration is path-ordered and the sort is stable, so ties
    // stay in path order.
    let mut pages: Vec<(&str, i64)> = merged.into_iter().collect();
    pages.sort_by(|a, b| b.1.cmp(&a.1));

    pages
        .into_iter()
        .take(TOP_PAGES)
        .map(|(path, visits)| PageVisits {
            name: page_name(path).to_string(),
            visits,
        })
        .collect()
}

/// Display name of a route; unknown paths are shown as-is
pub fn page_name(path: &str) -> &str {
    PAGE_NAMES
        .iter()
        .find(|(route, _)| *route == path)
        .map(|(_, name)| *name)
        .unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{DateTime, TimeZone, Utc};
    use sqlx::types::Json;
    use uuid::Uuid;

    use super::*;
    use crate::models::{ContactStatus, SubscriberStatus};
    use crate::repository::analytics::AnalyticsRepository;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    fn at(d: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, d, hour, 0, 0).unwrap()
    }

    fn day(d: u32, visitors: i64, pages: &[(&str, i64)]) -> DailyAnalytics {
        let pages: BTreeMap<String, i64> =
            pages.iter().map(|(p, c)| (p.to_string(), *c)).collect();
        DailyAnalytics {
            date: date(d),
            visitors,
            page_views: pages.values().sum(),
            pages: Json(pages),
            updated_at: at(d, 23),
        }
    }

    fn contact(submitted_at: DateTime<Utc>) -> ContactRequest {
        ContactRequest {
            id: Uuid::new_v4(),
            first_name: "Awa".into(),
            last_name: "Diop".into(),
            email: "awa@example.com".into(),
            company: "Transports Dakar".into(),
            fleet_size: None,
            message: None,
            submitted_at,
            status: ContactStatus::New,
        }
    }

    fn subscriber(subscribed_at: DateTime<Utc>) -> Subscriber {
        Subscriber {
            id: Uuid::new_v4(),
            email: format!("{}@example.com", Uuid::new_v4()),
            source: "footer".into(),
            status: SubscriberStatus::Active,
            subscribed_at,
        }
    }

    #[test]
    fn home_and_offers_scenario() {
        let mut row = DailyAnalytics::first_view(date(14), "/", true);
        row.add_view("/offres", false);

        let stats = summarize(&[row], &[], &[]);
        assert_eq!(stats.kpis.total_visitors, 1);
        assert_eq!(stats.kpis.total_page_views, 2);

        let names: Vec<(&str, i64)> = stats
            .page_data
            .iter()
            .map(|p| (p.name.as_str(), p.visits))
            .collect();
        assert_eq!(names, vec![("Home", 1), ("Offers", 1)]);
    }

    #[test]
    fn zero_visitors_gives_zero_rate() {
        let stats = summarize(
            &[day(14, 0, &[("/", 3)])],
            &[contact(at(14, 9))],
            &[subscriber(at(14, 10))],
        );
        assert_eq!(stats.kpis.total_conversions, 2);
        assert_eq!(stats.kpis.conversion_rate, "0.0");

        let empty = summarize(&[], &[], &[]);
        assert_eq!(empty.kpis.conversion_rate, "0.0");
        assert!(empty.traffic_data.is_empty());
        assert!(empty.page_data.is_empty());
    }

    #[test]
    fn conversion_rate_has_one_decimal() {
        let stats = summarize(
            &[day(14, 3, &[("/", 5)])],
            &[contact(at(14, 9))],
            &[],
        );
        assert_eq!(stats.kpis.conversion_rate, "33.3");
        assert_eq!(conversion_rate(1, 8), "12.5");
        assert_eq!(conversion_rate(4, 2), "200.0");
    }

    #[test]
    fn top_pages_merge_days_and_keep_five() {
        let days = [
            day(14, 2, &[("/", 4), ("/blog", 1), ("/pricing", 2)]),
            day(13, 2, &[("/", 1), ("/offres", 3), ("/contact", 2), ("/industries", 1)]),
        ];
        let stats = summarize(&days, &[], &[]);

        let names: Vec<(&str, i64)> = stats
            .page_data
            .iter()
            .map(|p| (p.name.as_str(), p.visits))
            .collect();
        assert_eq!(
            names,
            vec![
                ("Home", 5),
                ("Offers", 3),
                ("Contact", 2),
                ("/pricing", 2),
                ("Blog", 1),
            ]
        );
    }

    #[test]
    fn traffic_is_oldest_first_with_daily_conversions() {
        let days = [
            day(14, 5, &[("/", 9)]),
            day(13, 2, &[("/", 2)]),
            day(12, 1, &[("/", 1)]),
        ];
        let contacts = [contact(at(13, 8)), contact(at(13, 17)), contact(at(1, 8))];
        let subscribers = [subscriber(at(14, 0)), subscriber(at(12, 23))];

        let stats = summarize(&days, &contacts, &subscribers);
        let points: Vec<(NaiveDate, i64, i64)> = stats
            .traffic_data
            .iter()
            .map(|p| (p.date, p.visitors, p.conversions))
            .collect();
        assert_eq!(
            points,
            vec![(date(12), 1, 1), (date(13), 2, 2), (date(14), 5, 1)]
        );
        assert_eq!(stats.kpis.total_visitors, 8);
        assert_eq!(stats.kpis.total_page_views, 12);
        assert_eq!(stats.kpis.total_conversions, 5);
    }

    #[test]
    fn source_breakdown_is_fixed() {
        let stats = summarize(&[], &[], &[]);
        let total: u32 = stats.source_data.iter().map(|s| s.value).sum();
        assert_eq!(stats.source_data.len(), 4);
        assert_eq!(stats.source_data[0].name, "Direct");
        assert_eq!(total, 100);
    }

    #[test]
    fn unknown_paths_keep_their_name() {
        assert_eq!(page_name("/"), "Home");
        assert_eq!(page_name("/offres"), "Offers");
        assert_eq!(page_name("/blog/securite-routiere"), "/blog/securite-routiere");
    }

    #[tokio::test]
    async fn record_rejects_empty_path() {
        let service = AnalyticsService::new(Repository::in_memory(), 7);
        let err = service.record("", true).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn whitespace_path_is_stored_verbatim() {
        let repository = Repository::in_memory();
        let service = AnalyticsService::new(repository.clone(), 7);

        service.record("   ", false).await.unwrap();

        let rows = repository.analytics.recent(1).await.unwrap();
        assert_eq!(rows[0].pages.0.get("   "), Some(&1));
        assert_eq!(rows[0].page_views, 1);
    }

    /// Analytics store that is always down
    struct UnavailableAnalytics;

    #[async_trait::async_trait]
    impl AnalyticsRepository for UnavailableAnalytics {
        async fn record_view(&self, _: NaiveDate, _: &str, _: bool) -> AppResult<DailyAnalytics> {
            Err(AppError::Database(sqlx::Error::PoolTimedOut))
        }

        async fn recent(&self, _: i64) -> AppResult<Vec<DailyAnalytics>> {
            Err(AppError::Database(sqlx::Error::PoolTimedOut))
        }
    }

    #[tokio::test]
    async fn store_failure_is_reported() {
        let repository = Repository {
            analytics: Arc::new(UnavailableAnalytics),
            ..Repository::in_memory()
        };
        let service = AnalyticsService::new(repository, 7);

        let err = service.record("/", true).await.unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
        assert!(service.summarize().await.is_err());
    }

    #[tokio::test]
    async fn recorded_views_show_up_in_summary() {
        let repository = Repository::in_memory();
        let service = AnalyticsService::new(repository, 7);

        service.record("/", true).await.unwrap();
        service.record("/offres", false).await.unwrap();

        let stats = service.summarize().await.unwrap();
        assert_eq!(stats.kpis.total_visitors, 1);
        assert_eq!(stats.kpis.total_page_views, 2);
        assert_eq!(stats.traffic_data.len(), 1);
        assert_eq!(stats.page_data[0].name, "Home");
        assert_eq!(stats.page_data[1].name, "Offers");
    }
}
