//! Daily analytics repository

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{Pool, Postgres};
use tokio::sync::Mutex;

use crate::{error::AppResult, models::analytics::DailyAnalytics};

#[async_trait]
pub trait AnalyticsRepository: Send + Sync {
    /// Merge one page view into the row for `date`, creating it if needed
    async fn record_view(
        &self,
        date: NaiveDate,
        path: &str,
        is_new_visitor: bool,
    ) -> AppResult<DailyAnalytics>;

    /// Most recent `limit` rows, newest first
    async fn recent(&self, limit: i64) -> AppResult<Vec<DailyAnalytics>>;
}

#[derive(Clone)]
pub struct PgAnalyticsRepository {
    pool: Pool<Postgres>,
}

impl PgAnalyticsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnalyticsRepository for PgAnalyticsRepository {
    async fn record_view(
        &self,
        date: NaiveDate,
        path: &str,
        is_new_visitor: bool,
    ) -> AppResult<DailyAnalytics> {
        // Single statement: the conflicting row is locked for the update,
        // so concurrent views of the same day never lose an increment.
        let row = sqlx::query_as::<_, DailyAnalytics>(
            r#"
            INSERT INTO analytics (date, visitors, page_views, pages)
            VALUES ($1, $2, 1, jsonb_build_object($3::text, 1))
            ON CONFLICT (date) DO UPDATE SET
                visitors = analytics.visitors + EXCLUDED.visitors,
                page_views = analytics.page_views + 1,
                pages = jsonb_set(
                    COALESCE(analytics.pages, '{}'::jsonb),
                    ARRAY[$3::text],
                    to_jsonb(COALESCE((analytics.pages ->> $3::text)::bigint, 0) + 1)
                ),
                updated_at = NOW()
            RETURNING date, visitors, page_views, pages, updated_at
            "#,
        )
        .bind(date)
        .bind(i64::from(is_new_visitor))
        .bind(path)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn recent(&self, limit: i64) -> AppResult<Vec<DailyAnalytics>> {
        let rows = sqlx::query_as::<_, DailyAnalytics>(
            r#"
            SELECT date, visitors, page_views, pages, updated_at
            FROM analytics
            ORDER BY date DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

/// In-process store; one mutex serializes every read-modify-write
#[derive(Default)]
pub struct MemoryAnalyticsRepository {
    days: Mutex<BTreeMap<NaiveDate, DailyAnalytics>>,
}

#[async_trait]
impl AnalyticsRepository for MemoryAnalyticsRepository {
    async fn record_view(
        &self,
        date: NaiveDate,
        path: &str,
        is_new_visitor: bool,
    ) -> AppResult<DailyAnalytics> {
        let mut days = self.days.lock().await;
        let row = days
            .entry(date)
            .and_modify(|row| row.add_view(path, is_new_visitor))
            .or_insert_with(|| DailyAnalytics::first_view(date, path, is_new_visitor));
        Ok(row.clone())
    }

    async fn recent(&self, limit: i64) -> AppResult<Vec<DailyAnalytics>> {
        let days = self.days.lock().await;
        let limit = usize::try_from(limit).unwrap_or(0);
        Ok(days.values().rev().take(limit).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    #[tokio::test]
    async fn counters_are_conserved_over_many_views() {
        let repo = MemoryAnalyticsRepository::default();
        let paths = ["/", "/offres", "/blog", "/", "/contact", "/offres", "/"];
        let mut new_visitors = 0;

        for (i, path) in paths.iter().enumerate() {
            let is_new = i % 3 == 0;
            new_visitors += i64::from(is_new);
            repo.record_view(day(14), path, is_new).await.unwrap();
        }

        let rows = repo.recent(7).await.unwrap();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.page_views, paths.len() as i64);
        assert_eq!(row.visitors, new_visitors);
        assert_eq!(row.pages.0.values().sum::<i64>(), row.page_views);
        assert_eq!(row.pages.0.get("/"), Some(&3));
    }

    #[tokio::test]
    async fn interleaved_views_merge_into_one_row() {
        let repo = Arc::new(MemoryAnalyticsRepository::default());

        let a = {
            let repo = repo.clone();
            tokio::spawn(async move { repo.record_view(day(14), "/a", false).await })
        };
        let b = {
            let repo = repo.clone();
            tokio::spawn(async move { repo.record_view(day(14), "/b", true).await })
        };
        a.await.unwrap().unwrap();
        b.await.unwrap().unwrap();

        let rows = repo.recent(7).await.unwrap();
        let row = &rows[0];
        assert_eq!(row.page_views, 2);
        assert_eq!(row.visitors, 1);
        assert_eq!(row.pages.0.get("/a"), Some(&1));
        assert_eq!(row.pages.0.get("/b"), Some(&1));
        assert_eq!(row.pages.0.len(), 2);
    }

    #[tokio::test]
    async fn concurrent_views_lose_no_increment() {
        let repo = Arc::new(MemoryAnalyticsRepository::default());
        let handles: Vec<_> = (0..50)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.record_view(day(14), "/", i == 0).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let row = &repo.recent(1).await.unwrap()[0];
        assert_eq!(row.page_views, 50);
        assert_eq!(row.visitors, 1);
        assert_eq!(row.pages.0.get("/"), Some(&50));
    }

    #[tokio::test]
    async fn recent_returns_newest_days_first() {
        let repo = MemoryAnalyticsRepository::default();
        for d in 1..=10 {
            repo.record_view(day(d), "/", true).await.unwrap();
        }

        let rows = repo.recent(7).await.unwrap();
        assert_eq!(rows.len(), 7);
        assert_eq!(rows[0].date, day(10));
        assert_eq!(rows[6].date, day(4));
    }
}
