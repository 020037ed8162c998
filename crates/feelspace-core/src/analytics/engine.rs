//! Analytics Engine - turns a window of emotion logs into a report

use chrono::{DateTime, Local, TimeZone, Utc};

use crate::db::Database;
use crate::models::EmotionLog;
use crate::Result;

use super::distribution::emotion_distribution;
use super::patterns::{day_patterns, time_patterns};
use super::rules::{
    onboarding_insight, DayOfWeekRule, DominantEmotionRule, GameRecommendationRule,
    HourWindowRule, InsightRule, PositivityRule, RuleContext, StreakRule,
};
use super::statistics::statistics;
use super::trends::weekly_trends;
use super::types::{AnalyticsReport, DateRange, InsightItem, Statistics};
use super::{normalize_days, window_start};

/// Computes analytics reports and runs the registered insight rules
pub struct AnalyticsEngine {
    rules: Vec<Box<dyn InsightRule>>,
}

impl Default for AnalyticsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalyticsEngine {
    /// Create an engine with the built-in rules
    pub fn new() -> Self {
        let mut engine = Self { rules: vec![] };

        // Evaluation order matters: insights with equal priority keep it
        engine.register(Box::new(StreakRule { min_days: 7 }));
        engine.register(Box::new(PositivityRule));
        engine.register(Box::new(HourWindowRule::morning()));
        engine.register(Box::new(HourWindowRule::evening()));
        engine.register(Box::new(DayOfWeekRule));
        engine.register(Box::new(DominantEmotionRule {
            min_percentage: 30.0,
        }));
        engine.register(Box::new(GameRecommendationRule {
            min_percentage: 20.0,
        }));

        engine
    }

    /// An engine with no rules registered
    pub fn empty() -> Self {
        Self { rules: vec![] }
    }

    /// Register an insight rule; it runs after those already registered
    pub fn register(&mut self, rule: Box<dyn InsightRule>) {
        self.rules.push(rule);
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Build a report from records already restricted to the window
    ///
    /// `now` anchors the date range and the current streak. Hours and
    /// weekdays are bucketed in `tz`.
    pub fn compute<Tz: TimeZone>(
        &self,
        records: &[EmotionLog],
        now: DateTime<Utc>,
        days: i64,
        tz: &Tz,
    ) -> AnalyticsReport {
        let date_range = DateRange {
            start: window_start(now, days),
            end: now,
        };

        if records.is_empty() {
            return AnalyticsReport {
                total_logs: 0,
                date_range,
                emotion_distribution: vec![],
                time_patterns: vec![],
                day_patterns: vec![],
                trends: vec![],
                statistics: Statistics::default(),
                insights: vec![onboarding_insight()],
            };
        }

        let distribution = emotion_distribution(records);
        let time_patterns = time_patterns(records, tz);
        let day_patterns = day_patterns(records, tz);
        let trends = weekly_trends(records, tz);
        let statistics = statistics(records, &distribution, now);

        tracing::debug!(
            records = records.len(),
            emotions = distribution.len(),
            hours = time_patterns.len(),
            days = day_patterns.len(),
            trend_rows = trends.len(),
            "Aggregates computed"
        );

        let ctx = RuleContext {
            distribution: &distribution,
            time_patterns: &time_patterns,
            day_patterns: &day_patterns,
            statistics: &statistics,
        };
        let insights = self.run_rules(&ctx);

        AnalyticsReport {
            total_logs: records.len(),
            date_range,
            emotion_distribution: distribution,
            time_patterns,
            day_patterns,
            trends,
            statistics,
            insights,
        }
    }

    fn run_rules(&self, ctx: &RuleContext<'_>) -> Vec<InsightItem> {
        let mut insights: Vec<InsightItem> = self
            .rules
            .iter()
            .filter_map(|rule| {
                let item = rule.evaluate(ctx);
                if let Some(item) = &item {
                    tracing::debug!(rule = rule.name(), title = %item.title, "Rule fired");
                }
                item
            })
            .collect();

        // Stable: equal priorities keep registration order
        insights.sort_by_key(|i| i.priority);
        insights
    }

    /// Load the wallet's last `days` days of logs and compute a report in
    /// the machine's local timezone
    pub fn report_for_wallet(
        &self,
        db: &Database,
        wallet: &str,
        days: i64,
    ) -> Result<AnalyticsReport> {
        let days = normalize_days(days);
        let now = Utc::now();
        let records = db.get_emotion_logs_since(wallet, window_start(now, days))?;

        tracing::debug!(wallet, days, records = records.len(), "Loaded analytics window");

        Ok(self.compute(&records, now, days, &Local))
    }
}
