//! Built-in insight rules
//!
//! Each rule looks at the computed aggregates and contributes at most one
//! insight. Rules never see raw records.

use crate::models::is_negative;

use super::types::{
    DayPattern, EmotionShare, InsightItem, InsightKind, Statistics, TimePattern,
};

/// Aggregates available to insight rules
pub struct RuleContext<'a> {
    pub distribution: &'a [EmotionShare],
    pub time_patterns: &'a [TimePattern],
    pub day_patterns: &'a [DayPattern],
    pub statistics: &'a Statistics,
}

/// A heuristic that turns aggregates into an insight
pub trait InsightRule: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<InsightItem>;
}

/// Mini-game suggested for a recurring emotion
pub fn recommended_game(emotion: &str) -> &'static str {
    match emotion {
        "anxious" => "Bubble Pop or Breathing exercises",
        "sad" => "Bubble Pop or Mood Journal",
        "angry" => "Bubble Pop for stress relief",
        "tired" => "Breathing exercises",
        _ => "Mind Match",
    }
}

/// Shown instead of any rule output when the window is empty
pub fn onboarding_insight() -> InsightItem {
    InsightItem::new(
        InsightKind::Recommendation,
        1,
        "Start Your Journey",
        "Log your first emotion to start discovering your patterns.",
        "🌱",
    )
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn format_hour(hour: u32) -> String {
    let suffix = if hour < 12 { "AM" } else { "PM" };
    let h = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{} {}", h, suffix)
}

/// Seven or more consecutive days of logging
pub struct StreakRule {
    pub min_days: u32,
}

impl InsightRule for StreakRule {
    fn name(&self) -> &'static str {
        "streak"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<InsightItem> {
        let streak = ctx.statistics.current_streak;
        (streak >= self.min_days).then(|| {
            InsightItem::new(
                InsightKind::Achievement,
                1,
                "Amazing Streak!",
                format!(
                    "You've logged your emotions {} days in a row. Keep it going!",
                    streak
                ),
                "🔥",
            )
        })
    }
}

/// Overall positivity: celebrate at 60% and above, suggest self-care below 40%
pub struct PositivityRule;

impl InsightRule for PositivityRule {
    fn name(&self) -> &'static str {
        "positivity"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<InsightItem> {
        let pct = ctx.statistics.positive_percentage;
        if pct >= 60.0 {
            Some(InsightItem::new(
                InsightKind::Trend,
                2,
                "Positive Outlook",
                format!(
                    "{:.0}% of your recent emotions have been positive. Whatever you're doing, it's working!",
                    pct
                ),
                "☀️",
            ))
        } else if pct < 40.0 {
            Some(InsightItem::new(
                InsightKind::Recommendation,
                1,
                "Time for Self-Care",
                format!(
                    "Only {:.0}% of your recent emotions have been positive. A calming mini-game or a short break might help.",
                    pct
                ),
                "💙",
            ))
        } else {
            None
        }
    }
}

/// A negative emotion dominating some hour within a time-of-day window
pub struct HourWindowRule {
    pub first_hour: u32,
    pub last_hour: u32,
    pub title: &'static str,
    pub part_of_day: &'static str,
    pub suggestion: &'static str,
    pub icon: &'static str,
}

impl HourWindowRule {
    pub fn morning() -> Self {
        Self {
            first_hour: 6,
            last_hour: 9,
            title: "Morning Mood Pattern",
            part_of_day: "morning",
            suggestion: "Try starting the day with a breathing exercise.",
            icon: "🌅",
        }
    }

    pub fn evening() -> Self {
        Self {
            first_hour: 18,
            last_hour: 21,
            title: "Evening Mood Pattern",
            part_of_day: "evening",
            suggestion: "A short wind-down game before bed may help.",
            icon: "🌙",
        }
    }
}

impl InsightRule for HourWindowRule {
    fn name(&self) -> &'static str {
        self.part_of_day
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<InsightItem> {
        let pattern = ctx.time_patterns.iter().find(|p| {
            (self.first_hour..=self.last_hour).contains(&p.hour) && is_negative(&p.dominant_emotion)
        })?;

        Some(InsightItem::new(
            InsightKind::Pattern,
            3,
            self.title,
            format!(
                "You often feel {} in the {} (around {}). {}",
                pattern.dominant_emotion,
                self.part_of_day,
                format_hour(pattern.hour),
                self.suggestion
            ),
            self.icon,
        ))
    }
}

/// The first weekday whose dominant emotion is negative
pub struct DayOfWeekRule;

impl InsightRule for DayOfWeekRule {
    fn name(&self) -> &'static str {
        "day_of_week"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<InsightItem> {
        let pattern = ctx
            .day_patterns
            .iter()
            .find(|p| is_negative(&p.dominant_emotion))?;

        Some(InsightItem::new(
            InsightKind::Pattern,
            4,
            format!("{} Blues", pattern.day),
            format!(
                "{}s tend to bring {} feelings. Plan something kind for yourself that day.",
                pattern.day, pattern.dominant_emotion
            ),
            "📅",
        ))
    }
}

/// One emotion making up a large share of the window
pub struct DominantEmotionRule {
    pub min_percentage: f64,
}

impl InsightRule for DominantEmotionRule {
    fn name(&self) -> &'static str {
        "dominant_emotion"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<InsightItem> {
        let top = ctx.distribution.first()?;
        (top.percentage > self.min_percentage).then(|| {
            InsightItem::new(
                InsightKind::Pattern,
                5,
                "Dominant Emotion",
                format!(
                    "{} makes up {:.0}% of your logs, with an average intensity of {:.1}.",
                    capitalize(&top.emotion),
                    top.percentage,
                    top.avg_intensity
                ),
                "📊",
            )
        })
    }
}

/// Suggest a mini-game for the most frequent negative emotion
pub struct GameRecommendationRule {
    pub min_percentage: f64,
}

impl InsightRule for GameRecommendationRule {
    fn name(&self) -> &'static str {
        "game_recommendation"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<InsightItem> {
        let negative = ctx.distribution.iter().find(|d| is_negative(&d.emotion))?;
        (negative.percentage > self.min_percentage).then(|| {
            InsightItem::new(
                InsightKind::Recommendation,
                2,
                "Try a Mini-Game",
                format!(
                    "You've been feeling {} in {:.0}% of your logs. Try {}.",
                    negative.emotion,
                    negative.percentage,
                    recommended_game(&negative.emotion)
                ),
                "🎮",
            )
        })
    }
}
