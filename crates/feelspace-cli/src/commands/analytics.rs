//! Analytics report command

use anyhow::{Context, Result};
use feelspace_core::db::Database;
use feelspace_core::{AnalyticsEngine, AnalyticsReport};

/// Human-readable rendering of a report
pub fn render_report(wallet: &str, days: i64, report: &AnalyticsReport) -> String {
    let mut out = String::new();
    let stats = &report.statistics;

    out.push_str(&format!("\n📈 Feel Space analytics for {} (last {} days)\n", wallet, days));
    out.push_str("   ─────────────────────────────────────────────\n");
    out.push_str(&format!("   Logs:              {}\n", report.total_logs));

    if report.total_logs > 0 {
        out.push_str(&format!("   Most common:       {}\n", stats.most_common_emotion));
        out.push_str(&format!("   Avg intensity:     {:.1}\n", stats.average_intensity));
        out.push_str(&format!("   Positive:          {:.0}%\n", stats.positive_percentage));
        out.push_str(&format!(
            "   Streak:            {} day(s) (longest {})\n",
            stats.current_streak, stats.longest_streak
        ));

        out.push_str("\n   Emotions\n");
        for share in &report.emotion_distribution {
            out.push_str(&format!(
                "   {:<10} {:>4}  {:>5.1}%  avg {:.1}\n",
                share.emotion, share.count, share.percentage, share.avg_intensity
            ));
        }
    }

    out.push_str("\n   Insights\n");
    for insight in &report.insights {
        out.push_str(&format!(
            "   {} [{}] {}\n      {}\n",
            insight.icon, insight.kind, insight.title, insight.description
        ));
    }

    out
}

pub fn cmd_analytics(db: &Database, wallet: &str, days: i64, json: bool) -> Result<()> {
    let days = feelspace_core::analytics::normalize_days(days);
    let report = AnalyticsEngine::new().report_for_wallet(db, wallet, days)?;

    db.log_audit(
        &feelspace_server::audit_actor(Some(wallet)),
        "report",
        Some("analytics"),
        None,
        Some(&format!("days={}, source=cli", days)),
    )?;

    if json {
        let out = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{}", out);
    } else {
        print!("{}", render_report(wallet, days, &report));
    }
    Ok(())
}
