//! Import/export command implementations

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use feelspace_core::db::Database;
use feelspace_core::import::{parse_emotion_csv, ImportStats};

pub fn cmd_import(db: &Database, file: &Path) -> Result<ImportStats> {
    let csv_file =
        File::open(file).with_context(|| format!("Failed to open file: {}", file.display()))?;

    let logs = parse_emotion_csv(BufReader::new(csv_file))
        .with_context(|| format!("Failed to parse {}", file.display()))?;

    println!("📥 Importing {} emotion log(s) from {}...", logs.len(), file.display());

    let stats = db.import_emotion_logs(&logs)?;
    db.log_audit(
        "anonymous",
        "import",
        Some("emotion_log"),
        None,
        Some(&format!(
            "file={}, imported={}, skipped={}",
            file.display(),
            stats.imported,
            stats.skipped
        )),
    )?;

    println!("   Imported: {}", stats.imported);
    if stats.skipped > 0 {
        println!("   Skipped (already imported): {}", stats.skipped);
    }
    Ok(stats)
}

pub fn cmd_export(db: &Database, wallet: &str, output: Option<&Path>) -> Result<()> {
    let csv = db.export_emotion_logs_csv(wallet)?;
    db.log_audit(wallet, "export", Some("emotion_log"), None, Some("format=csv"))?;

    match output {
        Some(path) => {
            std::fs::write(path, &csv)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            let rows = csv.lines().count().saturating_sub(1);
            println!("📤 Exported {} log(s) to {}", rows, path.display());
        }
        None => print!("{}", csv),
    }
    Ok(())
}
