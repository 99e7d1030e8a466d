//! Output formatting and persistence for summaries.
//!
//! Supports pretty-printing, JSON files, a flat CSV of highlights and the
//! per-preset summary export used by the poster pipeline.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::dataset::ForecastDataset;
use crate::summary::window::date_stamp;
use crate::summary::{Highlight, Summary, SummaryConfig, build_summary_with};

/// Day offset used by exports: posters start from tomorrow.
pub const EXPORT_DAY_OFFSET: usize = 1;

/// A named export configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPreset {
    pub name: String,
    pub days: usize,
}

impl ExportPreset {
    pub fn new(name: &str, days: usize) -> Self {
        Self {
            name: name.to_string(),
            days,
        }
    }

    /// The three-day and one-week posters.
    pub fn defaults() -> Vec<ExportPreset> {
        vec![ExportPreset::new("3day", 3), ExportPreset::new("week", 7)]
    }

    /// `summary_<name>_<YYYYMMDD>.json`, stamped from the generation time.
    pub fn file_name(&self, generated_at: &str) -> String {
        format!("summary_{}_{}.json", self.name, date_stamp(generated_at))
    }
}

/// Logs a summary using Rust's debug pretty-print format.
pub fn print_pretty(summary: &Summary) {
    debug!("{:#?}", summary);
}

/// Logs a summary as pretty-printed JSON.
pub fn print_json(summary: &Summary) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(summary)?);
    Ok(())
}

fn create_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    Ok(())
}

/// Writes `summary` as pretty JSON to `path`, creating parent directories.
pub fn write_summary_json(path: &Path, summary: &Summary) -> Result<()> {
    create_parent_dir(path)?;

    let body = serde_json::to_string_pretty(summary)?;
    fs::write(path, body).with_context(|| format!("failed to write {}", path.display()))?;
    debug!(path = %path.display(), "Summary JSON written");
    Ok(())
}

/// Flat CSV form of a [`Highlight`]; `conditions` is embedded as JSON text.
#[derive(Debug, Serialize)]
struct HighlightRow<'a> {
    date: &'a str,
    period: &'a str,
    group: &'a str,
    viewpoint: &'a str,
    event: &'a str,
    weather: &'a str,
    score: f64,
    conditions: String,
}

/// Writes highlights to a CSV file with a header row, replacing any existing
/// file and creating parent directories.
pub fn write_highlights_csv(path: &Path, highlights: &[Highlight]) -> Result<()> {
    create_parent_dir(path)?;
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;

    for h in highlights {
        writer.serialize(HighlightRow {
            date: &h.date,
            period: &h.period,
            group: &h.group,
            viewpoint: &h.viewpoint,
            event: &h.event,
            weather: &h.weather,
            score: h.score,
            conditions: serde_json::to_string(&h.conditions)?,
        })?;
    }

    writer.flush()?;
    debug!(path = %path.display(), rows = highlights.len(), "Highlights CSV written");
    Ok(())
}

/// Builds one summary per preset and writes each into `out_dir`.
///
/// Returns the written paths in preset order.
pub fn export_presets(
    dataset: &ForecastDataset,
    presets: &[ExportPreset],
    out_dir: &Path,
    day_offset: usize,
    config: &SummaryConfig,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let mut written = Vec::with_capacity(presets.len());

    for preset in presets {
        let summary = build_summary_with(dataset, preset.days, day_offset, config);
        let path = out_dir.join(preset.file_name(&dataset.generated_at));

        write_summary_json(&path, &summary)?;
        info!(
            preset = %preset.name,
            days = preset.days,
            highlights = summary.highlights.len(),
            path = %path.display(),
            "Summary exported"
        );

        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{DayRecord, Group, Slot, Viewpoint};
    use crate::summary::build_summary;
    use std::env;

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(name)
    }

    fn sample_dataset() -> ForecastDataset {
        let days: Vec<String> = (20..=28).map(|d| format!("2026-02-{d}")).collect();
        let daily = days
            .iter()
            .enumerate()
            .map(|(i, date)| DayRecord {
                date: date.clone(),
                am: Some(Slot {
                    score: 50.0 + (i as f64) * 5.0,
                    event: "云海".to_string(),
                    weather: "晴天".to_string(),
                    ..Default::default()
                }),
                pm: None,
            })
            .collect();

        ForecastDataset {
            generated_at: "2026-02-20T08:00:00+08:00".to_string(),
            days,
            groups: vec![Group {
                name: "贡嘎山系".to_string(),
                viewpoints: vec![Viewpoint {
                    name: "雅哈垭口".to_string(),
                    daily,
                }],
            }],
        }
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        print_pretty(&build_summary(&sample_dataset(), 3, 0));
    }

    #[test]
    fn test_print_json_does_not_panic() {
        print_json(&build_summary(&sample_dataset(), 3, 0)).unwrap();
    }

    #[test]
    fn test_preset_file_name() {
        let preset = ExportPreset::new("3day", 3);
        assert_eq!(
            preset.file_name("2026-02-24T10:00:00+08:00"),
            "summary_3day_20260224.json"
        );
    }

    #[test]
    fn test_write_summary_json_round_trips_fields() {
        let path = temp_path("forecast_summary_test_summary.json");
        let _ = fs::remove_file(&path);

        let summary = build_summary(&sample_dataset(), 3, 0);
        write_summary_json(&path, &summary).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["date_range"], "2月20日—2月22日");
        assert_eq!(value["group_overview"]["贡嘎山系"]["score"], 60.0);
        assert_eq!(value["highlights"].as_array().unwrap().len(), 1);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_highlights_csv_header_and_rows() {
        let path = temp_path("forecast_summary_test_highlights.csv");
        let _ = fs::remove_file(&path);

        let summary = build_summary(&sample_dataset(), 9, 0);
        write_highlights_csv(&path, &summary.highlights).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert!(lines[0].starts_with("date,period,group,viewpoint,event,weather,score"));
        assert_eq!(lines.len(), 1 + summary.highlights.len());
        assert!(lines[1].starts_with("2026-02-28,上午,贡嘎山系,雅哈垭口,云海,晴天,90"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_highlights_csv_creates_parent_dirs() {
        let dir = temp_path("forecast_summary_test_csv_nested");
        let _ = fs::remove_dir_all(&dir);
        let path = dir.join("exports").join("highlights.csv");

        let summary = build_summary(&sample_dataset(), 3, 0);
        write_highlights_csv(&path, &summary.highlights).unwrap();

        assert!(path.exists());
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_export_presets_writes_each_file() {
        let dir = temp_path("forecast_summary_test_export");
        let _ = fs::remove_dir_all(&dir);

        let written = export_presets(
            &sample_dataset(),
            &ExportPreset::defaults(),
            &dir,
            EXPORT_DAY_OFFSET,
            &SummaryConfig::default(),
        )
        .unwrap();

        assert_eq!(written.len(), 2);
        assert!(written[0].ends_with("summary_3day_20260220.json"));
        assert!(written[1].ends_with("summary_week_20260220.json"));

        let week: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&written[1]).unwrap()).unwrap();
        assert_eq!(week["date_range"], "2月21日—2月27日");

        fs::remove_dir_all(&dir).unwrap();
    }
}
