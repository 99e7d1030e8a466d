use std::collections::HashSet;

use tracing::debug;

use crate::dataset::{ForecastDataset, Period};
use crate::summary::config::SummaryConfig;
use crate::summary::types::{GroupBest, GroupOverview, Highlight, Summary};
use crate::summary::window::{date_range_label, day_window};

/// Builds a [`Summary`] for `day_count` days starting at `day_offset` using
/// the default [`SummaryConfig`].
pub fn build_summary(dataset: &ForecastDataset, day_count: usize, day_offset: usize) -> Summary {
    build_summary_with(dataset, day_count, day_offset, &SummaryConfig::default())
}

/// Collects highlights and per-group bests over the selected day window.
///
/// Every slot in the window competes for its group's best entry; only slots
/// scoring at least `config.threshold` become highlights. Highlights are
/// stably sorted by score, so equal scores keep group/viewpoint/day/period
/// order.
pub fn build_summary_with(
    dataset: &ForecastDataset,
    day_count: usize,
    day_offset: usize,
    config: &SummaryConfig,
) -> Summary {
    let window = day_window(&dataset.days, day_count, day_offset);
    let in_window: HashSet<&str> = window.iter().map(String::as_str).collect();

    let mut highlights = Vec::new();
    let mut group_overview = GroupOverview::default();

    for group in &dataset.groups {
        let mut group_best: Option<GroupBest> = None;

        for vp in &group.viewpoints {
            for day in &vp.daily {
                if !in_window.contains(day.date.as_str()) {
                    continue;
                }

                for period in Period::ALL {
                    let Some(slot) = day.slot(period) else {
                        continue;
                    };

                    let beats_best = !slot.score.is_nan()
                        && group_best
                            .as_ref()
                            .is_none_or(|best| slot.score > best.score);
                    if beats_best {
                        group_best = Some(GroupBest {
                            viewpoint: vp.name.clone(),
                            score: slot.score,
                            weather: slot.weather.clone(),
                            date: day.date.clone(),
                            period: config.period_label(period).to_string(),
                        });
                    }

                    if slot.score.is_nan() || slot.score < config.threshold {
                        continue;
                    }

                    highlights.push(Highlight {
                        date: day.date.clone(),
                        period: config.period_label(period).to_string(),
                        group: group.name.clone(),
                        viewpoint: vp.name.clone(),
                        event: config.event_label(&slot.event).to_string(),
                        weather: slot.weather.clone(),
                        score: slot.score,
                        conditions: slot.conditions.clone(),
                    });
                }
            }
        }

        if let Some(best) = group_best {
            group_overview.insert(group.name.clone(), best);
        }
    }

    highlights.sort_by(|a, b| b.score.total_cmp(&a.score));

    debug!(
        window_days = window.len(),
        groups = group_overview.len(),
        highlights = highlights.len(),
        threshold = config.threshold,
        "Summary built"
    );

    Summary {
        generated_at: dataset.generated_at.clone(),
        date_range: date_range_label(window),
        group_overview,
        highlights,
    }
}
