use serde::Serialize;

use crate::dataset::{ForecastDataset, Period};

#[derive(Debug, Default, Serialize)]
pub struct DatasetStats {
    pub generated_at: String,
    pub days: usize,
    pub groups: usize,
    pub viewpoints: usize,
    pub day_records: usize,

    // slot coverage
    pub slots: usize,
    pub with_event: usize,
    pub with_conditions: usize,

    // records whose date is not listed in `days`
    pub orphan_records: usize,
}

impl DatasetStats {
    pub fn from_dataset(dataset: &ForecastDataset) -> Self {
        let mut s = DatasetStats {
            generated_at: dataset.generated_at.clone(),
            days: dataset.days.len(),
            groups: dataset.groups.len(),
            ..Default::default()
        };

        for group in &dataset.groups {
            s.viewpoints += group.viewpoints.len();

            for vp in &group.viewpoints {
                s.day_records += vp.daily.len();

                for day in &vp.daily {
                    if !dataset.days.contains(&day.date) {
                        s.orphan_records += 1;
                    }

                    for slot in Period::ALL.iter().filter_map(|p| day.slot(*p)) {
                        s.slots += 1;

                        if !slot.event.is_empty() {
                            s.with_event += 1;
                        }

                        if !slot.conditions.is_empty() {
                            s.with_conditions += 1;
                        }
                    }
                }
            }
        }

        s
    }

    pub fn pct(part: usize, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            (part as f64 / total as f64) * 100.0
        }
    }

    pub fn event_pct(&self) -> f64 {
        Self::pct(self.with_event, self.slots)
    }
}
