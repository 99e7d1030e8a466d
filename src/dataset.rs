//! Forecast dataset model and JSON parsing.
//!
//! The dataset is produced upstream as `poster.json`: region groups, each
//! holding viewpoints, each holding one record per forecast day with an
//! optional morning and afternoon slot.

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// The complete forecast payload handed to the summary builder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastDataset {
    /// Generation timestamp, kept verbatim.
    #[serde(alias = "generatedAt")]
    pub generated_at: String,
    /// Every forecast-covered day as `YYYY-MM-DD`, ascending.
    pub days: Vec<String>,
    pub groups: Vec<Group>,
}

/// A geographic cluster of viewpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
    #[serde(default)]
    pub viewpoints: Vec<Viewpoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Viewpoint {
    pub name: String,
    #[serde(default)]
    pub daily: Vec<DayRecord>,
}

/// Forecast for one viewpoint on one date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayRecord {
    pub date: String,
    #[serde(default)]
    pub am: Option<Slot>,
    #[serde(default)]
    pub pm: Option<Slot>,
}

/// One half-day forecast entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub score: f64,
    /// Empty when nothing notable is expected.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub event: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub weather: String,
    /// Named sub-scores, passed through untouched.
    #[serde(default)]
    pub conditions: Map<String, Value>,
}

/// Reads a string field where upstream writes `null` for "nothing".
fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Half-day period of a [`DayRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Am,
    Pm,
}

impl Period {
    /// Processing order: morning before afternoon.
    pub const ALL: [Period; 2] = [Period::Am, Period::Pm];
}

impl DayRecord {
    pub fn slot(&self, period: Period) -> Option<&Slot> {
        match period {
            Period::Am => self.am.as_ref(),
            Period::Pm => self.pm.as_ref(),
        }
    }
}

impl ForecastDataset {
    /// Checks the invariants the summary builder relies on but does not
    /// enforce itself: `days` holds real calendar dates, strictly ascending.
    ///
    /// # Errors
    ///
    /// Returns the first offending entry of `days`.
    pub fn validate(&self) -> Result<()> {
        let mut previous: Option<NaiveDate> = None;

        for day in &self.days {
            let date = NaiveDate::parse_from_str(day, "%Y-%m-%d")
                .with_context(|| format!("invalid forecast day '{day}'"))?;

            if let Some(prev) = previous
                && date <= prev
            {
                bail!("forecast days out of order: '{day}' follows {prev}");
            }
            previous = Some(date);
        }

        Ok(())
    }
}

/// Decodes a [`ForecastDataset`] from raw JSON bytes.
///
/// # Errors
///
/// Returns an error when the bytes are not JSON or miss a required field
/// (`days`, `groups`, a slot's `score`, ...).
pub fn parse_dataset(bytes: &[u8]) -> Result<ForecastDataset> {
    serde_json::from_slice(bytes).context("failed to decode forecast dataset")
}
