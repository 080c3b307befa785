//! Date-keyed count series and the single filter/transform pass.
//!
//! - building a sorted series from raw `{"yyyymmdd": count}` objects (`Series`)
//! - the window/shift/accumulate pass (`transform`)

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::{Count, DateKey};
use crate::error::AppError;

pub mod transform;

pub use transform::*;

/// Pairs sorted ascending by date key, one entry per key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Series {
    points: Vec<(DateKey, Count)>,
}

impl Series {
    /// Parse raw string keys, rejecting anything that is not an 8-digit date.
    ///
    /// Distinct raw keys always map to distinct [`DateKey`]s, so no count is
    /// ever overwritten here.
    pub fn from_raw(raw: BTreeMap<String, Count>) -> Result<Self, AppError> {
        let mut map = BTreeMap::new();
        for (key, value) in raw {
            let key: DateKey = key.parse()?;
            map.insert(key, value);
        }
        Ok(Self::from_map(map))
    }

    pub fn from_map(map: BTreeMap<DateKey, Count>) -> Self {
        Self {
            points: map.into_iter().collect(),
        }
    }

    /// Merge several snapshots, summing counts that share a date.
    pub fn merge(parts: impl IntoIterator<Item = Series>) -> Result<Self, AppError> {
        let mut map: BTreeMap<DateKey, Count> = BTreeMap::new();
        for part in parts {
            for (key, value) in part.points {
                let slot = map.entry(key).or_insert(0);
                *slot = slot
                    .checked_add(value)
                    .ok_or_else(|| AppError::Overflow(key.to_string()))?;
            }
        }
        Ok(Self::from_map(map))
    }

    pub fn points(&self) -> &[(DateKey, Count)] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_key(&self) -> Option<DateKey> {
        self.points.first().map(|(k, _)| *k)
    }

    pub fn last_key(&self) -> Option<DateKey> {
        self.points.last().map(|(k, _)| *k)
    }

    /// Raw form, as served by the download endpoints.
    pub fn to_raw(&self) -> RawSeries {
        RawSeries(
            self.points
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
        )
    }
}

/// JSON object form (`{"yyyymmdd": count}`) with keys in date order.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct RawSeries(pub BTreeMap<String, Count>);

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, Count)]) -> BTreeMap<String, Count> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn from_raw_sorts_by_date() {
        let series = Series::from_raw(raw(&[("20210103", 7), ("20210101", 5), ("20210102", 3)])).unwrap();
        let keys: Vec<String> = series.points().iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, ["20210101", "20210102", "20210103"]);
        assert_eq!(series.first_key().unwrap().get(), 20_210_101);
        assert_eq!(series.last_key().unwrap().get(), 20_210_103);
    }

    #[test]
    fn from_raw_rejects_bad_keys() {
        let err = Series::from_raw(raw(&[("2021-01-01", 1)])).unwrap_err();
        assert!(matches!(err, AppError::InvalidDateKey(_)));
    }

    #[test]
    fn padded_duplicate_key_is_rejected_not_merged() {
        let err = Series::from_raw(raw(&[(" 20210101", 1), ("20210101", 2)])).unwrap_err();
        assert!(matches!(err, AppError::InvalidDateKey(ref k) if k == " 20210101"));
    }

    #[test]
    fn merge_sums_shared_dates() {
        let a = Series::from_raw(raw(&[("20210101", 1), ("20210102", 2)])).unwrap();
        let b = Series::from_raw(raw(&[("20210102", 10), ("20210105", 4)])).unwrap();
        let merged = Series::merge([a, b]).unwrap();
        let pairs: Vec<(u32, Count)> = merged.points().iter().map(|(k, v)| (k.get(), *v)).collect();
        assert_eq!(pairs, [(20_210_101, 1), (20_210_102, 12), (20_210_105, 4)]);
    }

    #[test]
    fn merge_reports_overflow() {
        let a = Series::from_raw(raw(&[("20210101", Count::MAX)])).unwrap();
        let b = Series::from_raw(raw(&[("20210101", 1)])).unwrap();
        assert!(matches!(Series::merge([a, b]), Err(AppError::Overflow(_))));
    }

    #[test]
    fn raw_form_serializes_as_object() {
        let series = Series::from_raw(raw(&[("20210102", 3), ("20210101", 5)])).unwrap();
        let json = serde_json::to_string(&series.to_raw()).unwrap();
        assert_eq!(json, r#"{"20210101":5,"20210102":3}"#);
    }
}
