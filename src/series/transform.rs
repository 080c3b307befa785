//! Window filter, key shift, and optional running total.
//!
//! One forward pass over an immutable slice; nothing is deleted in place.

use tracing::debug;

use crate::domain::{ChartPoint, Count, DateWindow, Mode};
use crate::error::AppError;
use crate::series::Series;

/// Keep pairs strictly inside `window`, shift their keys, and apply `mode`.
///
/// In [`Mode::Accumulation`] the running total includes every pair of the
/// input, so counts dated before `window.min` carry into the first retained
/// point.
pub fn transform(series: &Series, window: &DateWindow, mode: Mode) -> Result<Vec<ChartPoint>, AppError> {
    let mut out = Vec::new();
    let mut total: Count = 0;

    for &(key, value) in series.points() {
        if mode == Mode::Accumulation {
            total = total
                .checked_add(value)
                .ok_or_else(|| AppError::Overflow(key.to_string()))?;
        }
        if !window.contains(key) {
            continue;
        }
        let plotted = match mode {
            Mode::DailyIncrease => value,
            Mode::Accumulation => total,
        };
        out.push(ChartPoint::new(key.shifted().to_string(), plotted));
    }

    debug!(
        input = series.len(),
        retained = out.len(),
        mode = mode.display_name(),
        "transformed series"
    );
    Ok(out)
}

/// Like [`transform`], but an empty result is an error.
pub fn transform_non_empty(
    series: &Series,
    window: &DateWindow,
    mode: Mode,
) -> Result<Vec<ChartPoint>, AppError> {
    let points = transform(series, window, mode)?;
    if points.is_empty() {
        return Err(AppError::EmptyWindow {
            min: window.min,
            max: window.max,
        });
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use proptest::prelude::*;

    use super::*;
    use crate::domain::{DateKey, KEY_SHIFT};

    fn sample() -> Series {
        let raw: BTreeMap<String, Count> = [("20210101", 5), ("20210102", 3), ("20210103", 7)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        Series::from_raw(raw).unwrap()
    }

    fn pairs(points: &[ChartPoint]) -> Vec<(&str, Count)> {
        points.iter().map(|p| (p.label.as_str(), p.value)).collect()
    }

    #[test]
    fn daily_increase_keeps_values() {
        let out = transform(&sample(), &DateWindow::new(20_210_100, 20_210_104), Mode::DailyIncrease).unwrap();
        assert_eq!(pairs(&out), [("210101", 5), ("210102", 3), ("210103", 7)]);
    }

    #[test]
    fn accumulation_sums_values() {
        let out = transform(&sample(), &DateWindow::new(20_210_100, 20_210_104), Mode::Accumulation).unwrap();
        assert_eq!(pairs(&out), [("210101", 5), ("210102", 8), ("210103", 15)]);
    }

    #[test]
    fn bounds_are_exclusive() {
        let out = transform(&sample(), &DateWindow::new(20_210_101, 20_210_103), Mode::DailyIncrease).unwrap();
        assert_eq!(pairs(&out), [("210102", 3)]);
    }

    #[test]
    fn accumulation_carries_in_dropped_leading_values() {
        let out = transform(&sample(), &DateWindow::new(20_210_101, 20_210_104), Mode::Accumulation).unwrap();
        assert_eq!(pairs(&out), [("210102", 8), ("210103", 15)]);
    }

    #[test]
    fn empty_window_is_reported() {
        let err = transform_non_empty(&sample(), &DateWindow::new(20_220_000, 20_230_000), Mode::DailyIncrease)
            .unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert!(transform(&Series::default(), &DateWindow::default(), Mode::Accumulation)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn running_total_overflow_is_an_error() {
        let raw: BTreeMap<String, Count> = [("20210101", Count::MAX), ("20210102", 1)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        let series = Series::from_raw(raw).unwrap();
        assert!(matches!(
            transform(&series, &DateWindow::default(), Mode::Accumulation),
            Err(AppError::Overflow(_))
        ));
        // Daily mode never sums, so the same input is fine.
        assert!(transform(&series, &DateWindow::default(), Mode::DailyIncrease).is_ok());
    }

    fn arb_series() -> impl Strategy<Value = Series> {
        prop::collection::btree_map(10_000_000u32..99_999_999u32, -1_000i64..1_000_000i64, 0..40).prop_map(|m| {
            Series::from_map(
                m.into_iter()
                    .map(|(k, v)| (DateKey::new(k).unwrap(), v))
                    .collect(),
            )
        })
    }

    proptest! {
        #[test]
        fn retained_keys_are_shifted_inside_window(
            series in arb_series(),
            min in 0i64..100_000_000,
            span in 0i64..100_000_000,
        ) {
            let window = DateWindow::new(min, min + span);
            let out = transform(&series, &window, Mode::DailyIncrease).unwrap();
            let expected: Vec<(String, Count)> = series
                .points()
                .iter()
                .filter(|(k, _)| i64::from(k.get()) > window.min && i64::from(k.get()) < window.max)
                .map(|(k, v)| ((i64::from(k.get()) - KEY_SHIFT).to_string(), *v))
                .collect();
            let got: Vec<(String, Count)> = out.into_iter().map(|p| (p.label, p.value)).collect();
            prop_assert_eq!(got, expected);
        }

        #[test]
        fn accumulated_value_is_prefix_sum_of_input(
            series in arb_series(),
            min in 0i64..100_000_000,
            span in 0i64..100_000_000,
        ) {
            let window = DateWindow::new(min, min + span);
            let out = transform(&series, &window, Mode::Accumulation).unwrap();
            let mut retained = out.iter();
            for (idx, (key, _)) in series.points().iter().enumerate() {
                if !window.contains(*key) {
                    continue;
                }
                let point = retained.next().unwrap();
                let prefix: Count = series.points()[..=idx].iter().map(|(_, v)| *v).sum();
                prop_assert_eq!(point.value, prefix);
                prop_assert_eq!(point.label.parse::<i64>().unwrap(), key.shifted());
            }
            prop_assert!(retained.next().is_none());
        }
    }
}
