use serde::Serialize;

use crate::domain::product::PricePoint;

/// Direction of the latest price movement.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Falling,
    Rising,
    Unchanged,
}

/// Movement of the current price against the previous observation.
#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct PriceTrend {
    pub direction: TrendDirection,
    /// Price the current one is compared against.
    pub previous_price: f64,
    /// `current - previous`.
    pub difference: f64,
    /// Size of the move as a whole percentage of the previous price.
    pub percent: u32,
}

/// Lowest and highest price over a history.
#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

/// Compare `current` with the second-to-last point of `history`.
///
/// With fewer than two points, or a zero previous price, the current price is
/// its own reference and the trend is [`TrendDirection::Unchanged`].
pub fn price_trend(current: f64, history: &[PricePoint]) -> PriceTrend {
    let previous_price = history
        .len()
        .checked_sub(2)
        .and_then(|index| history.get(index))
        .map(|point| point.price)
        .filter(|price| *price != 0.0)
        .unwrap_or(current);

    let difference = current - previous_price;

    let direction = if difference < 0.0 {
        TrendDirection::Falling
    } else if difference > 0.0 {
        TrendDirection::Rising
    } else {
        TrendDirection::Unchanged
    };

    let percent = match direction {
        TrendDirection::Unchanged => 0,
        // Half-way cases round towards positive infinity before taking the magnitude.
        _ => ((difference / previous_price) * 100.0 + 0.5).floor().abs() as u32,
    };

    PriceTrend {
        direction,
        previous_price,
        difference,
        percent,
    }
}

/// Minimum and maximum price over `history`, `None` when it is empty.
pub fn price_range(history: &[PricePoint]) -> Option<PriceRange> {
    let first = history.first()?.price;
    let range = history.iter().fold(
        PriceRange {
            min: first,
            max: first,
        },
        |range, point| PriceRange {
            min: range.min.min(point.price),
            max: range.max.max(point.price),
        },
    );
    Some(range)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::tests::day;

    fn history(prices: &[f64]) -> Vec<PricePoint> {
        prices
            .iter()
            .enumerate()
            .map(|(index, price)| PricePoint::new(day(index as u32 + 1), *price))
            .collect()
    }

    #[test]
    fn falling_price_reports_percentage_of_previous() {
        let trend = price_trend(80.0, &history(&[100.0, 80.0]));

        assert_eq!(trend.direction, TrendDirection::Falling);
        assert_eq!(trend.previous_price, 100.0);
        assert_eq!(trend.difference, -20.0);
        assert_eq!(trend.percent, 20);
    }

    #[test]
    fn rising_price_is_rounded() {
        let trend = price_trend(31.0, &history(&[29.0, 30.0, 31.0]));

        assert_eq!(trend.direction, TrendDirection::Rising);
        assert_eq!(trend.previous_price, 30.0);
        assert_eq!(trend.percent, 3);
    }

    #[test]
    fn single_point_falls_back_to_current_price() {
        let trend = price_trend(50.0, &history(&[50.0]));

        assert_eq!(trend.direction, TrendDirection::Unchanged);
        assert_eq!(trend.previous_price, 50.0);
        assert_eq!(trend.percent, 0);
    }

    #[test]
    fn zero_previous_price_falls_back_to_current_price() {
        let trend = price_trend(12.0, &history(&[0.0, 12.0]));

        assert_eq!(trend.direction, TrendDirection::Unchanged);
        assert_eq!(trend.percent, 0);
    }

    #[test]
    fn empty_history_is_unchanged() {
        let trend = price_trend(9.99, &[]);
        assert_eq!(trend.direction, TrendDirection::Unchanged);
    }

    #[test]
    fn range_covers_full_history() {
        let range = price_range(&history(&[12.0, 9.0, 15.0, 9.0, 20.0]));
        assert_eq!(range, Some(PriceRange { min: 9.0, max: 20.0 }));
    }

    #[test]
    fn range_of_empty_history_is_none() {
        assert_eq!(price_range(&[]), None);
    }
}
