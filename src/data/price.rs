use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PriceError {
    #[error("Non-positive close {close} on {date}")]
    NonPositiveClose { date: NaiveDate, close: f64 },
    #[error("Prices out of order: {date} comes after {previous}")]
    OutOfOrder { previous: NaiveDate, date: NaiveDate },
    #[error("Duplicate price for {0}")]
    DuplicateDate(NaiveDate),
}

//a single daily closing price
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        PricePoint { date, close }
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }
}

//closing prices in ascending date order, one per date
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    //creates a series, validating order, uniqueness and positive closes
    pub fn new(points: Vec<PricePoint>) -> Result<Self, PriceError> {
        for point in &points {
            if point.close.is_nan() || point.close <= 0.0 {
                return Err(PriceError::NonPositiveClose {
                    date: point.date,
                    close: point.close,
                });
            }
        }

        for pair in points.windows(2) {
            let (previous, current) = (pair[0].date, pair[1].date);
            if current == previous {
                return Err(PriceError::DuplicateDate(current));
            }
            if current < previous {
                return Err(PriceError::OutOfOrder {
                    previous,
                    date: current,
                });
            }
        }

        Ok(PriceSeries { points })
    }

    //creates a series without validation
    pub fn new_unchecked(points: Vec<PricePoint>) -> Self {
        PriceSeries { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PricePoint> {
        self.points.iter()
    }

    //points whose calendar year is >= year, order preserved
    pub fn since_year(&self, year: i32) -> PriceSeries {
        PriceSeries {
            points: self
                .points
                .iter()
                .filter(|point| point.year() >= year)
                .copied()
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PriceSeries {
    type Item = &'a PricePoint;
    type IntoIter = std::slice::Iter<'a, PricePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
