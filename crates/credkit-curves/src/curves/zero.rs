//! Zero-rate curve with linear interpolation.

use serde::{Deserialize, Serialize};

use credkit_core::daycounts::DayCountConvention;
use credkit_core::{Compounding, Date};
use credkit_math::interpolation::{Extrapolation, Interpolator, LinearInterpolator};

use crate::error::{CurveError, CurveResult};
use crate::traits::DiscountCurve;

/// A zero-rate curve defined by (date, rate) pivots.
///
/// Spot rates are interpolated linearly against year fraction from the
/// valuation date and held flat beyond the first and last pivots. A curve
/// with a single pivot is flat at that pivot's rate.
///
/// # Example
///
/// ```rust
/// use credkit_core::daycounts::DayCountConvention;
/// use credkit_core::{Compounding, Date};
/// use credkit_curves::{DiscountCurve, ZeroCurve};
///
/// let today = Date::from_ymd(2025, 1, 1).unwrap();
/// let curve = ZeroCurve::from_rates(
///     today,
///     &[
///         (Date::from_ymd(2026, 1, 1).unwrap(), 0.04),
///         (Date::from_ymd(2030, 1, 1).unwrap(), 0.05),
///     ],
///     Compounding::Continuous,
///     DayCountConvention::Thirty360,
/// )
/// .unwrap();
///
/// let three_years = Date::from_ymd(2028, 1, 1).unwrap();
/// assert!((curve.spot_rate(three_years) - 0.045).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "ZeroCurveData", into = "ZeroCurveData")]
pub struct ZeroCurve {
    valuation_date: Date,
    dates: Vec<Date>,
    rates: Vec<f64>,
    compounding: Compounding,
    day_count: DayCountConvention,
    /// `None` for a single-pivot (flat) curve.
    interpolator: Option<LinearInterpolator>,
}

/// Serialized form of a [`ZeroCurve`]; validated on the way back in.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ZeroCurveData {
    valuation_date: Date,
    pivots: Vec<(Date, f64)>,
    #[serde(default)]
    compounding: Compounding,
    #[serde(default)]
    day_count: DayCountConvention,
}

impl ZeroCurve {
    /// Builds a curve from (date, zero rate) pivots.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no pivots, pivot dates are not strictly
    /// increasing, a pivot precedes the valuation date, or a rate is
    /// non-finite or below -100%.
    pub fn from_rates(
        valuation_date: Date,
        pivots: &[(Date, f64)],
        compounding: Compounding,
        day_count: DayCountConvention,
    ) -> CurveResult<Self> {
        if pivots.is_empty() {
            return Err(CurveError::insufficient_points(1, 0));
        }

        for (i, &(date, rate)) in pivots.iter().enumerate() {
            if date < valuation_date {
                return Err(CurveError::PivotBeforeValuation {
                    pivot: date,
                    valuation_date,
                });
            }
            if i > 0 && date <= pivots[i - 1].0 {
                return Err(CurveError::NonMonotonicPivots {
                    index: i,
                    prev: pivots[i - 1].0,
                    current: date,
                });
            }
            if !rate.is_finite() {
                return Err(CurveError::invalid_rate(rate, "rate must be finite"));
            }
            if rate < -1.0 {
                return Err(CurveError::invalid_rate(rate, "rate must be >= -1"));
            }
        }

        let dates: Vec<Date> = pivots.iter().map(|&(d, _)| d).collect();
        let rates: Vec<f64> = pivots.iter().map(|&(_, r)| r).collect();

        let interpolator = if pivots.len() == 1 {
            None
        } else {
            let times: Vec<f64> = dates
                .iter()
                .map(|&d| day_count.year_fraction_f64(valuation_date, d))
                .collect();
            // Distinct dates can share a 30/360 year fraction
            if let Some(i) = (1..times.len()).find(|&i| times[i] <= times[i - 1]) {
                return Err(CurveError::NonMonotonicPivots {
                    index: i,
                    prev: dates[i - 1],
                    current: dates[i],
                });
            }
            Some(
                LinearInterpolator::new(times, rates.clone())?
                    .with_extrapolation(Extrapolation::Flat),
            )
        };

        Ok(Self {
            valuation_date,
            dates,
            rates,
            compounding,
            day_count,
            interpolator,
        })
    }

    /// Builds a curve from (date, discount factor) pivots.
    ///
    /// Each discount factor is converted to the zero rate that reproduces it
    /// under `compounding`.
    ///
    /// # Errors
    ///
    /// Returns an error if a discount factor is not strictly positive and
    /// finite, a pivot is not after the valuation date, or the implied
    /// rates fail [`ZeroCurve::from_rates`] validation.
    pub fn from_discount_factors(
        valuation_date: Date,
        pivots: &[(Date, f64)],
        compounding: Compounding,
        day_count: DayCountConvention,
    ) -> CurveResult<Self> {
        let mut rates = Vec::with_capacity(pivots.len());
        for &(date, df) in pivots {
            if !(df.is_finite() && df > 0.0) {
                return Err(CurveError::invalid_rate(
                    df,
                    "discount factor must be positive and finite",
                ));
            }
            let t = day_count.year_fraction_f64(valuation_date, date);
            if t <= 0.0 {
                return Err(CurveError::PivotBeforeValuation {
                    pivot: date,
                    valuation_date,
                });
            }
            rates.push((date, compounding.zero_rate(df, t)));
        }
        Self::from_rates(valuation_date, &rates, compounding, day_count)
    }

    /// Starts a builder for a curve valued at `valuation_date`.
    #[must_use]
    pub fn builder(valuation_date: Date) -> ZeroCurveBuilder {
        ZeroCurveBuilder::new(valuation_date)
    }

    /// Returns the pivot dates.
    #[must_use]
    pub fn pivot_dates(&self) -> &[Date] {
        &self.dates
    }

    /// Returns the pivot zero rates.
    #[must_use]
    pub fn pivot_rates(&self) -> &[f64] {
        &self.rates
    }

    /// Returns the (date, rate) pivots.
    #[must_use]
    pub fn pivots(&self) -> Vec<(Date, f64)> {
        self.dates
            .iter()
            .copied()
            .zip(self.rates.iter().copied())
            .collect()
    }

    /// Returns the number of pivots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Always false; a curve has at least one pivot.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

impl DiscountCurve for ZeroCurve {
    fn valuation_date(&self) -> Date {
        self.valuation_date
    }

    fn compounding(&self) -> Compounding {
        self.compounding
    }

    fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    fn spot_rate(&self, date: Date) -> f64 {
        match &self.interpolator {
            None => self.rates[0],
            Some(interp) => {
                let t = self.year_fraction(date);
                // Flat extrapolation makes every query in range
                interp.interpolate(t).unwrap_or(self.rates[0])
            }
        }
    }
}

impl PartialEq for ZeroCurve {
    fn eq(&self, other: &Self) -> bool {
        self.valuation_date == other.valuation_date
            && self.dates == other.dates
            && self.rates == other.rates
            && self.compounding == other.compounding
            && self.day_count == other.day_count
    }
}

impl TryFrom<ZeroCurveData> for ZeroCurve {
    type Error = CurveError;

    fn try_from(data: ZeroCurveData) -> CurveResult<Self> {
        Self::from_rates(
            data.valuation_date,
            &data.pivots,
            data.compounding,
            data.day_count,
        )
    }
}

impl From<ZeroCurve> for ZeroCurveData {
    fn from(curve: ZeroCurve) -> Self {
        Self {
            valuation_date: curve.valuation_date,
            pivots: curve.pivots(),
            compounding: curve.compounding,
            day_count: curve.day_count,
        }
    }
}

/// Builder for [`ZeroCurve`].
///
/// Pivots may be added in any order; they are sorted by date at build time.
#[derive(Debug, Clone)]
pub struct ZeroCurveBuilder {
    valuation_date: Date,
    pivots: Vec<(Date, f64)>,
    compounding: Compounding,
    day_count: DayCountConvention,
}

impl ZeroCurveBuilder {
    /// Creates a builder with monthly compounding and ACT/365F.
    #[must_use]
    pub fn new(valuation_date: Date) -> Self {
        Self {
            valuation_date,
            pivots: Vec::new(),
            compounding: Compounding::default(),
            day_count: DayCountConvention::default(),
        }
    }

    /// Adds a (date, zero rate) pivot.
    #[must_use]
    pub fn add_pivot(mut self, date: Date, rate: f64) -> Self {
        self.pivots.push((date, rate));
        self
    }

    /// Sets the compounding convention.
    #[must_use]
    pub fn compounding(mut self, compounding: Compounding) -> Self {
        self.compounding = compounding;
        self
    }

    /// Sets the day count convention.
    #[must_use]
    pub fn day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = day_count;
        self
    }

    /// Builds the curve.
    ///
    /// # Errors
    ///
    /// Returns the validation errors of [`ZeroCurve::from_rates`]; duplicate
    /// dates are reported as non-monotonic pivots.
    pub fn build(mut self) -> CurveResult<ZeroCurve> {
        self.pivots.sort_by_key(|&(d, _)| d);
        ZeroCurve::from_rates(
            self.valuation_date,
            &self.pivots,
            self.compounding,
            self.day_count,
        )
    }
}
