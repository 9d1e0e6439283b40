//! Sailing and rate types.
//!
//! A `Sailing` is one voyage leg offered by a carrier. Sailings are shared
//! between the snapshot, the networks built for a query and the resulting
//! itinerary, so they are handed around as `Arc<Sailing>`.

use chrono::NaiveDate;

use super::{DomainError, Money, PortCode};

/// The price of one sailing.
///
/// # Invariants
///
/// - The amount is strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rate {
    amount: Money,
}

impl Rate {
    /// Construct a rate, rejecting zero or negative amounts.
    pub fn new(amount: Money) -> Result<Self, DomainError> {
        if amount.cents() <= 0 {
            return Err(DomainError::NonPositiveRate(amount.cents()));
        }
        Ok(Self { amount })
    }

    /// Returns the price.
    pub fn amount(&self) -> Money {
        self.amount
    }
}

/// One voyage leg between two ports.
///
/// # Invariants
///
/// - `code` is non-empty
/// - `arrival_date > departure_date`
/// - At most one rate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sailing {
    code: String,
    origin: PortCode,
    destination: PortCode,
    departure_date: NaiveDate,
    arrival_date: NaiveDate,
    rate: Option<Rate>,
}

impl Sailing {
    /// Construct an un-priced sailing, validating its dates.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the code is empty or the sailing does not arrive
    /// strictly after it departs.
    ///
    /// # Examples
    ///
    /// ```
    /// use freight_router::domain::{Currency, Money, PortCode, Rate, Sailing};
    /// use chrono::NaiveDate;
    ///
    /// let dep = NaiveDate::from_ymd_opt(2022, 2, 1).unwrap();
    /// let arr = NaiveDate::from_ymd_opt(2022, 3, 1).unwrap();
    /// let usd = Currency::parse("USD").unwrap();
    ///
    /// let sailing = Sailing::new(
    ///     "ABCD",
    ///     PortCode::parse("CNSHA").unwrap(),
    ///     PortCode::parse("NLRTM").unwrap(),
    ///     dep,
    ///     arr,
    /// )
    /// .unwrap()
    /// .with_rate(Rate::new(Money::from_cents(58930, usd)).unwrap());
    ///
    /// assert_eq!(sailing.duration_days(), 28);
    /// assert!(sailing.rate().is_some());
    ///
    /// // Arrival must be after departure
    /// assert!(Sailing::new("X", sailing.origin().clone(), sailing.destination().clone(), arr, dep).is_err());
    /// ```
    pub fn new(
        code: impl Into<String>,
        origin: PortCode,
        destination: PortCode,
        departure_date: NaiveDate,
        arrival_date: NaiveDate,
    ) -> Result<Self, DomainError> {
        let code = code.into();
        if code.trim().is_empty() {
            return Err(DomainError::EmptySailingCode);
        }

        if arrival_date <= departure_date {
            return Err(DomainError::ArrivalNotAfterDeparture {
                code,
                departure: departure_date,
                arrival: arrival_date,
            });
        }

        Ok(Self {
            code,
            origin,
            destination,
            departure_date,
            arrival_date,
            rate: None,
        })
    }

    /// Attach a rate, replacing any existing one.
    pub fn with_rate(mut self, rate: Rate) -> Self {
        self.rate = Some(rate);
        self
    }

    /// Returns the unique sailing code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the port this sailing departs from.
    pub fn origin(&self) -> &PortCode {
        &self.origin
    }

    /// Returns the port this sailing arrives at.
    pub fn destination(&self) -> &PortCode {
        &self.destination
    }

    pub fn departure_date(&self) -> NaiveDate {
        self.departure_date
    }

    pub fn arrival_date(&self) -> NaiveDate {
        self.arrival_date
    }

    /// Returns the rate, if the sailing is priced.
    pub fn rate(&self) -> Option<&Rate> {
        self.rate.as_ref()
    }

    /// Whole days at sea. Always at least 1.
    pub fn duration_days(&self) -> i64 {
        (self.arrival_date - self.departure_date).num_days()
    }
}
