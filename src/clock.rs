//! Defines the [`Clock`] trait, the wall-clock dependency for values that
//! change with the date of the build (e.g., the copyright year in the site
//! footer).

use chrono::{Local, NaiveDate};

/// A source of the current date.
pub trait Clock {
    /// Returns the current calendar date.
    fn today(&self) -> NaiveDate;
}

/// Reads the system's local wall clock on every call.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().naive_local().date()
    }
}

/// Always reports the same date. Used to keep output deterministic.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
