// File: ./src/model/item.rs
use crate::error::ValidationError;
use crate::model::parser::{RawPoints, validate_date, validate_name, validate_points};
use chrono::NaiveDate;

/// One welcome-bonus record.
///
/// Every `Card` is valid by construction: the only ways to obtain one are
/// [`Card::new`] and [`crate::model::from_record`], both of which run the
/// field validators.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Card {
    card_name: String,
    welcome_points: u64,
    opened_date: NaiveDate,
}

impl Card {
    /// Validates the three raw inputs in order and builds a card.
    /// Fails on the first invalid field.
    pub fn new<'a>(
        raw_name: &str,
        raw_points: impl Into<RawPoints<'a>>,
        raw_date: &str,
    ) -> Result<Self, ValidationError> {
        let card_name = validate_name(raw_name)?;
        let welcome_points = validate_points(raw_points)?;
        let opened_date = validate_date(raw_date)?;
        Ok(Self::from_parts(card_name, welcome_points, opened_date))
    }

    /// Assembles a card from values that already passed validation.
    pub(crate) fn from_parts(card_name: String, welcome_points: u64, opened_date: NaiveDate) -> Self {
        Self {
            card_name,
            welcome_points,
            opened_date,
        }
    }

    pub fn card_name(&self) -> &str {
        &self.card_name
    }

    pub fn welcome_points(&self) -> u64 {
        self.welcome_points
    }

    pub fn opened_date(&self) -> NaiveDate {
        self.opened_date
    }
}
