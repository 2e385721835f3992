// File: ./src/model/adapter.rs
// Converts between a Card and its on-disk JSON shape
use crate::error::ValidationError;
use crate::model::item::Card;
use crate::model::parser::{DATE_FORMAT, RawPoints, validate_date, validate_name, validate_points};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Plain-data form of a card as stored in the data file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub card_name: String,
    pub welcome_points: u64,
    pub opened_date: String,
}

pub fn to_record(card: &Card) -> Record {
    Record {
        card_name: card.card_name().to_string(),
        welcome_points: card.welcome_points(),
        opened_date: card.opened_date().format(DATE_FORMAT).to_string(),
    }
}

/// Re-validates every field of a stored entry. Hand-edited files may hold
/// any JSON scalar in any slot, so wrong types map onto the validation
/// failure of the field they sit in.
pub fn from_record(record: &Map<String, Value>) -> Result<Card, ValidationError> {
    let name = record
        .get("card_name")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let card_name = validate_name(name)?;

    let welcome_points = match record.get("welcome_points") {
        Some(Value::Number(n)) => match n.as_i64().map(i128::from).or(n.as_u64().map(i128::from)) {
            Some(n) => validate_points(RawPoints::Integer(n))?,
            None => return Err(ValidationError::NotPositiveInteger),
        },
        Some(Value::String(s)) => validate_points(s)?,
        _ => return Err(ValidationError::NotPositiveInteger),
    };

    let date = record
        .get("opened_date")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let opened_date = validate_date(date)?;

    Ok(Card::from_parts(card_name, welcome_points, opened_date))
}

impl From<&Card> for Record {
    fn from(card: &Card) -> Self {
        to_record(card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(m) => m,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn test_to_record_renders_iso_date() {
        let card = Card::new("Amex Gold", 75000, "2025-11-20").unwrap();
        let record = to_record(&card);
        assert_eq!(
            record,
            Record {
                card_name: "Amex Gold".to_string(),
                welcome_points: 75000,
                opened_date: "2025-11-20".to_string(),
            }
        );
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"card_name": "Amex Gold", "welcome_points": 75000, "opened_date": "2025-11-20"})
        );
    }

    #[test]
    fn test_from_record_accepts_string_points() {
        let card = from_record(&map(json!({
            "card_name": "  Chase Sapphire Preferred ",
            "welcome_points": "60000",
            "opened_date": "2025-01-15"
        })))
        .unwrap();
        assert_eq!(card.card_name(), "Chase Sapphire Preferred");
        assert_eq!(card.welcome_points(), 60000);
        assert_eq!(to_record(&card).opened_date, "2025-01-15");
    }

    #[test]
    fn test_from_record_reports_first_bad_field() {
        // Name is checked before points and date
        let err = from_record(&map(json!({
            "card_name": "",
            "welcome_points": -1,
            "opened_date": "nope"
        })))
        .unwrap_err();
        assert_eq!(err, ValidationError::EmptyName);

        let err = from_record(&map(json!({
            "card_name": "Amex Gold",
            "welcome_points": 12.5,
            "opened_date": "2025-11-20"
        })))
        .unwrap_err();
        assert_eq!(err, ValidationError::NotPositiveInteger);

        let err = from_record(&map(json!({
            "card_name": "Amex Gold",
            "welcome_points": 1000,
            "opened_date": 20251120
        })))
        .unwrap_err();
        assert_eq!(err, ValidationError::BadDateFormat);
    }

    #[test]
    fn test_from_record_missing_and_mistyped_fields() {
        assert_eq!(
            from_record(&Map::new()).unwrap_err(),
            ValidationError::EmptyName
        );
        assert_eq!(
            from_record(&map(json!({"card_name": 42}))).unwrap_err(),
            ValidationError::EmptyName
        );
        assert_eq!(
            from_record(&map(json!({"card_name": "X", "welcome_points": true}))).unwrap_err(),
            ValidationError::NotPositiveInteger
        );
        assert_eq!(
            from_record(&map(json!({"card_name": "X", "welcome_points": 5}))).unwrap_err(),
            ValidationError::BadDateFormat
        );
    }
}
