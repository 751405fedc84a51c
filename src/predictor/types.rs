use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Attributes of a game as sent to `POST /api/steam/v1/predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub price: f64,
    pub initialprice: f64,
    pub languages: Vec<String>,
    pub genre: Vec<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionOutput {
    pub target: i64,
    pub probability: Vec<f64>,
}

impl PredictionRequest {
    /// Rejects prices that cannot come from a real store listing.
    pub fn validate(&self) -> Result<()> {
        check_price("price", self.price)?;
        check_price("initialprice", self.initialprice)?;
        Ok(())
    }
}

fn check_price(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(Error::validation(format!("{field} must be a finite number")));
    }
    if value < 0.0 {
        return Err(Error::validation(format!(
            "{field} must be non-negative, got {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(price: f64, initialprice: f64) -> PredictionRequest {
        PredictionRequest {
            price,
            initialprice,
            languages: vec!["English".to_string()],
            genre: vec!["Indie".to_string()],
            tags: vec!["Indie".to_string(), "Action".to_string()],
        }
    }

    #[test]
    fn test_free_game_is_valid() {
        assert!(request(0.0, 0.0).validate().is_ok());
    }

    #[test]
    fn test_negative_price_is_rejected() {
        let err = request(-1.0, 2.99).validate().unwrap_err();
        assert!(err.is_client_error());
        assert!(err.to_string().contains("price must be non-negative"));
    }

    #[test]
    fn test_nan_initial_price_is_rejected() {
        let err = request(2.99, f64::NAN).validate().unwrap_err();
        assert!(err.to_string().contains("initialprice must be a finite number"));
    }

    #[test]
    fn test_request_rejects_string_price() {
        let body = json!({
            "price": "2.99",
            "initialprice": 2.99,
            "languages": [],
            "genre": [],
            "tags": []
        });
        assert!(serde_json::from_value::<PredictionRequest>(body).is_err());
    }

    #[test]
    fn test_request_keeps_list_order() {
        let body = json!({
            "price": 2.99,
            "initialprice": 2.99,
            "languages": ["English"],
            "genre": ["Indie"],
            "tags": ["Indie", "Action", "Indie"]
        });
        let parsed: PredictionRequest = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.tags, vec!["Indie", "Action", "Indie"]);
    }
}
