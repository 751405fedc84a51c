use crate::predictor::PredictionRequest;

/// Column names of the frame, in the order the model was trained on.
pub const COLUMNS: [&str; 5] = ["price", "initialprice", "languages", "genre", "tags"];

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    pub price: f64,
    pub initialprice: f64,
    pub languages: Vec<String>,
    pub genre: Vec<String>,
    pub tags: Vec<String>,
}

/// Tabular input handed to a classifier. The service only ever builds one row.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureFrame {
    rows: Vec<FeatureRow>,
}

impl FeatureFrame {
    pub fn new(rows: Vec<FeatureRow>) -> Self {
        Self { rows }
    }

    pub fn single(request: &PredictionRequest) -> Self {
        Self::new(vec![FeatureRow::from(request)])
    }

    pub fn columns(&self) -> &'static [&'static str] {
        &COLUMNS
    }

    pub fn rows(&self) -> &[FeatureRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl From<&PredictionRequest> for FeatureRow {
    fn from(request: &PredictionRequest) -> Self {
        Self {
            price: request.price,
            initialprice: request.initialprice,
            languages: request.languages.clone(),
            genre: request.genre.clone(),
            tags: request.tags.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_row_frame_from_request() {
        let request = PredictionRequest {
            price: 2.99,
            initialprice: 4.99,
            languages: vec!["English".to_string()],
            genre: vec!["Indie".to_string()],
            tags: vec!["Indie".to_string(), "Action".to_string()],
        };

        let frame = FeatureFrame::single(&request);
        assert_eq!(frame.len(), 1);
        assert_eq!(
            frame.columns(),
            &["price", "initialprice", "languages", "genre", "tags"]
        );

        let row = &frame.rows()[0];
        assert_eq!(row.price, 2.99);
        assert_eq!(row.initialprice, 4.99);
        assert_eq!(row.tags, vec!["Indie", "Action"]);
    }
}
