use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use steam_predictor::{
    Error, Result,
    harvester::{CatalogApi, CatalogRecord},
    model::{Classifier, FeatureFrame, ModelInfo},
};

/// Classifier that returns the same probabilities for every row.
#[derive(Debug)]
pub struct MockClassifier {
    pub classes: Vec<i64>,
    pub probability: Vec<f64>,
    pub error: Option<String>,
    pub frames: Arc<Mutex<Vec<FeatureFrame>>>,
}

impl MockClassifier {
    pub fn new(probability: Vec<f64>) -> Self {
        let classes = (0..probability.len() as i64).collect();
        Self {
            classes,
            probability,
            error: None,
            frames: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_classes(mut self, classes: Vec<i64>) -> Self {
        self.classes = classes;
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn get_frames(&self) -> Vec<FeatureFrame> {
        self.frames.lock().unwrap().clone()
    }
}

impl Classifier for MockClassifier {
    fn classes(&self) -> &[i64] {
        &self.classes
    }

    fn predict_proba(&self, frame: &FeatureFrame) -> Result<Vec<Vec<f64>>> {
        self.frames.lock().unwrap().push(frame.clone());

        if let Some(ref error) = self.error {
            return Err(Error::inference(error.clone()));
        }
        Ok(vec![self.probability.clone(); frame.len()])
    }

    fn info(&self) -> ModelInfo {
        ModelInfo {
            classes: self.classes.clone(),
            class_names: vec![],
            objective: "mock".to_string(),
            n_trees: 0,
            n_features: 0,
        }
    }
}

/// Catalog with scripted pages and detail records, recording every request.
#[derive(Debug, Default)]
pub struct MockCatalogApi {
    pub pages: HashMap<u32, Vec<CatalogRecord>>,
    pub failing_pages: HashSet<u32>,
    pub details: HashMap<u64, CatalogRecord>,
    pub failing_details: HashSet<u64>,
    pub page_requests: Arc<Mutex<Vec<u32>>>,
    pub detail_requests: Arc<Mutex<Vec<u64>>>,
}

impl MockCatalogApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: u32, records: Vec<CatalogRecord>) -> Self {
        self.pages.insert(page, records);
        self
    }

    pub fn with_failing_page(mut self, page: u32) -> Self {
        self.failing_pages.insert(page);
        self
    }

    pub fn with_details(mut self, appid: u64, record: CatalogRecord) -> Self {
        self.details.insert(appid, record);
        self
    }

    pub fn with_failing_details(mut self, appid: u64) -> Self {
        self.failing_details.insert(appid);
        self
    }

    /// Shared handles to the request logs, usable after the mock is boxed.
    pub fn request_logs(&self) -> (Arc<Mutex<Vec<u32>>>, Arc<Mutex<Vec<u64>>>) {
        (
            Arc::clone(&self.page_requests),
            Arc::clone(&self.detail_requests),
        )
    }
}

#[async_trait]
impl CatalogApi for MockCatalogApi {
    async fn fetch_page(&self, page: u32) -> Result<Vec<CatalogRecord>> {
        self.page_requests.lock().unwrap().push(page);

        if self.failing_pages.contains(&page) {
            return Err(Error::catalog(format!("page {page} unavailable")));
        }
        Ok(self.pages.get(&page).cloned().unwrap_or_default())
    }

    async fn fetch_details(&self, appid: u64) -> Result<CatalogRecord> {
        self.detail_requests.lock().unwrap().push(appid);

        if self.failing_details.contains(&appid) {
            return Err(Error::catalog(format!("appid {appid} timed out")));
        }
        self.details
            .get(&appid)
            .cloned()
            .ok_or_else(|| Error::catalog(format!("appid {appid} unknown")))
    }
}
