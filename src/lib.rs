pub mod collector;
pub mod config;
pub mod error;
pub mod harvester;
pub mod logging;
pub mod model;
pub mod predictor;
pub mod server;

pub use error::{Error, Result};
