pub mod error;
pub mod format;
pub mod labels;
pub mod platform;
pub mod prediction;
pub mod schema;

pub use error::CoreError;
pub use labels::LabelSchema;
pub use platform::Platform;
pub use prediction::{PredictionResult, UserPrediction, argmax};
pub use schema::batch;
