mod intent;
mod upload;

pub use intent::IntentParameters;
pub use upload::{MediaType, Upload};
