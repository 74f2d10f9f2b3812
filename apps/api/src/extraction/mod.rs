// Document → text → FeatureRecord. Both stages are stateless and never touch
// the fitted model.

pub mod document;
pub mod features;
