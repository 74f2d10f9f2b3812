// Inference: fitted artifacts, the preprocessing replay and the classifier.
// Everything here is immutable after load and safe to share across requests.

pub mod artifacts;
pub mod classifier;
pub mod preprocessing;
