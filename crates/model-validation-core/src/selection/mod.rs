//! Feature-selection policies driven by an external model fitter.

pub mod backward;
