//! Goodness-of-fit testing for predicted probabilities.

pub mod hosmer_lemeshow;
pub mod quantile;
