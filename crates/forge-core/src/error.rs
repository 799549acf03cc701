//! Error taxonomy for geometry computation

use crate::ScaleType;
use thiserror::Error;

/// Contract violations detected while turning data points into geometry.
///
/// Missing values are not errors (they are filtered out) and duplicate
/// activations are no-ops, so neither appears here.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    #[error("label `{label}` cannot be normalized for a {scale_type} scale")]
    InvalidLabel { label: String, scale_type: ScaleType },

    #[error("value `{value}` is not mapped by the scale")]
    Unmapped { value: String },

    #[error("value for `{label}` is not finite")]
    NonFiniteValue { label: String },
}

pub type Result<T> = std::result::Result<T, ChartError>;
