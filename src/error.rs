use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocError {
    #[error("AccumImage rectangle has huge or negative dimensions: {width}x{height}")]
    HugeOrNegative { width: i32, height: i32 },
}
