//! Constant quantization and transform tables shared by the descriptor
//! engines.

pub mod scalable;
pub mod structure;

pub use scalable::{COEFFICIENT_ORDER, COEFFICIENT_QUANT, CoefficientQuant, HAAR_BUTTERFLIES};
pub use structure::{QuantLevel, Subspace, quant_func};
