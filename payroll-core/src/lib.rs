pub mod batch;
pub mod calculations;
pub mod models;

pub use batch::{BatchProcessor, PayslipRow};
pub use calculations::{PayslipCalculator, PayslipError};
pub use models::*;
