pub mod error;
pub mod plan;
pub mod prefix;

pub use error::{NumberingError, Result};
pub use plan::PhonenumberPlan;
pub use prefix::PrefixDescriptions;
