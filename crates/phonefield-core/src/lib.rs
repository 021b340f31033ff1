pub mod directory;
pub mod domain;
pub mod error;
pub mod plan;
pub mod resolver;

pub use directory::{DirectoryError, UserDirectory};
pub use domain::*;
pub use error::{CoreError, PhoneError, PhoneErrorKind};
pub use plan::{NumberingPlan, ParseFailure};
pub use resolver::PhoneResolver;
