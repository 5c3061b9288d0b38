//! Data access: statement execution normalized into outcomes, plus request validation.

mod accessor;
mod outcome;
mod validation;
pub use accessor::DataAccessor;
pub use outcome::{FailureKind, Outcome};
pub use validation::{FieldFormat, FieldRule, RequestValidator, PROJECT_RULES};
