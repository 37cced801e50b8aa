pub mod aggregate;
pub mod completeness;
pub mod errors;
pub mod sex;
pub mod store;

// re-exports
pub use aggregate::*;
pub use completeness::*;
pub use errors::CoverageError;
pub use sex::*;
pub use store::*;
