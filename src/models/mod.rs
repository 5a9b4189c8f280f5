// Re-export the wire and domain types so code outside can do
// "use crate::models::{Session, ResponseEnvelope, ...};"
pub mod envelope;
pub mod loan;
pub mod session;

pub use envelope::*;
pub use loan::*;
pub use session::*;
