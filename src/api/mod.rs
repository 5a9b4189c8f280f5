pub mod auth;
pub mod loan;

pub use auth::AuthApi;
pub use loan::LoanApi;
