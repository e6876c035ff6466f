pub mod executor;
pub mod napcat;

pub use executor::ActionExecutor;
pub use napcat::{HttpNapcat, NapcatApi, NapcatError};
