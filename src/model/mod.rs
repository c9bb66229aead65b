pub mod record;
pub mod validation;

pub use record::*;
pub use validation::*;
