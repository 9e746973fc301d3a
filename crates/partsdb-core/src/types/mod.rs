mod decimal;
mod id;
mod ulid;

pub use decimal::*;
pub use id::*;
pub use ulid::*;
