pub mod canonical;
pub mod errors;
pub mod key;
pub mod location;

pub use canonical::*;
pub use errors::*;
pub use key::*;
pub use location::*;
