pub mod info;
pub mod open;
pub mod seal;
pub mod verify;

pub use info::*;
pub use open::*;
pub use seal::*;
pub use verify::*;
