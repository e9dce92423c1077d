pub mod gate;
pub mod token;

pub use gate::{AuthGate, Identity};
pub use token::Claims;
