pub mod tool;
pub mod user;

pub use tool::*;
pub use user::*;
