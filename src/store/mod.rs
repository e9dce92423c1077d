pub mod tools;
pub mod users;

pub use tools::ToolStore;
pub use users::UserDirectory;
