pub mod tools_service;

pub use tools_service::ToolsService;
