// Next.js CRUD scaffolding from JHipster entity definitions

// Configuration - where definitions, templates and the app live
pub mod config;

// Entity definition model - the JSON input
pub mod definition;

// Code generation pipeline
pub mod codegen;

// Common utilities
pub mod error;

// Re-exports for convenience
pub use codegen::NextJsGenerator;
pub use config::Config;
pub use error::{CodegenError, CodegenResult};
