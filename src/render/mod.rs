pub mod label;
pub mod scheduler;
pub mod script;
pub mod shape;
