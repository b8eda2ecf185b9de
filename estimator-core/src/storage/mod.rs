pub mod projects;

pub use projects::{ProjectRecord, ProjectStore};
