pub mod cli;
pub mod config;
pub mod entity;
pub mod error;
pub mod http;
pub mod service;
pub mod storage;

pub use config::Config;
pub use error::{NotesError, Result};
pub use http::{NotesServer, ServerHandle};
pub use service::NotesService;
