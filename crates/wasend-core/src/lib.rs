pub mod app;
pub mod collab;
pub mod config;
pub mod confirm;
pub mod contact;
pub mod error;
pub mod filter;
pub mod io;
pub mod paths;
pub mod personalize;
pub mod repository;
pub mod storage;
pub mod store;
pub mod types;

pub use error::{Result, WasendError};
