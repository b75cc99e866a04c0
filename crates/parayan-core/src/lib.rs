pub mod config;
pub mod cycle;
pub mod error;
pub mod group;
pub mod io;
pub mod member;
pub mod message;
pub mod paths;
pub mod roster;
pub mod schedule;
pub mod session;

pub use error::{ParayanError, Result};
