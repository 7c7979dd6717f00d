//! Fixtures shared by the Socket test suites.

pub mod book;
pub mod provider;
pub mod users;
