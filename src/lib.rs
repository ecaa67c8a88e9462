pub mod clients;
pub mod config;
pub mod init;
pub mod logging;
pub mod model;
pub mod prompt;
pub mod validate;

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;
