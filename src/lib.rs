// Dashboard builder - widget state model, client adapters and the snapshot service
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

#[cfg(test)]
pub(crate) mod test_utils;
