pub mod content;
pub mod gitignore;
pub mod mutation;
pub mod paths;
pub mod provider;
pub mod repository;
pub mod search;
pub mod tree;

#[cfg(test)]
pub mod test_support;

pub use provider::{shared, SharedProvider};
pub use repository::LocalProvider;
