pub mod crawl;
pub mod discover;
pub mod extract;

// Re-export command functions for convenience
pub use crawl::crawl;
pub use discover::discover;
pub use extract::extract;
