//! SurrealDB repository implementations.

mod design;

pub use design::SurrealDesignRepository;
