pub mod memory;
pub mod postgres;
mod repository;

pub use memory::MemoryRepository;
pub use postgres::{create_pool, PgRepository};
pub use repository::Repository;

#[cfg(test)]
pub use repository::MockRepository;
