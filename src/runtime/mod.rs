//! Runtime adapters used to spawn poll tasks.

pub mod tokio_spawner;

pub use tokio_spawner::TokioSpawner;
