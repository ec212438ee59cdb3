pub mod helpers;
pub mod mock_store;

pub use helpers::*;
pub use mock_store::{MockStore, StoreBehavior};
