//! Database layer - repositories and data access

pub mod memory;
pub mod schema;
pub mod search;
pub mod store;
pub mod traits;

pub use memory::InMemoryRecipeStore;
pub use schema::ensure_schema;
pub use search::{SearchEngine, SearchFilters};
pub use store::PostgresRecipeStore;
pub use traits::{IngredientRepository, RecipeRepository};
