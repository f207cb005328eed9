//! Domain models for the recipe server

pub mod dto;
pub mod page;
pub mod recipe;

pub use dto::{IngredientDto, RecipeDto};
pub use page::{Page, PageRequest};
pub use recipe::{Ingredient, IngredientDraft, Recipe, RecipeDraft};
