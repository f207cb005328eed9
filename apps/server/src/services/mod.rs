//! Business logic services

pub mod assembler;
pub mod recipe;

pub use assembler::ResultAssembler;
pub use recipe::RecipeService;
