//! Search result assembly
//!
//! Attaches batch-loaded ingredients to the recipes of a page, applies the
//! serving multiplier and maps entities to [`RecipeDto`]s.

use std::collections::HashMap;

use crate::models::{Ingredient, Page, Recipe, RecipeDto};

pub struct ResultAssembler;

impl ResultAssembler {
    /// Group ingredients by owning recipe, keeping their relative order.
    pub fn group_by_recipe(ingredients: Vec<Ingredient>) -> HashMap<i64, Vec<Ingredient>> {
        let mut grouped: HashMap<i64, Vec<Ingredient>> = HashMap::new();
        for ingredient in ingredients {
            grouped
                .entry(ingredient.recipe_id)
                .or_default()
                .push(ingredient);
        }
        grouped
    }

    /// Multiply every quantity by `servings`. Values of 1 or less leave the list untouched.
    ///
    /// Products beyond `i32::MAX` saturate.
    pub fn scale_quantities(ingredients: &mut [Ingredient], servings: i32) {
        if servings <= 1 {
            return;
        }
        for ingredient in ingredients {
            ingredient.quantity = ingredient.quantity.saturating_mul(servings);
        }
    }

    pub fn assemble(
        page: Page<Recipe>,
        ingredients: Vec<Ingredient>,
        servings: i32,
    ) -> Page<RecipeDto> {
        let mut grouped = Self::group_by_recipe(ingredients);

        page.map(|mut recipe| {
            let mut attached = grouped.remove(&recipe.id).unwrap_or_default();
            Self::scale_quantities(&mut attached, servings);
            recipe.ingredients = attached;
            RecipeDto::from(recipe)
        })
    }
}
