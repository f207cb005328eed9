//! HTTP request and response bodies

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::{IngredientDraft, IngredientDto, RecipeDraft, RecipeDto};

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank"));
    }
    Ok(())
}

/// Body of create and update requests.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRequest {
    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "Title is required."),
        length(min = 3, max = 255, message = "Title size must be between 3 and 255")
    )]
    pub title: String,

    #[validate(length(min = 3, max = 255, message = "Description size must be between 3 and 255"))]
    pub description: Option<String>,

    #[serde(default)]
    pub vegetarian: bool,

    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Instructions are required."))]
    pub instructions: String,

    #[serde(default)]
    #[validate(
        length(min = 1, message = "The recipe must contain 1 ingredient at least."),
        nested
    )]
    pub ingredients: Vec<IngredientRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct IngredientRequest {
    pub id: Option<i64>,

    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "Name is required."),
        length(min = 3, max = 255, message = "Name size must be between 3 and 255")
    )]
    pub name: String,

    #[serde(default)]
    #[validate(range(min = 1, message = "Quantity must be bigger than zero"))]
    pub quantity: i32,

    pub unit: Option<String>,
}

impl From<RecipeRequest> for RecipeDraft {
    fn from(request: RecipeRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            vegetarian: request.vegetarian,
            instructions: request.instructions,
            ingredients: request
                .ingredients
                .into_iter()
                .map(IngredientDraft::from)
                .collect(),
        }
    }
}

impl From<IngredientRequest> for IngredientDraft {
    fn from(request: IngredientRequest) -> Self {
        Self {
            id: request.id,
            name: request.name,
            quantity: request.quantity,
            unit: request.unit,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecipeIdResponse {
    pub id: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub vegetarian: bool,
    pub instructions: String,
    pub ingredients: Vec<IngredientResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientResponse {
    pub id: i64,
    pub name: String,
    pub quantity: i32,
    pub unit: Option<String>,
}

impl From<RecipeDto> for RecipeResponse {
    fn from(dto: RecipeDto) -> Self {
        Self {
            id: dto.id,
            title: dto.title,
            description: dto.description,
            vegetarian: dto.vegetarian,
            instructions: dto.instructions,
            ingredients: dto
                .ingredients
                .into_iter()
                .map(IngredientResponse::from)
                .collect(),
            created_at: dto.created_at,
            updated_at: dto.updated_at,
        }
    }
}

impl From<IngredientDto> for IngredientResponse {
    fn from(dto: IngredientDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            quantity: dto.quantity,
            unit: dto.unit,
        }
    }
}
