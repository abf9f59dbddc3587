//! # Resource Client: typed requests per collection
//!
//! [`ResourceClient`] exposes one method per (entity, verb) pair over any
//! [`Transport`]. It is a cheap `Clone` (the transport sits behind an `Arc`) so
//! every screen controller can hold its own handle.
//!
//! ## Failure mapping
//!
//! | Outcome | Result |
//! |---------|--------|
//! | Input rejected before sending | [`Error::Validation`], no request issued |
//! | `404` on a by-id recipe read | [`Error::NotFound`] |
//! | Any other non-2xx, transport failure, or unreadable body | [`Error::Request`] with a generic per-operation message |
//! | Empty list | `Ok(vec![])`, never an error |
//!
//! ## Record hygiene
//!
//! The backing store is known to hold malformed rows (e.g. a meal plan whose
//! `userId` is an object). List reads parse record by record and skip rows that
//! do not fit the model instead of failing the whole list. Meal-plan rows are
//! additionally required to carry scalar `userId`/`recipeId` and non-empty
//! `day`/`mealType`.

use std::sync::Arc;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use store::{
    Category, EntityId, Favorite, MealPlanDraft, MealPlanEntry, NewCategory, NewFavorite,
    NewMealPlanEntry, NewUser, Recipe, RecipePayload, User,
};

use crate::error::{Error, Result};
use crate::transport::{ApiRequest, ApiResponse, Transport};

/// Typed access to the recipe backend's collections.
pub struct ResourceClient<T> {
    transport: Arc<T>,
}

impl<T> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T: Transport> ResourceClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    async fn send(&self, request: ApiRequest, failure: &'static str) -> Result<ApiResponse> {
        tracing::debug!(method = ?request.method, path = %request.path, query = ?request.query, "api request");
        self.transport.send(request).await.map_err(|e| {
            tracing::warn!("{}: {}", failure, e);
            Error::Request(failure.to_string())
        })
    }

    async fn call(&self, request: ApiRequest, failure: &'static str) -> Result<Value> {
        let response = self.send(request, failure).await?;
        check(response, failure)
    }

    async fn fetch<R: DeserializeOwned>(&self, request: ApiRequest, failure: &'static str) -> Result<R> {
        let body = self.call(request, failure).await?;
        decode(body, failure)
    }

    async fn fetch_list<R: DeserializeOwned>(
        &self,
        request: ApiRequest,
        failure: &'static str,
        keep: fn(&Value) -> bool,
    ) -> Result<Vec<R>> {
        let body = self.call(request, failure).await?;
        let rows = match body {
            Value::Array(rows) => rows,
            Value::Null => Vec::new(),
            other => {
                tracing::warn!("{}: expected a list, got {}", failure, other);
                return Err(Error::Request(failure.to_string()));
            }
        };
        Ok(parse_rows(rows, keep))
    }

    // ---- recipes ----

    pub async fn list_recipes(&self) -> Result<Vec<Recipe>> {
        self.fetch_list(ApiRequest::get("/recipes"), "Failed to fetch recipes", any_row)
            .await
    }

    pub async fn get_recipe(&self, id: &EntityId) -> Result<Recipe> {
        if id.is_blank() {
            return Err(Error::validation("id", "Invalid recipe id."));
        }
        let failure = "Failed to fetch recipe";
        let response = self.send(ApiRequest::get(format!("/recipes/{id}")), failure).await?;
        if response.status == 404 {
            return Err(Error::NotFound("Recipe not found.".to_string()));
        }
        decode(check(response, failure)?, failure)
    }

    pub async fn create_recipe(&self, payload: &RecipePayload) -> Result<Recipe> {
        let body = encode(payload, "Failed to create recipe")?;
        self.fetch(ApiRequest::post("/recipes", body), "Failed to create recipe")
            .await
    }

    pub async fn update_recipe(&self, id: &EntityId, payload: &RecipePayload) -> Result<Recipe> {
        let body = encode(payload, "Failed to update recipe")?;
        self.fetch(ApiRequest::put(format!("/recipes/{id}"), body), "Failed to update recipe")
            .await
    }

    pub async fn delete_recipe(&self, id: &EntityId) -> Result<()> {
        self.call(ApiRequest::delete(format!("/recipes/{id}")), "Failed to delete recipe")
            .await
            .map(|_| ())
    }

    // ---- categories ----

    pub async fn list_categories(&self) -> Result<Vec<Category>> {
        self.fetch_list(ApiRequest::get("/categories"), "Failed to fetch categories", any_row)
            .await
    }

    pub async fn create_category(&self, category: &NewCategory) -> Result<Category> {
        let body = encode(category, "Failed to create category")?;
        self.fetch(ApiRequest::post("/categories", body), "Failed to create category")
            .await
    }

    pub async fn delete_category(&self, id: &EntityId) -> Result<()> {
        self.call(ApiRequest::delete(format!("/categories/{id}")), "Failed to delete category")
            .await
            .map(|_| ())
    }

    // ---- favorites ----

    pub async fn list_favorites(&self, user_id: &EntityId) -> Result<Vec<Favorite>> {
        let request = ApiRequest::get("/favorites").with_query("userId", user_id);
        self.fetch_list(request, "Failed to fetch favorites", any_row).await
    }

    /// The user's favorite for `recipe_id`, if one exists.
    pub async fn find_favorite(&self, user_id: &EntityId, recipe_id: &EntityId) -> Result<Option<Favorite>> {
        let request = ApiRequest::get("/favorites")
            .with_query("userId", user_id)
            .with_query("recipeId", recipe_id);
        let found: Vec<Favorite> = self.fetch_list(request, "Failed to fetch favorite", any_row).await?;
        Ok(found.into_iter().next())
    }

    pub async fn add_favorite(&self, favorite: &NewFavorite) -> Result<Favorite> {
        let body = encode(favorite, "Failed to add favorite")?;
        self.fetch(ApiRequest::post("/favorites", body), "Failed to add favorite")
            .await
    }

    pub async fn delete_favorite(&self, id: &EntityId) -> Result<()> {
        self.call(ApiRequest::delete(format!("/favorites/{id}")), "Failed to delete favorite")
            .await
            .map(|_| ())
    }

    // ---- meal plans ----

    /// The user's meal-plan entries, with malformed rows silently dropped.
    pub async fn list_meal_plans(&self, user_id: &EntityId) -> Result<Vec<MealPlanEntry>> {
        let request = ApiRequest::get("/mealPlans").with_query("userId", user_id);
        self.fetch_list(request, "Failed to fetch meal plans", well_formed_meal_plan)
            .await
    }

    /// Validate and store a meal-plan entry. Nothing is sent unless the draft
    /// names a user, a recipe, a day and a meal.
    pub async fn add_meal_plan(&self, draft: MealPlanDraft) -> Result<MealPlanEntry> {
        let entry = complete_meal_plan(draft)?;
        let body = encode(&entry, "Failed to add meal plan")?;
        self.fetch(ApiRequest::post("/mealPlans", body), "Failed to add meal plan")
            .await
    }

    pub async fn delete_meal_plan(&self, id: &EntityId) -> Result<()> {
        self.call(ApiRequest::delete(format!("/mealPlans/{id}")), "Failed to delete meal plan")
            .await
            .map(|_| ())
    }

    // ---- users ----

    pub async fn find_users_by_email(&self, email: &str) -> Result<Vec<User>> {
        let request = ApiRequest::get("/users").with_query("email", email);
        self.fetch_list(request, "Failed to fetch users", any_row).await
    }

    pub async fn create_user(&self, user: &NewUser) -> Result<User> {
        let body = encode(user, "Failed to register user")?;
        self.fetch(ApiRequest::post("/users", body), "Failed to register user")
            .await
    }
}

fn check(response: ApiResponse, failure: &'static str) -> Result<Value> {
    if response.is_success() {
        Ok(response.body)
    } else {
        tracing::warn!(status = response.status, "{}", failure);
        Err(Error::Request(failure.to_string()))
    }
}

fn decode<R: DeserializeOwned>(body: Value, failure: &'static str) -> Result<R> {
    serde_json::from_value(body).map_err(|e| {
        tracing::warn!("{}: unreadable body: {}", failure, e);
        Error::Request(failure.to_string())
    })
}

fn encode<B: Serialize>(body: &B, failure: &'static str) -> Result<Value> {
    serde_json::to_value(body).map_err(|e| {
        tracing::warn!("{}: cannot encode body: {}", failure, e);
        Error::Request(failure.to_string())
    })
}

fn parse_rows<R: DeserializeOwned>(rows: Vec<Value>, keep: fn(&Value) -> bool) -> Vec<R> {
    rows.into_iter()
        .filter(|row| {
            let ok = keep(row);
            if !ok {
                tracing::debug!("skipping malformed row: {}", row);
            }
            ok
        })
        .filter_map(|row| match serde_json::from_value(row) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::debug!("skipping unreadable row: {}", e);
                None
            }
        })
        .collect()
}

fn any_row(_: &Value) -> bool {
    true
}

fn is_scalar(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::String(_)) | Some(Value::Number(_)))
}

fn non_empty_text(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::String(s)) if !s.trim().is_empty())
}

fn well_formed_meal_plan(row: &Value) -> bool {
    is_scalar(row.get("userId"))
        && is_scalar(row.get("recipeId"))
        && non_empty_text(row.get("day"))
        && non_empty_text(row.get("mealType"))
}

fn complete_meal_plan(draft: MealPlanDraft) -> Result<NewMealPlanEntry> {
    let missing = |field: &'static str| {
        Error::validation(field, format!("Meal plan payload is invalid: {field} is required."))
    };
    let user_id = draft
        .user_id
        .filter(|id| !id.is_blank())
        .ok_or_else(|| missing("userId"))?;
    let recipe_id = draft
        .recipe_id
        .filter(|id| !id.is_blank())
        .ok_or_else(|| missing("recipeId"))?;
    let day = draft.day.ok_or_else(|| missing("day"))?;
    let meal_type = draft.meal_type.ok_or_else(|| missing("mealType"))?;

    Ok(NewMealPlanEntry {
        user_id,
        recipe_id,
        day,
        meal_type,
        created_at: draft.created_at.unwrap_or_else(Utc::now),
    })
}
