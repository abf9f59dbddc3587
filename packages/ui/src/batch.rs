//! Concurrent recipe lookups for favorites and meal plans.

use std::collections::HashMap;

use api::{ResourceClient, Transport};
use futures::future::join_all;
use store::join::unique_recipe_ids;
use store::{EntityId, Recipe};

/// Fetch every referenced recipe at once.
///
/// Ids are de-duplicated first. A lookup that fails leaves its id out of the
/// result; the rest of the batch is unaffected.
pub async fn fetch_recipes_by_id<'a, T, I>(
    client: &ResourceClient<T>,
    ids: I,
) -> HashMap<EntityId, Recipe>
where
    T: Transport,
    I: IntoIterator<Item = &'a EntityId>,
{
    let ids = unique_recipe_ids(ids);
    let lookups = ids.iter().map(|id| client.get_recipe(id));
    let results = join_all(lookups).await;

    ids.into_iter()
        .zip(results)
        .filter_map(|(id, result)| match result {
            Ok(recipe) => Some((id, recipe)),
            Err(e) => {
                tracing::warn!(recipe_id = %id, "Recipe lookup failed: {}", e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::MemoryBackend;
    use serde_json::json;

    #[tokio::test]
    async fn test_failures_are_isolated() {
        let backend = MemoryBackend::new();
        backend.seed("recipes", json!({ "id": 1, "title": "Soup" }));
        backend.seed("recipes", json!({ "id": 2, "title": "Salad" }));
        backend.seed("recipes", json!({ "id": 3, "title": "Stew" }));
        backend.fail_path("/recipes/2");
        let client = ResourceClient::new(backend.clone());

        let ids = [
            EntityId::Num(1),
            EntityId::Text("2".into()),
            EntityId::Num(3),
            EntityId::Text("1".into()),
            EntityId::Num(99),
        ];
        let found = fetch_recipes_by_id(&client, &ids).await;

        assert_eq!(found.len(), 2);
        assert_eq!(found[&EntityId::Num(1)].title, "Soup");
        assert_eq!(found[&EntityId::Num(3)].title, "Stew");
        // duplicates collapse to one request per id
        assert_eq!(backend.request_count(), 4);
    }
}
