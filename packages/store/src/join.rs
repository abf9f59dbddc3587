//! # Join and enrichment of fetched collections
//!
//! Screens fetch partial, denormalised collections (a user's favorites, their
//! meal-plan entries, the recipe list, the category list) and this module turns
//! them into display-ready records. Nothing here does I/O, so every rule can be
//! exercised without a backend.
//!
//! Two asymmetries are deliberate parts of the contract:
//!
//! - [`enrich_favorites`] **drops** favorites whose recipe could not be
//!   resolved; an orphaned bookmark is not worth showing.
//! - [`group_meal_plan`] **keeps** entries whose recipe is missing and renders
//!   them with the [`MISSING_RECIPE`] placeholder, so the user can still remove
//!   them from the plan.

use std::collections::{HashMap, HashSet};

use crate::models::{Category, EntityId, Favorite, MealPlanEntry, Recipe};

/// Shown in place of a category name when the reference dangles.
pub const MISSING_CATEGORY: &str = "—";

/// Shown in place of a recipe title for a meal-plan entry whose recipe is gone.
pub const MISSING_RECIPE: &str = "Recipe not found";

/// Category filter sentinel value that disables category filtering.
pub const ALL_CATEGORIES: &str = "all";

/// Index recipes by their normalised id.
pub fn recipes_by_id<I>(recipes: I) -> HashMap<EntityId, Recipe>
where
    I: IntoIterator<Item = Recipe>,
{
    recipes.into_iter().map(|r| (r.id.clone(), r)).collect()
}

/// Index category names by their normalised id.
pub fn categories_by_id(categories: &[Category]) -> HashMap<EntityId, String> {
    categories
        .iter()
        .map(|c| (c.id.clone(), c.name.clone()))
        .collect()
}

/// De-duplicate recipe references, keeping first-seen order.
pub fn unique_recipe_ids<'a, I>(ids: I) -> Vec<EntityId>
where
    I: IntoIterator<Item = &'a EntityId>,
{
    let mut seen = HashSet::new();
    ids.into_iter()
        .filter(|id| !id.is_blank() && seen.insert((*id).clone()))
        .cloned()
        .collect()
}

/// A favorite joined with the recipe it points at.
#[derive(Clone, Debug, PartialEq)]
pub struct FavoriteView {
    pub favorite: Favorite,
    pub recipe: Recipe,
}

/// Attach each favorite's recipe, dropping favorites whose recipe is unknown.
pub fn enrich_favorites(
    favorites: &[Favorite],
    recipes_by_id: &HashMap<EntityId, Recipe>,
) -> Vec<FavoriteView> {
    favorites
        .iter()
        .filter_map(|favorite| {
            recipes_by_id
                .get(&favorite.recipe_id)
                .map(|recipe| FavoriteView {
                    favorite: favorite.clone(),
                    recipe: recipe.clone(),
                })
        })
        .collect()
}

/// A meal-plan entry with its recipe, if the recipe still resolves.
#[derive(Clone, Debug, PartialEq)]
pub struct MealPlanItem {
    pub entry: MealPlanEntry,
    pub recipe: Option<Recipe>,
}

impl MealPlanItem {
    pub fn title(&self) -> &str {
        self.recipe
            .as_ref()
            .map(|r| r.title.as_str())
            .unwrap_or(MISSING_RECIPE)
    }
}

/// All entries sharing one literal `(day, meal_type)` pair.
#[derive(Clone, Debug, PartialEq)]
pub struct MealPlanGroup {
    pub day: String,
    pub meal_type: String,
    pub items: Vec<MealPlanItem>,
}

impl MealPlanGroup {
    /// Heading such as `"Monday • Lunch"`.
    pub fn label(&self) -> String {
        format!("{} • {}", self.day, self.meal_type)
    }
}

/// Partition entries by `(day, meal_type)`.
///
/// Groups appear in the order their first entry was supplied and each group
/// keeps the supplied order of its entries. Duplicates are not collapsed.
pub fn group_meal_plan(
    entries: &[MealPlanEntry],
    recipes_by_id: &HashMap<EntityId, Recipe>,
) -> Vec<MealPlanGroup> {
    let mut groups: Vec<MealPlanGroup> = Vec::new();
    let mut index: HashMap<(String, String), usize> = HashMap::new();

    for entry in entries {
        let key = (entry.day.clone(), entry.meal_type.clone());
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(MealPlanGroup {
                day: entry.day.clone(),
                meal_type: entry.meal_type.clone(),
                items: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].items.push(MealPlanItem {
            entry: entry.clone(),
            recipe: recipes_by_id.get(&entry.recipe_id).cloned(),
        });
    }

    groups
}

/// Category predicate for the recipe listing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(EntityId),
}

impl CategoryFilter {
    /// Read a select value. `"all"` (and a blank value) disable the filter.
    pub fn parse(raw: &str) -> Self {
        if raw.trim() == ALL_CATEGORIES {
            return CategoryFilter::All;
        }
        match EntityId::parse(raw) {
            Some(id) => CategoryFilter::Only(id),
            None => CategoryFilter::All,
        }
    }

    fn matches(&self, recipe: &Recipe) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(id) => recipe.category_id.as_ref() == Some(id),
        }
    }
}

/// Recipes whose title contains `search` (case-insensitive) AND whose category
/// passes `category`. Blank search text matches every title.
pub fn filter_recipes<'a>(
    recipes: &'a [Recipe],
    search: &str,
    category: &CategoryFilter,
) -> Vec<&'a Recipe> {
    let needle = search.trim().to_lowercase();
    recipes
        .iter()
        .filter(|r| needle.is_empty() || r.title.to_lowercase().contains(&needle))
        .filter(|r| category.matches(r))
        .collect()
}

/// The recipe's category name, or [`MISSING_CATEGORY`] for a dangling reference.
pub fn resolve_category_name<'a>(
    recipe: &Recipe,
    categories_by_id: &'a HashMap<EntityId, String>,
) -> &'a str {
    recipe
        .category_id
        .as_ref()
        .and_then(|id| categories_by_id.get(id))
        .map(String::as_str)
        .unwrap_or(MISSING_CATEGORY)
}

/// Admin listing label: the category name, else the raw reference, else
/// [`MISSING_CATEGORY`].
pub fn admin_category_label(recipe: &Recipe, categories_by_id: &HashMap<EntityId, String>) -> String {
    match &recipe.category_id {
        Some(id) => categories_by_id
            .get(id)
            .cloned()
            .unwrap_or_else(|| id.to_string()),
        None => MISSING_CATEGORY.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(id: i64, title: &str, category: Option<EntityId>) -> Recipe {
        Recipe {
            id: EntityId::Num(id),
            title: title.to_string(),
            category_id: category,
            image_url: String::new(),
            ingredients: vec![],
            steps: vec![],
            calories: 0.0,
            prep_minutes: 0.0,
        }
    }

    fn favorite(id: i64, recipe_id: i64) -> Favorite {
        Favorite {
            id: EntityId::Num(id),
            user_id: EntityId::Num(1),
            recipe_id: EntityId::Num(recipe_id),
            created_at: None,
        }
    }

    fn entry(id: i64, day: &str, meal: &str, recipe_id: i64) -> MealPlanEntry {
        MealPlanEntry {
            id: EntityId::Num(id),
            user_id: EntityId::Num(1),
            recipe_id: EntityId::Num(recipe_id),
            day: day.to_string(),
            meal_type: meal.to_string(),
            created_at: None,
        }
    }

    fn titles(found: &[&Recipe]) -> Vec<String> {
        found.iter().map(|r| r.title.clone()).collect()
    }

    #[test]
    fn test_enrich_drops_unresolved_favorites() {
        let favorites = vec![favorite(1, 5), favorite(2, 9)];
        let index = recipes_by_id(vec![recipe(5, "Soup", None)]);

        let views = enrich_favorites(&favorites, &index);
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].favorite.id, EntityId::Num(1));
        assert_eq!(views[0].favorite.recipe_id, EntityId::Num(5));
        assert_eq!(views[0].recipe.title, "Soup");
    }

    #[test]
    fn test_enrich_resolves_string_reference() {
        let mut fav = favorite(1, 0);
        fav.recipe_id = EntityId::Text("5".into());
        let index = recipes_by_id(vec![recipe(5, "Soup", None)]);
        assert_eq!(enrich_favorites(&[fav], &index).len(), 1);
    }

    #[test]
    fn test_group_meal_plan_preserves_order() {
        let entries = vec![
            entry(1, "Monday", "Lunch", 5),
            entry(2, "Monday", "Lunch", 6),
            entry(3, "Tuesday", "Dinner", 5),
        ];
        let groups = group_meal_plan(&entries, &HashMap::new());

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].label(), "Monday • Lunch");
        let ids: Vec<_> = groups[0].items.iter().map(|i| i.entry.id.clone()).collect();
        assert_eq!(ids, vec![EntityId::Num(1), EntityId::Num(2)]);
        assert_eq!(groups[1].label(), "Tuesday • Dinner");
        assert_eq!(groups[1].items.len(), 1);
    }

    #[test]
    fn test_group_meal_plan_keeps_missing_recipes() {
        let entries = vec![entry(1, "Friday", "Breakfast", 5), entry(2, "Friday", "Breakfast", 77)];
        let index = recipes_by_id(vec![recipe(5, "Oats", None)]);
        let groups = group_meal_plan(&entries, &index);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].items[0].title(), "Oats");
        assert_eq!(groups[0].items[1].title(), MISSING_RECIPE);
        assert!(groups[0].items[1].recipe.is_none());
    }

    #[test]
    fn test_group_meal_plan_does_not_dedupe() {
        let entries = vec![entry(1, "Sunday", "Dinner", 5), entry(2, "Sunday", "Dinner", 5)];
        let groups = group_meal_plan(&entries, &HashMap::new());
        assert_eq!(groups[0].items.len(), 2);
    }

    #[test]
    fn test_filter_by_text_only() {
        let recipes = vec![
            recipe(1, "Tomato Soup", Some(EntityId::Num(1))),
            recipe(2, "Pancakes", Some(EntityId::Num(2))),
            recipe(3, "SOUP of the day", None),
        ];
        let found = filter_recipes(&recipes, "soup", &CategoryFilter::All);
        assert_eq!(titles(&found), vec!["Tomato Soup", "SOUP of the day"]);

        let everything = filter_recipes(&recipes, "  ", &CategoryFilter::parse("all"));
        assert_eq!(everything.len(), 3);
    }

    #[test]
    fn test_filter_by_category_uses_normalised_ids() {
        let recipes = vec![
            recipe(1, "Tomato Soup", Some(EntityId::Text("1".into()))),
            recipe(2, "Pancakes", Some(EntityId::Num(2))),
            recipe(3, "Bean Soup", Some(EntityId::Num(1))),
        ];
        let found = filter_recipes(&recipes, "", &CategoryFilter::parse("1"));
        assert_eq!(titles(&found), vec!["Tomato Soup", "Bean Soup"]);
    }

    #[test]
    fn test_filter_requires_both_predicates() {
        let recipes = vec![
            recipe(1, "Tomato Soup", Some(EntityId::Num(1))),
            recipe(2, "Pea Soup", Some(EntityId::Num(2))),
            recipe(3, "Pancakes", Some(EntityId::Num(1))),
        ];
        let found = filter_recipes(&recipes, "soup", &CategoryFilter::Only(EntityId::Num(1)));
        assert_eq!(titles(&found), vec!["Tomato Soup"]);
    }

    #[test]
    fn test_resolve_category_name_falls_back() {
        let categories = categories_by_id(&[Category {
            id: EntityId::Num(1),
            name: "Soups".into(),
        }]);
        assert_eq!(
            resolve_category_name(&recipe(1, "A", Some(EntityId::Text("1".into()))), &categories),
            "Soups"
        );
        assert_eq!(
            resolve_category_name(&recipe(2, "B", Some(EntityId::Num(42))), &categories),
            MISSING_CATEGORY
        );
        assert_eq!(resolve_category_name(&recipe(3, "C", None), &categories), MISSING_CATEGORY);
        assert_eq!(admin_category_label(&recipe(2, "B", Some(EntityId::Num(42))), &categories), "42");
    }

    #[test]
    fn test_unique_recipe_ids() {
        let ids = vec![
            EntityId::Num(5),
            EntityId::Text("5".into()),
            EntityId::Num(9),
            EntityId::Text("".into()),
        ];
        assert_eq!(unique_recipe_ids(&ids), vec![EntityId::Num(5), EntityId::Num(9)]);
    }
}
