//! Admin form contract: raw form text in, validated request body out.
//!
//! Validation runs before any request is built, so a rejected form never
//! reaches the network. Rules are checked in form order and the first
//! failure names its field.

use store::{EntityId, NewCategory, Recipe, RecipePayload};

use crate::error::{Error, Result};

/// Split a textarea into trimmed, non-blank lines.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// The recipe editor's raw field values.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecipeForm {
    pub title: String,
    pub category_id: String,
    pub image_url: String,
    /// One ingredient per line.
    pub ingredients: String,
    /// One step per line.
    pub steps: String,
    pub calories: String,
    pub prep_minutes: String,
}

impl RecipeForm {
    /// Prefill the editor from an existing recipe.
    pub fn from_recipe(recipe: &Recipe) -> Self {
        Self {
            title: recipe.title.clone(),
            category_id: recipe
                .category_id
                .as_ref()
                .map(EntityId::to_string)
                .unwrap_or_default(),
            image_url: recipe.image_url.clone(),
            ingredients: recipe.ingredients.join("\n"),
            steps: recipe.steps.join("\n"),
            calories: format_number(recipe.calories),
            prep_minutes: format_number(recipe.prep_minutes),
        }
    }

    pub fn build(&self) -> Result<RecipePayload> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(Error::validation("title", "Title is required."));
        }

        let category_id = match self.category_id.trim().parse::<i64>() {
            Ok(id) if id != 0 => EntityId::Num(id),
            _ => return Err(Error::validation("categoryId", "Please choose a category.")),
        };

        let image_url = self.image_url.trim();
        if image_url.is_empty() {
            return Err(Error::validation("imageUrl", "Image URL is required."));
        }

        let ingredients = split_lines(&self.ingredients);
        if ingredients.is_empty() {
            return Err(Error::validation("ingredients", "Add at least one ingredient."));
        }

        let steps = split_lines(&self.steps);
        if steps.is_empty() {
            return Err(Error::validation("steps", "Add at least one step."));
        }

        let calories = parse_amount(&self.calories, "calories", "Calories must be a number.")?;
        let prep_minutes =
            parse_amount(&self.prep_minutes, "prepMinutes", "Prep minutes must be a number.")?;

        Ok(RecipePayload {
            title: title.to_string(),
            category_id,
            image_url: image_url.to_string(),
            ingredients,
            steps,
            calories,
            prep_minutes,
        })
    }
}

fn parse_amount(raw: &str, field: &'static str, message: &str) -> Result<f64> {
    match raw.trim().parse::<f64>() {
        Ok(n) if n.is_finite() && n >= 0.0 => Ok(n),
        _ => Err(Error::validation(field, message)),
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// The "add category" field.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CategoryForm {
    pub name: String,
}

impl CategoryForm {
    pub fn build(&self) -> Result<NewCategory> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(Error::validation("name", "Category name is required."));
        }
        Ok(NewCategory {
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> RecipeForm {
        RecipeForm {
            title: "  Pancakes ".into(),
            category_id: "2".into(),
            image_url: "http://img/p.jpg".into(),
            ingredients: "  \nEgg\n\nMilk  ".into(),
            steps: "Mix\nFry".into(),
            calories: "350".into(),
            prep_minutes: "15.5".into(),
        }
    }

    #[test]
    fn test_split_lines_strips_blanks() {
        assert_eq!(split_lines("  \nEgg\n\nMilk  "), vec!["Egg", "Milk"]);
        assert!(split_lines(" \n\t\n").is_empty());
    }

    #[test]
    fn test_build_valid_form() {
        let payload = valid().build().unwrap();
        assert_eq!(payload.title, "Pancakes");
        assert_eq!(payload.category_id, EntityId::Num(2));
        assert_eq!(payload.ingredients, vec!["Egg", "Milk"]);
        assert_eq!(payload.prep_minutes, 15.5);
    }

    fn set(form: &mut RecipeForm, field: &str, value: &str) {
        let slot = match field {
            "title" => &mut form.title,
            "categoryId" => &mut form.category_id,
            "imageUrl" => &mut form.image_url,
            "ingredients" => &mut form.ingredients,
            "steps" => &mut form.steps,
            "calories" => &mut form.calories,
            _ => &mut form.prep_minutes,
        };
        *slot = value.to_string();
    }

    #[test]
    fn test_each_rule_names_its_field() {
        let cases = [
            ("title", "   "),
            ("categoryId", ""),
            ("categoryId", "0"),
            ("categoryId", "soups"),
            ("imageUrl", " "),
            ("ingredients", "\n \n"),
            ("steps", ""),
            ("calories", "lots"),
            ("calories", "NaN"),
            ("prepMinutes", "inf"),
            ("prepMinutes", "-5"),
        ];
        for (field, value) in cases {
            let mut form = valid();
            set(&mut form, field, value);
            let err = form.build().unwrap_err();
            assert_eq!(err.field(), Some(field), "value: {value:?}");
        }
    }

    #[test]
    fn test_first_failure_wins() {
        let form = RecipeForm::default();
        assert_eq!(form.build().unwrap_err().field(), Some("title"));
    }

    #[test]
    fn test_prefill_from_recipe() {
        let recipe = Recipe {
            id: EntityId::Num(1),
            title: "Soup".into(),
            category_id: Some(EntityId::Text("3".into())),
            image_url: "http://img/s.jpg".into(),
            ingredients: vec!["Water".into(), "Salt".into()],
            steps: vec!["Boil".into()],
            calories: 120.0,
            prep_minutes: 7.5,
        };
        let form = RecipeForm::from_recipe(&recipe);
        assert_eq!(form.category_id, "3");
        assert_eq!(form.ingredients, "Water\nSalt");
        assert_eq!(form.calories, "120");
        assert_eq!(form.prep_minutes, "7.5");
        assert_eq!(form.build().unwrap().ingredients, recipe.ingredients);
    }

    #[test]
    fn test_category_form() {
        assert_eq!(
            CategoryForm { name: "  ".into() }.build().unwrap_err().field(),
            Some("name")
        );
        let form = CategoryForm { name: " Soups ".into() };
        assert_eq!(form.build().unwrap().name, "Soups");
    }
}
