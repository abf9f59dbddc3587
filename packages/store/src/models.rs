//! # Domain models for recipes, categories, favorites, meal plans and users
//!
//! These are the transient client-side copies of records owned by the JSON
//! backend. Every type is `Serialize + Deserialize` with camelCase wire names
//! (`categoryId`, `imageUrl`, `prepMinutes`, `userId`, `recipeId`, `mealType`,
//! `createdAt`) so it can be sent to and read from the REST collections as-is.
//!
//! ## Identifiers
//!
//! The backend hands out ids as JSON numbers for some records and JSON strings
//! for others (`5` and `"5"` both occur for the same recipe). [`EntityId`]
//! accepts either form and compares, hashes and displays the *normalised*
//! textual value, so `EntityId::Num(5) == EntityId::Text("5")`.
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`Recipe`] / [`RecipePayload`] | A recipe as read / the validated body for admin create and update. |
//! | [`Category`] / [`NewCategory`] | A recipe category. `Recipe::category_id` is a soft reference to it. |
//! | [`Favorite`] / [`NewFavorite`] | A (user, recipe) bookmark. |
//! | [`MealPlanEntry`] / [`MealPlanDraft`] / [`NewMealPlanEntry`] | A recipe scheduled for a weekday and meal. |
//! | [`User`] / [`NewUser`] | The full user record, including the clear-text password the store keeps. |
//! | [`SessionUser`] | The password-stripped projection held by the session and persisted locally. |

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// Opaque, server-assigned identifier. Either a JSON number or a JSON string.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Num(i64),
    Text(String),
}

impl EntityId {
    /// Parse user-supplied text (a route segment, a select value).
    ///
    /// Integer text becomes [`EntityId::Num`], anything else non-blank becomes
    /// [`EntityId::Text`]. Blank text has no id.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(match trimmed.parse::<i64>() {
            Ok(n) => EntityId::Num(n),
            Err(_) => EntityId::Text(trimmed.to_string()),
        })
    }

    /// The normalised textual form used for equality, hashing and display.
    pub fn normalized(&self) -> String {
        match self {
            EntityId::Num(n) => n.to_string(),
            EntityId::Text(s) => {
                let trimmed = s.trim();
                match trimmed.parse::<i64>() {
                    Ok(n) => n.to_string(),
                    Err(_) => trimmed.to_string(),
                }
            }
        }
    }

    /// True for an empty string id, which the store treats as "no id".
    pub fn is_blank(&self) -> bool {
        matches!(self, EntityId::Text(s) if s.trim().is_empty())
    }
}

impl PartialEq for EntityId {
    fn eq(&self, other: &Self) -> bool {
        self.normalized() == other.normalized()
    }
}

impl Eq for EntityId {}

impl Hash for EntityId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.normalized().hash(state);
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.normalized())
    }
}

impl From<i64> for EntityId {
    fn from(n: i64) -> Self {
        EntityId::Num(n)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        EntityId::Text(s.to_string())
    }
}

/// Account role. Unknown or missing roles read as [`Role::User`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    #[serde(other)]
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

/// Error returned when a weekday or meal name is not one of the fixed values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownVariant(pub String);

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown value: {}", self.0)
    }
}

impl std::error::Error for UnknownVariant {}

/// Weekday a meal is planned for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }
}

impl FromStr for Day {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Day::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Meal slot within a day.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealType {
    pub const ALL: [MealType; 3] = [MealType::Breakfast, MealType::Lunch, MealType::Dinner];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "Breakfast",
            MealType::Lunch => "Lunch",
            MealType::Dinner => "Dinner",
        }
    }
}

impl FromStr for MealType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MealType::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recipe as stored by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: EntityId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Soft reference to a [`Category`]; may dangle or be absent.
    #[serde(default)]
    pub category_id: Option<EntityId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ingredients: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub steps: Vec<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub calories: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub prep_minutes: f64,
}

/// Validated body for creating or replacing a recipe.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipePayload {
    pub title: String,
    pub category_id: EntityId,
    pub image_url: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub calories: f64,
    pub prep_minutes: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: EntityId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub id: EntityId,
    pub user_id: EntityId,
    pub recipe_id: EntityId,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFavorite {
    pub user_id: EntityId,
    pub recipe_id: EntityId,
    pub created_at: DateTime<Utc>,
}

/// A planned meal. `day` and `meal_type` are free-form on read: the store does
/// not constrain them, only the client does when writing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanEntry {
    pub id: EntityId,
    pub user_id: EntityId,
    pub recipe_id: EntityId,
    pub day: String,
    pub meal_type: String,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

/// An unvalidated meal-plan request, as assembled by a screen.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MealPlanDraft {
    pub user_id: Option<EntityId>,
    pub recipe_id: Option<EntityId>,
    pub day: Option<Day>,
    pub meal_type: Option<MealType>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Wire body for `POST /mealPlans`. Only built from a complete [`MealPlanDraft`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMealPlanEntry {
    pub user_id: EntityId,
    pub recipe_id: EntityId,
    pub day: Day,
    pub meal_type: MealType,
    pub created_at: DateTime<Utc>,
}

/// Full user record. The store keeps `password` in clear text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: EntityId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub password: String,
    #[serde(default)]
    pub role: Option<Role>,
}

impl User {
    /// Project to the session-safe form, dropping the password.
    pub fn to_session_user(&self) -> SessionUser {
        SessionUser {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role.unwrap_or_default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// The signed-in identity: `{id, name, email, role}`, never a password.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
}

impl SessionUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Profile badge text.
    pub fn badge(&self) -> &'static str {
        if self.is_admin() {
            "ADMIN"
        } else {
            "USER"
        }
    }

    /// Get display name, falling back to email if name is not set.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.email
        } else {
            &self.name
        }
    }
}

// Fields the client only displays are read leniently so one odd value does
// not cost the whole record.

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Num(f64),
    Text(String),
    Other(IgnoredAny),
}

/// Numbers or numeric strings; anything else reads as `0`.
fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = match RawNumber::deserialize(deserializer)? {
        RawNumber::Num(n) => n,
        RawNumber::Text(s) => s.trim().parse().unwrap_or_default(),
        RawNumber::Other(_) => 0.0,
    };
    Ok(if value.is_finite() { value } else { 0.0 })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Millis(i64),
    Text(String),
    Other(IgnoredAny),
}

/// RFC 3339, a bare `YYYY-MM-DD` date, or epoch milliseconds. Anything else is `None`.
fn lenient_timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    let parsed = match Option::<RawTimestamp>::deserialize(deserializer)? {
        Some(RawTimestamp::Millis(ms)) => DateTime::from_timestamp_millis(ms),
        Some(RawTimestamp::Text(text)) => parse_timestamp(text.trim()),
        Some(RawTimestamp::Other(_)) | None => None,
    };
    Ok(parsed)
}

fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(text) {
        return Some(at.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|at| at.and_utc())
}
