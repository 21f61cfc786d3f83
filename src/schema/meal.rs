//! Meal schemas
//!
//! Day, month and year are plain integers: `31/2/2024` is stored as given.
//! `count` may be negative.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::errors::{ValidationError, ValidationResult};
use super::fields::FieldSet;
use crate::storage::{Document, Filter, ObjectId};

/// Body of `POST /meals`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealCreate {
    pub day: i64,
    pub month: i64,
    pub year: i64,
    #[serde(rename = "type")]
    pub meal_type: String,
    pub menu: String,
    pub count: i64,
}

impl MealCreate {
    pub fn into_document(self) -> Document {
        let mut doc = Document::new();
        doc.insert("day".into(), Value::from(self.day));
        doc.insert("month".into(), Value::from(self.month));
        doc.insert("year".into(), Value::from(self.year));
        doc.insert("type".into(), Value::String(self.meal_type));
        doc.insert("menu".into(), Value::String(self.menu));
        doc.insert("count".into(), Value::from(self.count));
        doc
    }
}

/// A stored meal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meal {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub day: i64,
    pub month: i64,
    pub year: i64,
    #[serde(rename = "type")]
    pub meal_type: String,
    pub menu: String,
    pub count: i64,
}

/// Body of `PATCH /meals/{id}`.
///
/// Only `type`, `menu` and `count` are updatable. Each field is either
/// absent (left untouched) or present with a value; present-but-null is
/// rejected because stored meals have no nullable fields. Unknown keys are
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MealUpdate {
    meal_type: Option<String>,
    menu: Option<String>,
    count: Option<i64>,
    supplied: FieldSet,
}

impl MealUpdate {
    pub const TYPE: &'static str = "type";
    pub const MENU: &'static str = "menu";
    pub const COUNT: &'static str = "count";

    /// Update with no fields supplied.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, meal_type: impl Into<String>) -> Self {
        self.meal_type = Some(meal_type.into());
        self.supplied.insert(Self::TYPE);
        self
    }

    pub fn with_menu(mut self, menu: impl Into<String>) -> Self {
        self.menu = Some(menu.into());
        self.supplied.insert(Self::MENU);
        self
    }

    pub fn with_count(mut self, count: i64) -> Self {
        self.count = Some(count);
        self.supplied.insert(Self::COUNT);
        self
    }

    /// Parses a JSON payload, recording which fields were present.
    pub fn from_json(value: Value) -> ValidationResult<Self> {
        let Value::Object(mut object) = value else {
            return Err(ValidationError::NotAnObject);
        };

        let mut update = Self::new();
        if let Some(v) = take_field::<String>(&mut object, Self::TYPE)? {
            update = update.with_type(v);
        }
        if let Some(v) = take_field::<String>(&mut object, Self::MENU)? {
            update = update.with_menu(v);
        }
        if let Some(v) = take_field::<i64>(&mut object, Self::COUNT)? {
            update = update.with_count(v);
        }
        Ok(update)
    }

    pub fn meal_type(&self) -> Option<&str> {
        self.meal_type.as_deref()
    }

    pub fn menu(&self) -> Option<&str> {
        self.menu.as_deref()
    }

    pub fn count(&self) -> Option<i64> {
        self.count
    }

    /// Fields the client explicitly supplied.
    pub fn supplied(&self) -> &FieldSet {
        &self.supplied
    }

    pub fn is_empty(&self) -> bool {
        self.supplied.is_empty()
    }

    /// The `$set` document: supplied fields only.
    pub fn to_document(&self) -> Document {
        let mut doc = Document::new();
        if let Some(meal_type) = &self.meal_type {
            doc.insert(Self::TYPE.into(), Value::String(meal_type.clone()));
        }
        if let Some(menu) = &self.menu {
            doc.insert(Self::MENU.into(), Value::String(menu.clone()));
        }
        if let Some(count) = self.count {
            doc.insert(Self::COUNT.into(), Value::from(count));
        }
        doc
    }
}

fn take_field<T: DeserializeOwned>(
    object: &mut serde_json::Map<String, Value>,
    field: &'static str,
) -> ValidationResult<Option<T>> {
    match object.remove(field) {
        None => Ok(None),
        Some(Value::Null) => Err(ValidationError::NullField(field.to_string())),
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|e| ValidationError::invalid_field(field, e)),
    }
}

impl<'de> Deserialize<'de> for MealUpdate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_json(value).map_err(serde::de::Error::custom)
    }
}

/// Criteria of `GET /meals/by_month/{year}/{month}`: exact match on both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthFilter {
    pub year: i64,
    pub month: i64,
}

impl MonthFilter {
    pub const YEARS: std::ops::RangeInclusive<i64> = 2020..=2050;
    pub const MONTHS: std::ops::RangeInclusive<i64> = 1..=12;

    pub fn new(year: i64, month: i64) -> Self {
        Self { year, month }
    }

    /// Whether the pair lies inside the range the HTTP route accepts.
    pub fn in_supported_range(&self) -> bool {
        Self::YEARS.contains(&self.year) && Self::MONTHS.contains(&self.month)
    }

    pub fn to_filter(&self) -> Filter {
        Filter::all().eq("year", self.year).eq("month", self.month)
    }
}
