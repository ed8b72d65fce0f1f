use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The managed resource. JSON field names keep the capitalized wire form
/// clients already send; `default` makes absent fields deserialize to the
/// empty-string "no change" sentinel used by partial updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Course {
    #[serde(rename = "Code", default)]
    pub code: i64,
    #[serde(rename = "Title", default)]
    pub title: String,
    #[serde(rename = "Dates", default)]
    pub dates: String,
    #[serde(rename = "Lecturer", default)]
    pub lecturer: String,
    #[serde(rename = "Description", default)]
    pub description: String,
}

impl Course {
    /// A course is complete when every descriptive field is filled in.
    /// Creation requires completeness; updates treat empty as "keep prior".
    pub fn is_complete(&self) -> bool {
        !self.title.is_empty()
            && !self.dates.is_empty()
            && !self.lecturer.is_empty()
            && !self.description.is_empty()
    }

    /// Fill every empty field from `prior`, leaving non-empty fields alone.
    pub fn merge_from(&mut self, prior: &Course) {
        if self.title.is_empty() {
            self.title = prior.title.clone();
        }
        if self.dates.is_empty() {
            self.dates = prior.dates.clone();
        }
        if self.lecturer.is_empty() {
            self.lecturer = prior.lecturer.clone();
        }
        if self.description.is_empty() {
            self.description = prior.description.clone();
        }
    }
}
