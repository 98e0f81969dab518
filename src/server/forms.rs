//! Request bodies. Every value arrives under a fixed field name.

use serde::Deserialize;

use super::error::AppError;

/// `POST /meal`
#[derive(Debug, Deserialize)]
pub struct MealForm {
    pub day: String,
    #[serde(default)]
    pub meal: String,
}

/// `POST /shopping-list`
#[derive(Debug, Deserialize)]
pub struct NewItemForm {
    #[serde(default)]
    pub item: String,
}

/// `DELETE /shopping-list?item=<id>`
#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    pub item: String,
}

/// `POST /shopping-list/tick`
///
/// Browsers omit unchecked checkboxes, so a missing `ticked` means off.
#[derive(Debug, Deserialize)]
pub struct TickForm {
    pub id: String,
    #[serde(default)]
    pub ticked: Option<String>,
}

impl TickForm {
    pub fn is_ticked(&self) -> Result<bool, AppError> {
        match self.ticked.as_deref().map(str::trim) {
            None | Some("") | Some("off") | Some("false") => Ok(false),
            Some("on") | Some("true") => Ok(true),
            Some(other) => Err(AppError::BadRequest(format!(
                "Invalid ticked value: {:?}",
                other
            ))),
        }
    }
}

/// `POST /shopping-list/edit`
#[derive(Debug, Deserialize)]
pub struct EditForm {
    pub id: String,
    pub item: String,
}
