//! Add-item form state
//!
//! Holds the field values, re-validates on every change and only lets a
//! submit through once photo, name and value are all valid.

use crate::error::{CoreError, Result};
use crate::repository::{InsertOutcome, ValuablesRepository};
use crate::store::KeyValueStore;
use crate::validation::{
    parse_value, validate_name, validate_photo, validate_value_with, FieldValidation,
    PhotoSelection, ValueLimits,
};
use valuables_types::NewItem;

/// Per-field validation state, `None` until the field is first touched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub photo: Option<FieldValidation>,
    pub name: Option<FieldValidation>,
    pub value: Option<FieldValidation>,
}

impl FormErrors {
    fn is_valid(field: &Option<FieldValidation>) -> bool {
        field.as_ref().is_some_and(|v| v.is_valid)
    }

    /// Names of the fields blocking submit
    pub fn invalid_fields(&self) -> Vec<String> {
        [
            ("photo", &self.photo),
            ("name", &self.name),
            ("value", &self.value),
        ]
        .into_iter()
        .filter(|(_, field)| !Self::is_valid(field))
        .map(|(label, _)| label.to_string())
        .collect()
    }
}

#[derive(Debug, Clone)]
pub struct ItemForm {
    /// Value of everything already stored
    total: f64,
    limits: ValueLimits,
    name: String,
    value: String,
    description: String,
    photo: Option<String>,
    errors: FormErrors,
}

impl ItemForm {
    pub fn new(total: f64) -> Self {
        Self::with_limits(total, ValueLimits::default())
    }

    pub fn with_limits(total: f64, limits: ValueLimits) -> Self {
        Self {
            total,
            limits,
            name: String::new(),
            value: String::new(),
            description: String::new(),
            photo: None,
            errors: FormErrors::default(),
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.errors.name = Some(validate_name(&self.name));
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.errors.value = Some(validate_value_with(&self.value, self.total, &self.limits));
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Apply an image picker result
    ///
    /// A missing or cancelled pick leaves the form untouched.
    pub fn pick_photo(&mut self, selection: Option<PhotoSelection>) {
        let Some(selection) = selection.filter(|s| !s.cancelled) else {
            return;
        };
        self.errors.photo = Some(validate_photo(Some(&selection)));
        self.photo = Some(selection.uri).filter(|uri| !uri.is_empty());
    }

    pub fn remove_photo(&mut self) {
        self.photo = None;
        self.errors.photo = Some(validate_photo(None));
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn photo(&self) -> Option<&str> {
        self.photo.as_deref()
    }

    pub fn can_submit(&self) -> bool {
        self.errors.invalid_fields().is_empty()
    }

    /// Build the record to store
    pub fn to_new_item(&self) -> Result<NewItem> {
        let fields = self.errors.invalid_fields();
        if !fields.is_empty() {
            return Err(CoreError::InvalidForm { fields });
        }

        let purchase_price = parse_value(&self.value).ok_or_else(|| CoreError::InvalidForm {
            fields: vec!["value".to_string()],
        })?;

        Ok(NewItem {
            name: self.name.clone(),
            purchase_price,
            kind: String::new(),
            description: self.description.clone(),
            photo: self.photo.clone().unwrap_or_default(),
        })
    }

    pub async fn submit<S: KeyValueStore>(
        &self,
        repo: &ValuablesRepository<S>,
    ) -> Result<InsertOutcome> {
        let item = self.to_new_item()?;
        repo.insert(item).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn filled(total: f64) -> ItemForm {
        let mut form = ItemForm::new(total);
        form.pick_photo(Some(PhotoSelection::picked("file:///bracelet.jpg")));
        form.set_name("Bracelet");
        form.set_value("700");
        form.set_description("Gold, 18k");
        form
    }

    #[test]
    fn test_untouched_form_cannot_submit() {
        let form = ItemForm::new(0.0);
        assert!(!form.can_submit());
        assert_eq!(form.errors(), &FormErrors::default());
        assert_eq!(
            form.errors().invalid_fields(),
            vec!["photo", "name", "value"]
        );
    }

    #[test]
    fn test_filled_form_builds_item() {
        let form = filled(0.0);
        assert!(form.can_submit());

        let item = form.to_new_item().unwrap();
        assert_eq!(item.name, "Bracelet");
        assert_eq!(item.purchase_price, 700.0);
        assert_eq!(item.kind, "");
        assert_eq!(item.description, "Gold, 18k");
        assert_eq!(item.photo, "file:///bracelet.jpg");
    }

    #[test]
    fn test_cancelled_pick_is_ignored() {
        let mut form = ItemForm::new(0.0);
        form.pick_photo(Some(PhotoSelection::cancelled()));
        form.pick_photo(None);

        assert_eq!(form.errors().photo, None);
        assert_eq!(form.photo(), None);
    }

    #[test]
    fn test_removing_photo_blocks_submit() {
        let mut form = filled(0.0);
        form.remove_photo();

        assert!(!form.can_submit());
        assert_eq!(
            form.errors().photo.as_ref().unwrap().error_message,
            "Photo is required"
        );
    }

    #[test]
    fn test_value_over_running_total_blocks_submit() {
        let mut form = filled(39_900.0);
        form.set_value("200");

        assert!(!form.can_submit());
        let err = form.to_new_item().unwrap_err();
        assert!(matches!(err, CoreError::InvalidForm { ref fields } if fields == &["value"]));
    }

    #[test]
    fn test_clearing_name_revalidates() {
        let mut form = filled(0.0);
        form.set_name("");

        assert_eq!(
            form.errors().name,
            Some(FieldValidation::invalid("Name is required"))
        );
        assert!(!form.can_submit());
    }

    #[tokio::test]
    async fn test_submit_inserts_into_repository() {
        let repo = ValuablesRepository::with_defaults(MemoryStore::new());

        let outcome = filled(0.0).submit(&repo).await.unwrap();
        assert_eq!(outcome.item().unwrap().id, Some(1));

        let again = filled(0.0).submit(&repo).await.unwrap();
        assert!(again.is_duplicate());
    }
}
