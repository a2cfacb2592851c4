//! Section form state machine shared by every list-based wizard step.
//!
//! A form owns a local copy of its section's items, seeded from the store. Item edits only
//! touch that copy; the store sees the whole list on `save_and_continue`.

use indexmap::IndexMap;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::CategoryInfo;
use crate::errors::AppError;
use crate::forms::FormSet;
use crate::models::resume::ResumeData;
use crate::store::{Notifier, ResumeStore};
use crate::wizard::Section;

// ────────────────────────────────────────────────────────────────────────────
// Item contract
// ────────────────────────────────────────────────────────────────────────────

/// A list entry editable through a `SectionForm`.
///
/// The working buffer is a `Self` whose `id` is ignored until save.
pub trait FormItem:
    Clone + Default + Serialize + DeserializeOwned + Send + Sync + 'static
{
    const SECTION: Section;

    fn id(&self) -> Uuid;

    fn set_id(&mut self, id: Uuid);

    /// Grouping key. Sections without a classification group under "".
    fn category(&self) -> &str {
        ""
    }

    /// Display info for a grouping key; `None` for sections without categories.
    fn category_info(_category: &str) -> Option<&'static CategoryInfo> {
        None
    }

    /// Required-field and business-rule checks. `editing` is the id being edited, if any.
    fn validate(&self, existing: &[Self], editing: Option<Uuid>) -> Result<(), String>;

    /// Cleans up the buffer right before it is stored.
    fn normalize(&mut self) {}

    /// Writes a suggested value into one buffer field.
    fn apply_suggestion(&mut self, field: &str, _value: &str) -> Result<(), String> {
        Err(format!("No suggestions for field '{field}'"))
    }

    fn seed(data: &ResumeData) -> Vec<Self>;

    fn commit(store: &mut ResumeStore, items: Vec<Self>);

    fn form(forms: &FormSet) -> &SectionForm<Self>;

    fn form_mut(forms: &mut FormSet) -> &mut SectionForm<Self>;
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "state", content = "item_id", rename_all = "snake_case")]
pub enum FormMode {
    Idle,
    Editing(Uuid),
}

// ────────────────────────────────────────────────────────────────────────────
// Form state machine
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct SectionForm<T> {
    items: Vec<T>,
    mode: FormMode,
    buffer: T,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContinueOutcome {
    pub section: Section,
    pub completed_step: u32,
    pub current_step: u32,
    pub scroll_to_top: bool,
}

impl<T: FormItem> SectionForm<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            mode: FormMode::Idle,
            buffer: T::default(),
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn buffer(&self) -> &T {
        &self.buffer
    }

    pub fn set_buffer(&mut self, draft: T) {
        self.buffer = draft;
    }

    /// Loads the item's fields into the buffer and enters `Editing(id)`.
    pub fn begin_edit(&mut self, id: Uuid) -> Result<(), AppError> {
        let item = self.items.iter().find(|i| i.id() == id).ok_or_else(|| {
            AppError::NotFound(format!("{} {id} not found", T::SECTION.item_label()))
        })?;
        self.buffer = item.clone();
        self.mode = FormMode::Editing(id);
        Ok(())
    }

    pub fn cancel(&mut self) {
        self.reset();
    }

    pub fn apply_suggestion(&mut self, field: &str, value: &str) -> Result<(), AppError> {
        self.buffer
            .apply_suggestion(field, value)
            .map_err(AppError::Validation)
    }

    /// Validates the buffer, then replaces (Editing) or appends (Idle).
    ///
    /// On validation failure an error toast is emitted and neither the list nor the mode
    /// changes. Returns the id of the stored item.
    pub fn save_item(&mut self, notifier: &mut impl Notifier) -> Result<Uuid, AppError> {
        let editing = match self.mode {
            FormMode::Editing(id) => Some(id),
            FormMode::Idle => None,
        };

        if let Err(message) = self.buffer.validate(&self.items, editing) {
            notifier.error(message.clone());
            return Err(AppError::Validation(message));
        }

        let mut item = self.buffer.clone();
        item.normalize();
        let label = T::SECTION.item_label();

        let id = match editing {
            Some(id) => {
                let Some(slot) = self.items.iter_mut().find(|i| i.id() == id) else {
                    self.reset();
                    return Err(AppError::NotFound(format!("{label} {id} not found")));
                };
                item.set_id(id);
                *slot = item;
                notifier.success(format!("{label} updated successfully"));
                id
            }
            None => {
                let id = fresh_id(&self.items);
                item.set_id(id);
                self.items.push(item);
                notifier.success(format!("{label} added successfully"));
                id
            }
        };

        self.reset();
        Ok(id)
    }

    /// Removes the matching item. Returns whether anything was removed.
    pub fn delete_item(&mut self, id: Uuid, notifier: &mut impl Notifier) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.id() != id);
        let removed = self.items.len() != before;

        if self.mode == FormMode::Editing(id) {
            self.reset();
        }

        notifier.success(format!("{} deleted", T::SECTION.item_label()));
        removed
    }

    /// Pushes the whole local list to the store and advances the wizard by one step.
    pub fn save_and_continue(&mut self, store: &mut ResumeStore) -> ContinueOutcome {
        T::commit(store, self.items.clone());
        let step = T::SECTION.step();
        store.complete_step(step);
        store.success(format!("{} saved", section_title(T::SECTION)));
        let next = store.current_step() + 1;
        store.set_current_step(next);

        ContinueOutcome {
            section: T::SECTION,
            completed_step: step,
            current_step: next,
            scroll_to_top: true,
        }
    }

    /// Buckets items by category in first-seen order. Empty categories never appear.
    pub fn grouped(&self) -> IndexMap<&str, Vec<&T>> {
        let mut groups: IndexMap<&str, Vec<&T>> = IndexMap::new();
        for item in &self.items {
            groups.entry(item.category()).or_default().push(item);
        }
        groups
    }

    pub fn view(&self) -> FormView<T> {
        let groups = self
            .grouped()
            .into_iter()
            .map(|(category, items)| CategoryGroup {
                category: category.to_string(),
                info: T::category_info(category).copied(),
                items: items.into_iter().cloned().collect(),
            })
            .collect();

        FormView {
            section: T::SECTION,
            step: T::SECTION.step(),
            mode: self.mode,
            buffer: self.buffer.clone(),
            items: self.items.clone(),
            groups,
        }
    }

    fn reset(&mut self) {
        self.mode = FormMode::Idle;
        self.buffer = T::default();
    }
}

fn fresh_id<T: FormItem>(items: &[T]) -> Uuid {
    loop {
        let id = Uuid::new_v4();
        if items.iter().all(|i| i.id() != id) {
            return id;
        }
    }
}

fn section_title(section: Section) -> String {
    let raw = section.as_str().replace('_', " ");
    let mut chars = raw.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().to_string() + chars.as_str(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Read model
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct CategoryGroup<T> {
    pub category: String,
    pub info: Option<CategoryInfo>,
    pub items: Vec<T>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormView<T> {
    pub section: Section,
    pub step: u32,
    pub mode: FormMode,
    pub buffer: T,
    pub items: Vec<T>,
    pub groups: Vec<CategoryGroup<T>>,
}
