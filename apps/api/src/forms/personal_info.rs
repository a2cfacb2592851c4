use crate::errors::AppError;
use crate::forms::section::ContinueOutcome;
use crate::forms::validation::{is_valid_email, require};
use crate::models::resume::PersonalInfo;
use crate::store::{Notifier, ResumeStore};
use crate::wizard::Section;

/// Single-record form: there is no list, only a working copy of `PersonalInfo`.
#[derive(Debug, Clone, Default)]
pub struct PersonalInfoForm {
    buffer: PersonalInfo,
}

impl PersonalInfoForm {
    pub fn new(seed: PersonalInfo) -> Self {
        Self { buffer: seed }
    }

    pub fn buffer(&self) -> &PersonalInfo {
        &self.buffer
    }

    pub fn set_buffer(&mut self, draft: PersonalInfo) {
        self.buffer = draft;
    }

    pub fn validate(&self) -> Result<(), String> {
        require(&self.buffer.full_name, "your full name")?;
        require(&self.buffer.email, "your email")?;
        if !is_valid_email(&self.buffer.email) {
            return Err("Please enter a valid email address".to_string());
        }
        Ok(())
    }

    /// Validates, replaces `personal_info` in the store and advances the wizard.
    pub fn save_and_continue(
        &mut self,
        store: &mut ResumeStore,
    ) -> Result<ContinueOutcome, AppError> {
        if let Err(message) = self.validate() {
            store.error(message.clone());
            return Err(AppError::Validation(message));
        }

        let mut info = self.buffer.clone();
        info.full_name = info.full_name.trim().to_string();
        info.email = info.email.trim().to_string();
        store.update_personal_info(info);

        let step = Section::PersonalInfo.step();
        store.complete_step(step);
        store.success("Personal information saved");
        let next = store.current_step() + 1;
        store.set_current_step(next);

        Ok(ContinueOutcome {
            section: Section::PersonalInfo,
            completed_step: step,
            current_step: next,
            scroll_to_top: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ToastKind;

    fn info(name: &str, email: &str) -> PersonalInfo {
        PersonalInfo {
            full_name: name.to_string(),
            email: email.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_invalid_email_blocks_save() {
        let mut store = ResumeStore::new();
        let mut form = PersonalInfoForm::default();
        form.set_buffer(info("Jane Doe", "jane-at-example"));

        let err = form.save_and_continue(&mut store).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(store.resume_data().personal_info, PersonalInfo::default());
        assert_eq!(store.current_step(), 0);
        assert_eq!(store.drain_toasts()[0].kind, ToastKind::Error);
    }

    #[test]
    fn test_missing_name_blocks_save() {
        let mut store = ResumeStore::new();
        let mut form = PersonalInfoForm::default();
        form.set_buffer(info(" ", "jane@example.com"));
        assert!(form.save_and_continue(&mut store).is_err());
        assert!(store.completed_steps().is_empty());
    }

    #[test]
    fn test_save_replaces_and_advances() {
        let mut store = ResumeStore::new();
        let mut form = PersonalInfoForm::default();
        form.set_buffer(info(" Jane Doe ", "jane@example.com "));

        let outcome = form.save_and_continue(&mut store).unwrap();
        assert_eq!(outcome.current_step, 1);
        assert_eq!(store.resume_data().personal_info.full_name, "Jane Doe");
        assert_eq!(store.resume_data().personal_info.email, "jane@example.com");
        assert!(store.completed_steps().contains(&0));
    }
}
