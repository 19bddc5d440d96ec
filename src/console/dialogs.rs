// src/console/dialogs.rs

use std::marker::PhantomData;

use serde::Serialize;

use crate::common::i18n::I18nStore;
use crate::console::table::TableRecord;

// ---
// Edição: sempre o objeto completo + id original (nunca um diff)
// ---
#[derive(Debug, Clone)]
pub struct EditDialog<T> {
    item_id: String,
    draft: T,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditSubmission<T> {
    pub item_id: String,
    pub updated_item: T,
}

impl<T: TableRecord + Clone> EditDialog<T> {
    pub fn open(record: &T) -> Self {
        Self {
            item_id: record.record_id().to_string(),
            draft: record.clone(),
        }
    }

    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    pub fn draft(&self) -> &T {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut T {
        &mut self.draft
    }

    pub fn replace_draft(&mut self, edited: T) {
        self.draft = edited;
    }

    /// O corpo sempre leva o id original, mesmo que o rascunho traga outro.
    pub fn submit(mut self) -> EditSubmission<T> {
        self.draft.set_record_id(&self.item_id);
        EditSubmission {
            item_id: self.item_id,
            updated_item: self.draft,
        }
    }
}

// ---
// Confirmação (excluir / atualizar status)
// ---
pub trait ConfirmKind {
    const PROMPT_KEY: &'static str;
}

#[derive(Debug, Clone, Copy)]
pub struct Delete;

#[derive(Debug, Clone, Copy)]
pub struct UpdateStatus;

impl ConfirmKind for Delete {
    const PROMPT_KEY: &'static str = "dialog.delete_prompt";
}

impl ConfirmKind for UpdateStatus {
    const PROMPT_KEY: &'static str = "dialog.update_status_prompt";
}

#[derive(Debug, Clone)]
pub struct ConfirmDialog<K: ConfirmKind> {
    item_id: String,
    item_name: String,
    _kind: PhantomData<K>,
}

/// Só existe depois de `ConfirmDialog::confirm`. As chamadas destrutivas
/// do console exigem este valor, então nada chega à API sem confirmação.
#[derive(Debug, Clone)]
pub struct Confirmed<K: ConfirmKind> {
    item_id: String,
    _kind: PhantomData<K>,
}

impl<K: ConfirmKind> Confirmed<K> {
    pub fn item_id(&self) -> &str {
        &self.item_id
    }
}

pub type DeleteDialog = ConfirmDialog<Delete>;
pub type DeleteSubmission = Confirmed<Delete>;
pub type StatusDialog = ConfirmDialog<UpdateStatus>;
pub type StatusSubmission = Confirmed<UpdateStatus>;

impl<K: ConfirmKind> ConfirmDialog<K> {
    pub fn open(item_id: impl Into<String>, item_name: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            item_name: item_name.into(),
            _kind: PhantomData,
        }
    }

    pub fn item_name(&self) -> &str {
        &self.item_name
    }

    pub fn prompt(&self, i18n: &I18nStore, lang: &str) -> String {
        i18n.format(lang, K::PROMPT_KEY, &[("name", &self.item_name)])
    }

    /// Fecha sem efeito.
    pub fn cancel(self) {}

    pub fn confirm(self) -> Confirmed<K> {
        Confirmed {
            item_id: self.item_id,
            _kind: PhantomData,
        }
    }

    pub fn view(&self, i18n: &I18nStore, lang: &str) -> ConfirmView {
        ConfirmView {
            item_id: self.item_id.clone(),
            item_name: self.item_name.clone(),
            prompt: self.prompt(i18n, lang),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmView {
    pub item_id: String,
    pub item_name: String,
    pub prompt: String,
}

// ---
// Preview: somente leitura
// ---
#[derive(Debug, Clone, Serialize)]
pub struct PreviewDialog<T> {
    pub record: T,
}

impl<T: Clone> PreviewDialog<T> {
    pub fn open(record: &T) -> Self {
        Self { record: record.clone() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: String,
        name: String,
    }

    impl TableRecord for Row {
        fn record_id(&self) -> &str {
            &self.id
        }
        fn set_record_id(&mut self, id: &str) {
            self.id = id.to_string();
        }
        fn search_fields(&self) -> Vec<String> {
            vec![self.name.clone()]
        }
    }

    #[test]
    fn edit_submission_carries_original_id_and_full_record() {
        let original = Row { id: "r1".into(), name: "Cap".into() };
        let mut dialog = EditDialog::open(&original);
        dialog.draft_mut().name = "Bucket Hat".into();
        dialog.draft_mut().id = "tampered".into();

        let submission = dialog.submit();
        assert_eq!(submission.item_id, "r1");
        assert_eq!(submission.updated_item.id, "r1");
        assert_eq!(submission.updated_item.name, "Bucket Hat");
    }

    #[test]
    fn delete_prompt_names_the_record() {
        let dialog = DeleteDialog::open("m1", "Home Jersey");
        let prompt = dialog.prompt(&I18nStore::new(), "en");
        assert_eq!(prompt, "Are you sure you want to delete Home Jersey? This action cannot be undone.");
    }

    #[test]
    fn status_prompt_uses_its_own_wording() {
        let dialog = StatusDialog::open("o1", "ORD-001");
        let prompt = dialog.prompt(&I18nStore::new(), "en");
        assert!(prompt.starts_with("Are you sure you want to update the status of ORD-001?"));
    }

    #[test]
    fn confirm_yields_submission_for_the_same_item() {
        let submission = DeleteDialog::open("m1", "Home Jersey").confirm();
        assert_eq!(submission.item_id(), "m1");
    }
}
