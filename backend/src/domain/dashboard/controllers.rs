//! Create, edit and delete dialog controllers.
//!
//! Each controller is an explicit state machine over a [`GuestCommand`]. A
//! controller never touches the dashboard list directly: its outcome converts
//! into a [`DashboardAction`] which the owner feeds to the reducer.
//!
//! Every controller holds a [`TeardownSignal`]. Firing or dropping the paired
//! [`Teardown`] abandons the in-flight store request and leaves local state
//! as it was before the request started.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use super::DashboardAction;
use crate::domain::ports::GuestCommand;
use crate::domain::{GuestForm, GuestId, GuestRecord, GuestValidationErrors};

/// Owner side of a dialog's teardown channel.
#[derive(Debug)]
pub struct Teardown {
    tx: watch::Sender<bool>,
}

/// Controller side of a dialog's teardown channel.
#[derive(Debug, Clone)]
pub struct TeardownSignal {
    rx: watch::Receiver<bool>,
}

impl Default for Teardown {
    fn default() -> Self {
        Self::new()
    }
}

impl Teardown {
    /// Open a fresh, untriggered channel.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    /// Signal handed to a controller.
    pub fn signal(&self) -> TeardownSignal {
        TeardownSignal {
            rx: self.tx.subscribe(),
        }
    }

    /// Abandon whatever the paired controllers are waiting on.
    pub fn fire(&self) {
        self.tx.send_replace(true);
    }
}

impl TeardownSignal {
    /// Whether the owner has fired or dropped the teardown.
    pub fn is_torn_down(&self) -> bool {
        *self.rx.borrow() || self.rx.has_changed().is_err()
    }

    /// Resolve once the owner fires or drops the teardown.
    pub async fn torn_down(&self) {
        let mut rx = self.rx.clone();
        // Err means the sender is gone, which counts as torn down.
        drop(rx.wait_for(|done| *done).await);
    }

    /// Run `fut` unless teardown happens first.
    pub async fn guard<F>(&self, fut: F) -> Option<F::Output>
    where
        F: Future,
    {
        tokio::select! {
            biased;
            () = self.torn_down() => None,
            output = fut => Some(output),
        }
    }
}

/// Phase of the public submission form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CreatePhase {
    /// Accepting input.
    #[default]
    Idle,
    /// Waiting on the store.
    Submitting,
}

/// Result of one create attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// Stored; carries the record with its store id.
    Created(GuestRecord),
    /// Local validation failed; the store was not called.
    Invalid(GuestValidationErrors),
    /// The store rejected the request.
    Failed(String),
    /// The dialog was torn down mid-request.
    Cancelled,
}

impl CreateOutcome {
    /// Reducer action for this outcome, if the list must change.
    pub fn into_action(self) -> Option<DashboardAction> {
        match self {
            Self::Created(record) => Some(DashboardAction::RecordAdded(record)),
            Self::Failed(message) => Some(DashboardAction::MutationFailed(message)),
            Self::Invalid(_) | Self::Cancelled => None,
        }
    }
}

/// Controller behind the create form.
pub struct CreateController {
    command: Arc<dyn GuestCommand>,
    signal: TeardownSignal,
    phase: CreatePhase,
    error: Option<String>,
    field_errors: Option<GuestValidationErrors>,
}

impl CreateController {
    /// Controller over `command`, cancelled by `signal`.
    pub fn new(command: Arc<dyn GuestCommand>, signal: TeardownSignal) -> Self {
        Self {
            command,
            signal,
            phase: CreatePhase::Idle,
            error: None,
            field_errors: None,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> CreatePhase {
        self.phase
    }

    /// Last store error shown under the form.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Field errors from the last local validation.
    pub fn field_errors(&self) -> Option<&GuestValidationErrors> {
        self.field_errors.as_ref()
    }

    /// Validate and submit `form`.
    pub async fn submit(&mut self, form: GuestForm) -> CreateOutcome {
        if let Err(errors) = form.validate() {
            self.field_errors = Some(errors.clone());
            return CreateOutcome::Invalid(errors);
        }
        self.field_errors = None;
        self.error = None;
        self.phase = CreatePhase::Submitting;

        let command = Arc::clone(&self.command);
        let result = self.signal.guard(command.create_guest(form)).await;
        self.phase = CreatePhase::Idle;

        match result {
            None => {
                debug!("create dialog torn down mid-request");
                CreateOutcome::Cancelled
            }
            Some(Ok(record)) => CreateOutcome::Created(record),
            Some(Err(err)) => {
                warn!(error = %err, "guest create failed");
                self.error = Some(err.message().to_owned());
                CreateOutcome::Failed(err.message().to_owned())
            }
        }
    }
}

/// Phase of the detail/edit dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditPhase {
    /// Read-only detail view.
    #[default]
    Viewing,
    /// Form open with dirty tracking.
    Editing,
    /// Waiting on the store.
    Submitting,
}

/// Result of one save attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// Stored; carries the updated record.
    Saved(GuestRecord),
    /// Nothing to save: not editing, or the form matches the record.
    NotDirty,
    /// Local validation failed; the store was not called.
    Invalid(GuestValidationErrors),
    /// The store rejected the request.
    Failed(String),
    /// The dialog was torn down mid-request.
    Cancelled,
}

impl EditOutcome {
    /// Reducer action for this outcome, if the list must change.
    pub fn into_action(self) -> Option<DashboardAction> {
        match self {
            Self::Saved(record) => Some(DashboardAction::RecordPatched(record)),
            Self::Failed(message) => Some(DashboardAction::MutationFailed(message)),
            Self::NotDirty | Self::Invalid(_) | Self::Cancelled => None,
        }
    }
}

/// Controller behind the detail/edit dialog for one record.
pub struct EditController {
    command: Arc<dyn GuestCommand>,
    signal: TeardownSignal,
    record: GuestRecord,
    form: GuestForm,
    phase: EditPhase,
    error: Option<String>,
}

impl EditController {
    /// Open `record` in the read-only view.
    pub fn new(command: Arc<dyn GuestCommand>, signal: TeardownSignal, record: GuestRecord) -> Self {
        let form = GuestForm::from_record(&record);
        Self {
            command,
            signal,
            record,
            form,
            phase: EditPhase::Viewing,
            error: None,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> EditPhase {
        self.phase
    }

    /// Record as last confirmed by the store.
    pub fn record(&self) -> &GuestRecord {
        &self.record
    }

    /// Form being edited.
    pub fn form(&self) -> &GuestForm {
        &self.form
    }

    /// Last store error shown in the dialog.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Switch to the form, seeded from the record.
    pub fn begin_edit(&mut self) {
        if self.phase == EditPhase::Viewing {
            self.form = GuestForm::from_record(&self.record);
            self.error = None;
            self.phase = EditPhase::Editing;
        }
    }

    /// Replace the form contents while editing.
    pub fn set_form(&mut self, form: GuestForm) {
        if self.phase == EditPhase::Editing {
            self.form = form;
        }
    }

    /// Drop unsaved changes and return to the detail view.
    pub fn cancel_edit(&mut self) {
        if self.phase == EditPhase::Editing {
            self.form = GuestForm::from_record(&self.record);
            self.error = None;
            self.phase = EditPhase::Viewing;
        }
    }

    /// Whether the form differs from the stored record.
    pub fn is_dirty(&self) -> bool {
        self.form.differs_from(&self.record)
    }

    /// Whether the save button is enabled.
    pub fn can_save(&self) -> bool {
        self.phase == EditPhase::Editing && self.is_dirty()
    }

    /// Validate and store the edited form.
    pub async fn save(&mut self) -> EditOutcome {
        if !self.can_save() {
            return EditOutcome::NotDirty;
        }
        if let Err(errors) = self.form.validate() {
            return EditOutcome::Invalid(errors);
        }
        self.error = None;
        self.phase = EditPhase::Submitting;

        let command = Arc::clone(&self.command);
        let id = self.record.id().clone();
        let result = self
            .signal
            .guard(command.update_guest(id, self.form.clone()))
            .await;

        match result {
            None => {
                debug!(guest_id = %self.record.id(), "edit dialog torn down mid-request");
                self.phase = EditPhase::Editing;
                EditOutcome::Cancelled
            }
            Some(Ok(updated)) => {
                self.record = updated.clone();
                self.form = GuestForm::from_record(&updated);
                self.phase = EditPhase::Viewing;
                EditOutcome::Saved(updated)
            }
            Some(Err(err)) => {
                warn!(guest_id = %self.record.id(), error = %err, "guest update failed");
                self.phase = EditPhase::Editing;
                self.error = Some(err.message().to_owned());
                EditOutcome::Failed(err.message().to_owned())
            }
        }
    }
}

/// Phase of the delete confirmation flow.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DeletePhase {
    /// No deletion pending.
    #[default]
    Idle,
    /// Confirmation dialog open for this record.
    Confirming(GuestId),
    /// Waiting on the store.
    Deleting(GuestId),
}

/// Result of one delete attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Record removed from the store.
    Deleted(GuestId),
    /// Confirm was called with nothing pending.
    NotRequested,
    /// The store rejected the request.
    Failed {
        /// Record that was meant to be deleted.
        id: GuestId,
        /// Error shown to the admin.
        message: String,
    },
    /// The dialog was torn down mid-request.
    Cancelled,
}

impl DeleteOutcome {
    /// Reducer action for this outcome, if the list must change.
    pub fn into_action(self) -> Option<DashboardAction> {
        match self {
            Self::Deleted(id) => Some(DashboardAction::RecordRemoved(id)),
            Self::Failed { message, .. } => Some(DashboardAction::MutationFailed(message)),
            Self::NotRequested | Self::Cancelled => None,
        }
    }
}

/// Controller behind the delete confirmation dialog.
pub struct DeleteController {
    command: Arc<dyn GuestCommand>,
    signal: TeardownSignal,
    phase: DeletePhase,
}

impl DeleteController {
    /// Controller over `command`, cancelled by `signal`.
    pub fn new(command: Arc<dyn GuestCommand>, signal: TeardownSignal) -> Self {
        Self {
            command,
            signal,
            phase: DeletePhase::Idle,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> &DeletePhase {
        &self.phase
    }

    /// Ask for confirmation before deleting `id`.
    pub fn request(&mut self, id: GuestId) {
        if !matches!(self.phase, DeletePhase::Deleting(_)) {
            self.phase = DeletePhase::Confirming(id);
        }
    }

    /// Close the confirmation without deleting.
    pub fn cancel(&mut self) {
        if matches!(self.phase, DeletePhase::Confirming(_)) {
            self.phase = DeletePhase::Idle;
        }
    }

    /// Perform the confirmed deletion.
    pub async fn confirm(&mut self) -> DeleteOutcome {
        let DeletePhase::Confirming(id) = std::mem::take(&mut self.phase) else {
            return DeleteOutcome::NotRequested;
        };
        self.phase = DeletePhase::Deleting(id.clone());

        let command = Arc::clone(&self.command);
        let result = self.signal.guard(command.delete_guest(id.clone())).await;
        self.phase = DeletePhase::Idle;

        match result {
            None => {
                debug!(guest_id = %id, "delete dialog torn down mid-request");
                DeleteOutcome::Cancelled
            }
            Some(Ok(())) => DeleteOutcome::Deleted(id),
            Some(Err(err)) => {
                warn!(guest_id = %id, error = %err, "guest delete failed");
                DeleteOutcome::Failed {
                    id,
                    message: err.message().to_owned(),
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "controllers_tests.rs"]
mod tests;
