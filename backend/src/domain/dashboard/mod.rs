//! Admin dashboard state as an explicit value object with a pure reducer.
//!
//! [`DashboardState`] exclusively owns the in-memory copy of the guest list.
//! Everything else (dialogs, the debounced search box, store round trips)
//! asks for changes by dispatching a [`DashboardAction`] through [`reduce`].
//! The visible page is always derived, never stored.

mod controllers;
mod debounce;

pub use controllers::{
    CreateController, CreateOutcome, DeleteController, DeleteOutcome, DeletePhase,
    EditController, EditOutcome, EditPhase, Teardown, TeardownSignal,
};
pub use debounce::{DEFAULT_SEARCH_DEBOUNCE, SearchDebounce, run_search_debounce};

use pagination::{Page, PageSize, Pager, paginate};

use crate::domain::{GuestFilter, GuestId, GuestRecord, distinct_years};

/// Progress of the initial record fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    /// Fetch in flight.
    #[default]
    Loading,
    /// Records available.
    Ready,
    /// Fetch failed; the list renders empty.
    Failed,
}

/// Day/month/year selection staged in the filter popover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateSelection {
    /// Day of month, `None` for all.
    pub day: Option<u32>,
    /// 1-indexed month, `None` for all.
    pub month: Option<u32>,
    /// Year, `None` for all.
    pub year: Option<i32>,
}

/// Kind of banner shown above the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Mutation succeeded.
    Success,
    /// Mutation or load failed.
    Error,
}

/// Transient banner message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Banner style.
    pub kind: NoticeKind,
    /// Message text.
    pub message: String,
}

/// Dialog currently open over the table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OpenDialog {
    /// No dialog.
    #[default]
    None,
    /// Read-only detail view.
    Detail(GuestId),
    /// Edit form.
    Edit(GuestId),
    /// Delete confirmation.
    Delete(GuestId),
}

/// Whole dashboard state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardState {
    records: Vec<GuestRecord>,
    status: LoadStatus,
    search_input: String,
    staged: DateSelection,
    applied: GuestFilter,
    requested_page: usize,
    page_size: PageSize,
    dialog: OpenDialog,
    notice: Option<Notice>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            status: LoadStatus::default(),
            search_input: String::new(),
            staged: DateSelection::default(),
            applied: GuestFilter::default(),
            requested_page: 1,
            page_size: PageSize::default(),
            dialog: OpenDialog::default(),
            notice: None,
        }
    }
}

/// Every change the dashboard state accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardAction {
    /// Initial fetch returned these records, newest first.
    RecordsLoaded(Vec<GuestRecord>),
    /// Initial fetch failed.
    LoadFailed(String),
    /// Raw keystrokes in the search box; not yet applied.
    SearchTyped(String),
    /// Debounced search term to apply.
    SearchCommitted(String),
    /// Stage a day/month/year selection without applying it.
    StageDates(DateSelection),
    /// Apply the staged selection.
    ApplyDates,
    /// Clear staged and applied date filters.
    ResetDates,
    /// Move to the next page.
    NextPage,
    /// Move to the previous page.
    PreviousPage,
    /// Jump to a 1-indexed page.
    GoToPage(usize),
    /// A new record was stored.
    RecordAdded(GuestRecord),
    /// A record was edited in the store.
    RecordPatched(GuestRecord),
    /// A record was deleted from the store.
    RecordRemoved(GuestId),
    /// A store mutation failed; the list is left untouched.
    MutationFailed(String),
    /// Open a dialog over the table.
    OpenDialog(OpenDialog),
    /// Close the open dialog.
    CloseDialog,
    /// Hide the banner.
    DismissNotice,
}

/// Apply `action` to `state`, returning the next state.
///
/// # Examples
/// ```
/// use guestbook::domain::dashboard::{DashboardAction, DashboardState, reduce};
///
/// let state = reduce(DashboardState::default(), DashboardAction::RecordsLoaded(Vec::new()));
/// assert!(state.filtered().is_empty());
/// assert_eq!(state.pager().page_count(), 0);
/// ```
pub fn reduce(mut state: DashboardState, action: DashboardAction) -> DashboardState {
    match action {
        DashboardAction::RecordsLoaded(records) => {
            state.records = records;
            state.status = LoadStatus::Ready;
        }
        DashboardAction::LoadFailed(message) => {
            state.records.clear();
            state.status = LoadStatus::Failed;
            state.notice = Some(Notice {
                kind: NoticeKind::Error,
                message,
            });
        }
        DashboardAction::SearchTyped(text) => state.search_input = text,
        DashboardAction::SearchCommitted(term) => {
            state.applied.search = term;
            state.requested_page = 1;
        }
        DashboardAction::StageDates(selection) => state.staged = selection,
        DashboardAction::ApplyDates => {
            state.applied.day = state.staged.day;
            state.applied.month = state.staged.month;
            state.applied.year = state.staged.year;
            state.requested_page = 1;
        }
        DashboardAction::ResetDates => {
            state.staged = DateSelection::default();
            state.applied.day = None;
            state.applied.month = None;
            state.applied.year = None;
            state.requested_page = 1;
        }
        DashboardAction::NextPage => {
            state.requested_page = state.pager().next().current_page();
        }
        DashboardAction::PreviousPage => {
            state.requested_page = state.pager().previous().current_page();
        }
        DashboardAction::GoToPage(page) => state.requested_page = page,
        DashboardAction::RecordAdded(record) => {
            // Records are cached newest first, matching the store listing.
            state.records.insert(0, record);
            state.notice = Some(success("Data berhasil disimpan"));
        }
        DashboardAction::RecordPatched(record) => {
            if let Some(slot) = state.records.iter_mut().find(|r| r.id() == record.id()) {
                *slot = record;
            }
            state.dialog = OpenDialog::None;
            state.notice = Some(success("Data berhasil diperbarui"));
        }
        DashboardAction::RecordRemoved(id) => {
            state.records.retain(|r| r.id() != &id);
            state.dialog = OpenDialog::None;
            state.notice = Some(success("Data berhasil dihapus"));
        }
        DashboardAction::MutationFailed(message) => {
            state.notice = Some(Notice {
                kind: NoticeKind::Error,
                message,
            });
        }
        DashboardAction::OpenDialog(dialog) => state.dialog = dialog,
        DashboardAction::CloseDialog => state.dialog = OpenDialog::None,
        DashboardAction::DismissNotice => state.notice = None,
    }
    state
}

fn success(message: &str) -> Notice {
    Notice {
        kind: NoticeKind::Success,
        message: message.to_owned(),
    }
}

impl DashboardState {
    /// Every cached record, in fetch order.
    pub fn records(&self) -> &[GuestRecord] {
        &self.records
    }

    /// Fetch progress.
    pub fn status(&self) -> LoadStatus {
        self.status
    }

    /// Text currently in the search box.
    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    /// Date selection staged in the popover.
    pub fn staged(&self) -> DateSelection {
        self.staged
    }

    /// Filter currently applied to the table.
    pub fn applied(&self) -> &GuestFilter {
        &self.applied
    }

    /// Open dialog.
    pub fn dialog(&self) -> &OpenDialog {
        &self.dialog
    }

    /// Banner message, if any.
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Cached record by id.
    pub fn find(&self, id: &GuestId) -> Option<&GuestRecord> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Records matching the applied filter, in fetch order.
    pub fn filtered(&self) -> Vec<&GuestRecord> {
        self.applied.apply(&self.records)
    }

    /// Whether the "no results" state should be shown.
    pub fn is_empty_result(&self) -> bool {
        self.status != LoadStatus::Loading && self.filtered().is_empty()
    }

    /// Pager over the filtered records with the page clamped into range.
    pub fn pager(&self) -> Pager {
        Pager::new(self.filtered().len(), self.page_size, self.requested_page)
    }

    /// Records on the visible page.
    pub fn visible(&self) -> Page<GuestRecord> {
        let filtered: Vec<GuestRecord> = self.filtered().into_iter().cloned().collect();
        paginate(&filtered, self.page_size, self.requested_page)
    }

    /// Distinct visit years for the year dropdown, newest first.
    pub fn years(&self) -> Vec<i32> {
        distinct_years(&self.records)
    }
}
