use contracts::domain::a001_office::{available_target_offices, Office};
use contracts::domain::a002_item::Item;
use contracts::domain::a003_item_request::{
    can_create, permitted_actions, ItemRequest, RequisitionAction, RequisitionView,
};
use contracts::system::users::Role;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;
use std::collections::BTreeSet;
use std::future::Future;

use crate::domain::a001_office::model::fetch_offices;
use crate::domain::a002_item::model::fetch_items;
use crate::domain::a003_item_request::cache::RequisitionCache;
use crate::domain::a003_item_request::error::RequisitionError;
use crate::domain::a003_item_request::form::RequisitionForm;
use crate::domain::a003_item_request::model::ItemRequestClient;
use crate::shared::api_utils::ApiConfig;
use crate::shared::http::GlooTransport;
use crate::system::auth::context::{use_auth, AuthState};

type Client = ItemRequestClient<GlooTransport>;

/// Numbers list loads so that only the most recent one publishes its outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSequence {
    latest: u64,
}

impl LoadSequence {
    pub fn begin(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    pub fn is_latest(&self, ticket: u64) -> bool {
        ticket == self.latest
    }
}

/// Draft to keep once a submit settles. A dialog closed while the submit was
/// in flight has already reset `current`, so the submitted draft is dropped.
pub fn settled_form(
    current: RequisitionForm,
    submitted: RequisitionForm,
    dialog_open: bool,
) -> RequisitionForm {
    if dialog_open {
        submitted
    } else {
        current
    }
}

/// State of the requisitions page: the active view, its rows, the shared
/// dialog draft and one open flag per dialog.
#[derive(Clone, Copy)]
pub struct RequisitionsViewModel {
    client: StoredValue<Client>,
    auth: RwSignal<AuthState>,
    loads: StoredValue<LoadSequence>,
    pub active_view: RwSignal<RequisitionView>,
    pub requests: RwSignal<Vec<ItemRequest>>,
    pub offices: RwSignal<Vec<Office>>,
    pub items: RwSignal<Vec<Item>>,
    pub is_loading: RwSignal<bool>,
    pub load_error: RwSignal<Option<String>>,

    pub form: RwSignal<RequisitionForm>,
    pub dialog_error: RwSignal<Option<String>>,
    pub submitting: RwSignal<Option<RequisitionAction>>,

    pub create_open: RwSignal<bool>,
    pub approve_open: RwSignal<bool>,
    pub reject_open: RwSignal<bool>,
    pub fulfill_open: RwSignal<bool>,
    pub confirm_open: RwSignal<bool>,

    /// Line picker of the create dialog
    pub pick_item: RwSignal<Option<i64>>,
    pub pick_quantity: RwSignal<f64>,
}

impl RequisitionsViewModel {
    /// One cache per page instance, shared by every read and mutation on it.
    /// Must be called under the auth provider.
    pub fn new() -> Self {
        let transport = GlooTransport::new(ApiConfig::from_window());
        let client = ItemRequestClient::new(transport, RequisitionCache::new());

        Self {
            client: StoredValue::new(client),
            auth: use_auth(),
            loads: StoredValue::new(LoadSequence::default()),
            active_view: RwSignal::new(RequisitionView::default()),
            requests: RwSignal::new(Vec::new()),
            offices: RwSignal::new(Vec::new()),
            items: RwSignal::new(Vec::new()),
            is_loading: RwSignal::new(false),
            load_error: RwSignal::new(None),
            form: RwSignal::new(RequisitionForm::new()),
            dialog_error: RwSignal::new(None),
            submitting: RwSignal::new(None),
            create_open: RwSignal::new(false),
            approve_open: RwSignal::new(false),
            reject_open: RwSignal::new(false),
            fulfill_open: RwSignal::new(false),
            confirm_open: RwSignal::new(false),
            pick_item: RwSignal::new(None),
            pick_quantity: RwSignal::new(1.0),
        }
    }

    // ---- viewer ----

    pub fn role(&self) -> Role {
        self.auth.get().role()
    }

    pub fn office_id(&self) -> Option<i64> {
        self.auth.get().office_id()
    }

    pub fn can_create(&self) -> bool {
        can_create(self.role())
    }

    pub fn actions_for(&self, request: &ItemRequest) -> BTreeSet<RequisitionAction> {
        permitted_actions(self.active_view.get(), &request.status, self.role())
    }

    /// Rows of the active view. The endpoint already filters by relationship;
    /// when the viewer's office is known the same rule is applied locally.
    pub fn rows(&self) -> Vec<ItemRequest> {
        let view = self.active_view.get();
        let requests = self.requests.get();
        match self.office_id() {
            Some(office_id) => view
                .filter(&requests, office_id)
                .into_iter()
                .cloned()
                .collect(),
            None => requests,
        }
    }

    pub fn target_offices(&self) -> Vec<Office> {
        let offices = self.offices.get();
        available_target_offices(&offices, self.office_id())
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn is_submitting(&self, action: RequisitionAction) -> bool {
        self.submitting.get() == Some(action)
    }

    // ---- loading ----

    pub fn load(&self) {
        let vm = *self;
        let view = self.active_view.get_untracked();
        let client = self.client.get_value();
        let mut ticket = 0;
        self.loads.update_value(|loads| ticket = loads.begin());
        self.is_loading.set(true);

        spawn_local(async move {
            let result = client.list_view(view).await;
            // a tab switch or a newer reload makes this outcome obsolete
            if !vm.loads.with_value(|loads| loads.is_latest(ticket)) {
                return;
            }
            match result {
                Ok(requests) => {
                    vm.requests.set(requests);
                    vm.load_error.set(None);
                }
                Err(err) => {
                    leptos::logging::log!("Failed to load {} requisitions: {}", view.slug(), err);
                    vm.load_error.set(Some(err.message()));
                }
            }
            vm.is_loading.set(false);
        });
    }

    pub fn load_reference_data(&self) {
        let offices = self.offices;
        let items = self.items;
        let load_error = self.load_error;
        let client = self.client.get_value();

        spawn_local(async move {
            let transport = client.transport();
            match fetch_offices(transport).await {
                Ok(v) => offices.set(v),
                Err(e) => load_error.set(Some(e)),
            }
            match fetch_items(transport).await {
                Ok(v) => items.set(v),
                Err(e) => load_error.set(Some(e)),
            }
        });
    }

    pub fn select_view(&self, view: RequisitionView) {
        if self.active_view.get_untracked() == view {
            return;
        }
        self.active_view.set(view);
        self.requests.set(Vec::new());
        self.load();
    }

    // ---- dialogs ----

    pub fn open_create(&self) {
        self.dialog_error.set(None);
        self.pick_item.set(None);
        self.pick_quantity.set(1.0);
        self.create_open.set(true);
    }

    pub fn open_action(&self, action: RequisitionAction, request: &ItemRequest) {
        self.dialog_error.set(None);
        self.form.update(|form| match action {
            RequisitionAction::Approve => form.prepare_approval(request),
            RequisitionAction::Reject => form.prepare_rejection(request),
            RequisitionAction::Fulfill => form.prepare_fulfillment(request),
            RequisitionAction::Confirm => form.prepare_confirmation(request),
            RequisitionAction::Create => {}
        });
        if let Some(open) = self.dialog(action) {
            open.set(true);
        }
    }

    pub fn dialog(&self, action: RequisitionAction) -> Option<RwSignal<bool>> {
        match action {
            RequisitionAction::Create => Some(self.create_open),
            RequisitionAction::Approve => Some(self.approve_open),
            RequisitionAction::Reject => Some(self.reject_open),
            RequisitionAction::Fulfill => Some(self.fulfill_open),
            RequisitionAction::Confirm => Some(self.confirm_open),
        }
    }

    /// Discards a dialog's draft whenever that dialog closes.
    pub fn reset_on_close(&self, action: RequisitionAction) {
        let Some(open) = self.dialog(action) else {
            return;
        };
        let form = self.form;
        let dialog_error = self.dialog_error;
        Effect::new(move |was_open: Option<bool>| {
            let is_open = open.get();
            if was_open == Some(true) && !is_open {
                dialog_error.set(None);
                form.update(|f| match action {
                    RequisitionAction::Create => f.reset_create(),
                    RequisitionAction::Approve => f.reset_approval(),
                    RequisitionAction::Reject => f.reset_rejection(),
                    RequisitionAction::Fulfill => f.reset_fulfillment(),
                    RequisitionAction::Confirm => f.reset_confirmation(),
                });
            }
            is_open
        });
    }

    pub fn add_picked_line(&self) {
        let items = self.items.get_untracked();
        let item_id = self.pick_item.get_untracked();
        let quantity = self.pick_quantity.get_untracked();

        let mut result = Ok(());
        self.form
            .update(|f| result = f.add_picked_item(&items, item_id, quantity));
        match result {
            Ok(()) => {
                self.pick_item.set(None);
                self.pick_quantity.set(1.0);
                self.dialog_error.set(None);
            }
            Err(err) => self.dialog_error.set(Some(err.message())),
        }
    }

    // ---- submission ----

    /// Runs one submit against a snapshot of the draft and writes the
    /// resulting draft back while its dialog is still open; the dialog
    /// closes only on success.
    fn submit_with<F, Fut>(&self, action: RequisitionAction, submit: F)
    where
        F: FnOnce(RequisitionForm, Client) -> Fut + 'static,
        Fut: Future<Output = (RequisitionForm, Result<(), RequisitionError>)> + 'static,
    {
        if self.submitting.get_untracked().is_some() {
            return;
        }
        let vm = *self;
        let form = self.form.get_untracked();
        let client = self.client.get_value();
        self.submitting.set(Some(action));
        self.dialog_error.set(None);

        spawn_local(async move {
            let (submitted, result) = submit(form, client).await;
            let dialog = vm.dialog(action);
            let dialog_open = dialog.is_some_and(|open| open.get_untracked());
            vm.form
                .update(|current| *current = settled_form(current.clone(), submitted, dialog_open));
            vm.submitting.set(None);
            match result {
                Ok(()) => {
                    if let Some(open) = dialog {
                        open.set(false);
                    }
                    vm.load();
                }
                Err(err) => {
                    if !err.is_validation() {
                        log::warn!("{} failed: {}", action.label(), err);
                    }
                    if err.may_have_committed() {
                        vm.load();
                    }
                    vm.dialog_error.set(Some(err.message()));
                }
            }
        });
    }

    pub fn submit_create(&self) {
        self.submit_with(RequisitionAction::Create, |mut form, client| async move {
            let result = form.submit_create(&client).await.map(|_| ());
            (form, result)
        });
    }

    pub fn submit_approval(&self) {
        self.submit_with(RequisitionAction::Approve, |mut form, client| async move {
            let result = form.submit_approval(&client).await.map(|_| ());
            (form, result)
        });
    }

    pub fn submit_rejection(&self) {
        self.submit_with(RequisitionAction::Reject, |mut form, client| async move {
            let result = form.submit_rejection(&client).await.map(|_| ());
            (form, result)
        });
    }

    pub fn submit_fulfillment(&self) {
        self.submit_with(RequisitionAction::Fulfill, |mut form, client| async move {
            let result = form.submit_fulfillment(&client).await.map(|_| ());
            (form, result)
        });
    }

    pub fn submit_confirmation(&self) {
        self.submit_with(RequisitionAction::Confirm, |mut form, client| async move {
            let result = form.submit_confirmation(&client).await.map(|_| ());
            (form, result)
        });
    }
}
