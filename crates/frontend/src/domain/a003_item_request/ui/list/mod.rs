pub mod view_model;

use contracts::domain::a003_item_request::{
    total_caption, ItemRequest, RequisitionAction, RequisitionView,
};
use leptos::prelude::*;
use thaw::*;

use self::view_model::RequisitionsViewModel;
use super::dialogs::{
    ApproveRequestDialog, ConfirmReceiptDialog, CreateRequestDialog, FulfillRequestDialog,
    RejectRequestDialog,
};
use crate::shared::date_utils::{format_date, format_quantity};

/// Requisitions page: five relationship tabs over one table plus the action dialogs.
#[component]
pub fn RequisitionsPage() -> impl IntoView {
    let vm = RequisitionsViewModel::new();
    vm.load();
    vm.load_reference_data();

    let selected_tab = RwSignal::new(vm.active_view.get_untracked().slug().to_string());
    Effect::new(move |prev: Option<String>| {
        let current = selected_tab.get();
        if prev.is_some() && prev.as_ref() != Some(&current) {
            match RequisitionView::from_slug(&current) {
                Ok(view) => vm.select_view(view),
                Err(e) => leptos::logging::log!("{}", e),
            }
        }
        current
    });

    view! {
        <div class="page requisitions-page">
            <div class="page__header">
                <h1 class="page__title">"Requisitions"</h1>
                <Show
                    when=move || vm.can_create()
                    fallback=|| view! { <PermissionAlert /> }
                >
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| vm.open_create()>
                        {RequisitionAction::Create.label()}
                    </Button>
                </Show>
            </div>

            <TabList selected_value=selected_tab>
                {RequisitionView::all()
                    .into_iter()
                    .map(|view| view! { <Tab value=view.slug()>{view.title()}</Tab> })
                    .collect_view()}
            </TabList>

            {move || {
                vm.load_error
                    .get()
                    .map(|e| view! { <div class="alert alert--error">{e}</div> })
            }}

            <RequisitionsTable vm=vm />

            <CreateRequestDialog vm=vm />
            <ApproveRequestDialog vm=vm />
            <RejectRequestDialog vm=vm />
            <FulfillRequestDialog vm=vm />
            <ConfirmReceiptDialog vm=vm />
        </div>
    }
}

#[component]
fn RequisitionsTable(vm: RequisitionsViewModel) -> impl IntoView {
    let columns = move || vm.active_view.get().counterpart_columns();

    view! {
        <Table>
            <TableHeader>
                <TableRow>
                    <TableHeaderCell resizable=false min_width=60.0>"ID"</TableHeaderCell>
                    <TableHeaderCell resizable=false min_width=180.0>"Item"</TableHeaderCell>
                    {move || {
                        columns()
                            .iter()
                            .map(|c| view! { <TableHeaderCell resizable=false min_width=160.0>{c.header()}</TableHeaderCell> })
                            .collect_view()
                    }}
                    <TableHeaderCell resizable=false min_width=90.0>"Quantity"</TableHeaderCell>
                    <TableHeaderCell resizable=false min_width=90.0>"Approved"</TableHeaderCell>
                    <TableHeaderCell resizable=false min_width=140.0>"Status"</TableHeaderCell>
                    <TableHeaderCell resizable=false min_width=110.0>"Date"</TableHeaderCell>
                    <TableHeaderCell resizable=false min_width=220.0>"Actions"</TableHeaderCell>
                </TableRow>
            </TableHeader>
            <TableBody>
                <For
                    each=move || vm.rows()
                    key=|r| (r.id, r.status.clone())
                    children=move |request: ItemRequest| view! { <RequisitionRow vm=vm request=request /> }
                />
            </TableBody>
        </Table>

        <Show when=move || !vm.is_loading.get() && vm.rows().is_empty()>
            <div class="empty-state">{move || vm.active_view.get().empty_message()}</div>
        </Show>
        <Show when=move || vm.is_loading.get()>
            <Spinner />
        </Show>
        <div class="table-caption">{move || total_caption(vm.rows().len())}</div>
    }
}

#[component]
fn RequisitionRow(vm: RequisitionsViewModel, request: ItemRequest) -> impl IntoView {
    let columns = vm.active_view.get_untracked().counterpart_columns();
    let counterparts = columns
        .iter()
        .map(|c| {
            let name = c.office_name(&request).to_string();
            view! {
                <TableCell>
                    <TableCellLayout>{name}</TableCellLayout>
                </TableCell>
            }
        })
        .collect_view();

    let approved = request
        .approved_quantity
        .map(format_quantity)
        .unwrap_or_else(|| "-".to_string());
    let actions = vm
        .actions_for(&request)
        .into_iter()
        .map(|action| {
            let request = request.clone();
            let appearance = match action {
                RequisitionAction::Reject => ButtonAppearance::Secondary,
                _ => ButtonAppearance::Primary,
            };
            view! {
                <Button
                    size=ButtonSize::Small
                    appearance=appearance
                    on_click=move |_| vm.open_action(action, &request)
                >
                    {action.label()}
                </Button>
            }
        })
        .collect_view();

    view! {
        <TableRow>
            <TableCell>
                <TableCellLayout>{request.id}</TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout>{request.item.name.clone()}</TableCellLayout>
            </TableCell>
            {counterparts}
            <TableCell>
                <TableCellLayout>{format_quantity(request.requested_quantity)}</TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout>{approved}</TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout>
                    <StatusBadge status=request.status.clone() />
                </TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout>{format_date(&request.requested_date)}</TableCellLayout>
            </TableCell>
            <TableCell>
                <Flex gap=FlexGap::Small>{actions}</Flex>
            </TableCell>
        </TableRow>
    }
}

#[component]
pub fn StatusBadge(#[prop(into)] status: String) -> impl IntoView {
    use contracts::domain::a003_item_request::{format_status, status_color};

    let class = format!("status-badge {}", status_color(&status));
    view! { <span class=class>{format_status(&status)}</span> }
}

/// Shown instead of the create button to non-administrators.
#[component]
pub fn PermissionAlert() -> impl IntoView {
    view! {
        <div class="alert alert--error" role="alert">
            <strong>"Admin Permission Required"</strong>
            <p>
                "Only users with Admin role can create, approve, or reject requisitions. "
                "Please contact your system administrator if you need access."
            </p>
        </div>
    }
}
