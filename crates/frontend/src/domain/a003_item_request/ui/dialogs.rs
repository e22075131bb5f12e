//! The five action dialogs of the requisitions page.
//!
//! Inputs edit the shared draft in the view model directly. Both buttons
//! lock while the dialog's mutation is in flight; validation runs on submit
//! and its message shows above the form.

use contracts::domain::a003_item_request::{ItemRequest, RequisitionAction};
use leptos::prelude::*;
use thaw::*;

use super::list::view_model::RequisitionsViewModel;
use crate::shared::date_utils::format_quantity;

fn parse_f64(raw: &str) -> f64 {
    raw.trim().parse().unwrap_or(0.0)
}

fn parse_i64(raw: &str) -> i64 {
    raw.trim().parse().unwrap_or(0)
}

#[component]
fn DialogError(vm: RequisitionsViewModel) -> impl IntoView {
    move || {
        vm.dialog_error
            .get()
            .map(|e| view! { <div class="alert alert--error">{e}</div> })
    }
}

/// Request summary shared by the single-record dialogs
#[component]
fn SelectedSummary(vm: RequisitionsViewModel) -> impl IntoView {
    move || {
        vm.form.with(|f| f.selected().cloned()).map(|r: ItemRequest| {
            view! {
                <div class="request-summary">
                    <div><span class="label">"Item: "</span>{r.item.name.clone()}</div>
                    <div><span class="label">"From: "</span>{r.requesting_office.name.clone()}</div>
                    <div><span class="label">"To: "</span>{r.parent_office.name.clone()}</div>
                    <div><span class="label">"Requested by: "</span>{r.requested_by.display_name().to_string()}</div>
                    <div><span class="label">"Requested: "</span>{format_quantity(r.requested_quantity)}</div>
                    {r.reason.clone().map(|reason| view! {
                        <div><span class="label">"Reason: "</span>{reason}</div>
                    })}
                </div>
            }
        })
    }
}

#[component]
fn DialogButtons(
    vm: RequisitionsViewModel,
    action: RequisitionAction,
    on_submit: Callback<()>,
) -> impl IntoView {
    let open = vm.dialog(action);
    let locked = Signal::derive(move || vm.is_submitting(action));
    view! {
        <DialogActions>
            <Button
                appearance=ButtonAppearance::Secondary
                disabled=locked
                on_click=move |_| {
                    if let Some(open) = open {
                        open.set(false);
                    }
                }
            >
                "Cancel"
            </Button>
            <Button
                appearance=ButtonAppearance::Primary
                disabled=locked
                on_click=move |_| on_submit.run(())
            >
                {move || if vm.is_submitting(action) { "Submitting..." } else { action.label() }}
            </Button>
        </DialogActions>
    }
}

#[component]
pub fn CreateRequestDialog(vm: RequisitionsViewModel) -> impl IntoView {
    vm.reset_on_close(RequisitionAction::Create);

    let lines = move || vm.form.with(|f| f.create_draft().lines.clone());

    view! {
        <Dialog open=vm.create_open>
            <DialogSurface>
                <DialogBody>
                    <DialogTitle>"Create Requisition"</DialogTitle>
                    <DialogContent>
                        <DialogError vm=vm />
                        <Flex vertical=true gap=FlexGap::Medium>
                            <div class="form-group">
                                <Label>"Request to office"</Label>
                                <select
                                    prop:value=move || {
                                        vm.form
                                            .with(|f| f.create_draft().parent_office_id)
                                            .map(|id| id.to_string())
                                            .unwrap_or_default()
                                    }
                                    on:change=move |ev| {
                                        let id = event_target_value(&ev).parse::<i64>().ok();
                                        vm.form.update(|f| f.set_parent_office(id));
                                    }
                                >
                                    <option value="">"Select office"</option>
                                    {move || {
                                        vm.target_offices()
                                            .into_iter()
                                            .map(|o| view! { <option value=o.id.to_string()>{o.name}</option> })
                                            .collect_view()
                                    }}
                                </select>
                            </div>

                            <Flex gap=FlexGap::Small align=FlexAlign::End>
                                <div class="form-group">
                                    <Label>"Item"</Label>
                                    <select
                                        prop:value=move || vm.pick_item.get().map(|id| id.to_string()).unwrap_or_default()
                                        on:change=move |ev| {
                                            vm.pick_item.set(event_target_value(&ev).parse::<i64>().ok())
                                        }
                                    >
                                        <option value="">"Select item"</option>
                                        {move || {
                                            vm.items
                                                .get()
                                                .into_iter()
                                                .map(|i| view! { <option value=i.id.to_string()>{i.name}</option> })
                                                .collect_view()
                                        }}
                                    </select>
                                </div>
                                <div class="form-group">
                                    <Label>"Quantity"</Label>
                                    <input
                                        type="number"
                                        min="1"
                                        prop:value=move || vm.pick_quantity.get().to_string()
                                        on:input=move |ev| vm.pick_quantity.set(parse_f64(&event_target_value(&ev)))
                                    />
                                </div>
                                <Button appearance=ButtonAppearance::Secondary on_click=move |_| vm.add_picked_line()>
                                    "Add"
                                </Button>
                            </Flex>

                            <Table>
                                <TableHeader>
                                    <TableRow>
                                        <TableHeaderCell resizable=false min_width=200.0>"Item"</TableHeaderCell>
                                        <TableHeaderCell resizable=false min_width=100.0>"Quantity"</TableHeaderCell>
                                        <TableHeaderCell resizable=false min_width=80.0>""</TableHeaderCell>
                                    </TableRow>
                                </TableHeader>
                                <TableBody>
                                    {move || {
                                        lines()
                                            .into_iter()
                                            .enumerate()
                                            .map(|(index, line)| {
                                                view! {
                                                    <TableRow>
                                                        <TableCell>
                                                            <TableCellLayout>{line.item_name}</TableCellLayout>
                                                        </TableCell>
                                                        <TableCell>
                                                            <input
                                                                type="number"
                                                                min="1"
                                                                prop:value=line.quantity.to_string()
                                                                on:change=move |ev| {
                                                                    let quantity = parse_f64(&event_target_value(&ev));
                                                                    vm.form.update(|f| f.update_item_quantity(index, quantity));
                                                                }
                                                            />
                                                        </TableCell>
                                                        <TableCell>
                                                            <Button
                                                                size=ButtonSize::Small
                                                                appearance=ButtonAppearance::Subtle
                                                                on_click=move |_| vm.form.update(|f| f.remove_item(index))
                                                            >
                                                                "Remove"
                                                            </Button>
                                                        </TableCell>
                                                    </TableRow>
                                                }
                                            })
                                            .collect_view()
                                    }}
                                </TableBody>
                            </Table>

                            <div class="form-group">
                                <Label>"Reason"</Label>
                                <textarea
                                    rows="3"
                                    placeholder="Why are these items needed?"
                                    prop:value=move || vm.form.with(|f| f.create_draft().reason.clone())
                                    on:input=move |ev| vm.form.update(|f| f.set_reason(event_target_value(&ev)))
                                ></textarea>
                            </div>
                        </Flex>
                    </DialogContent>
                    <DialogButtons
                        vm=vm
                        action=RequisitionAction::Create
                        on_submit=Callback::new(move |_| vm.submit_create())
                    />
                </DialogBody>
            </DialogSurface>
        </Dialog>
    }
}

#[component]
pub fn ApproveRequestDialog(vm: RequisitionsViewModel) -> impl IntoView {
    vm.reset_on_close(RequisitionAction::Approve);

    let max = move || {
        vm.form
            .with(|f| f.approval_range())
            .map(|(_, max)| max.to_string())
            .unwrap_or_default()
    };

    view! {
        <Dialog open=vm.approve_open>
            <DialogSurface>
                <DialogBody>
                    <DialogTitle>"Approve Requisition"</DialogTitle>
                    <DialogContent>
                        <DialogError vm=vm />
                        <SelectedSummary vm=vm />
                        <div class="form-group">
                            <Label>"Approved quantity"</Label>
                            <input
                                type="number"
                                min="0"
                                max=max
                                prop:value=move || vm.form.with(|f| f.approved_quantity()).to_string()
                                on:input=move |ev| {
                                    let quantity = parse_f64(&event_target_value(&ev));
                                    vm.form.update(|f| f.set_approved_quantity(quantity));
                                }
                            />
                        </div>
                    </DialogContent>
                    <DialogButtons
                        vm=vm
                        action=RequisitionAction::Approve
                        on_submit=Callback::new(move |_| vm.submit_approval())
                    />
                </DialogBody>
            </DialogSurface>
        </Dialog>
    }
}

#[component]
pub fn RejectRequestDialog(vm: RequisitionsViewModel) -> impl IntoView {
    vm.reset_on_close(RequisitionAction::Reject);

    view! {
        <Dialog open=vm.reject_open>
            <DialogSurface>
                <DialogBody>
                    <DialogTitle>"Reject Requisition"</DialogTitle>
                    <DialogContent>
                        <DialogError vm=vm />
                        <SelectedSummary vm=vm />
                        <div class="form-group">
                            <Label>"Reason for rejection"</Label>
                            <textarea
                                rows="3"
                                prop:value=move || vm.form.with(|f| f.rejection_remarks().to_string())
                                on:input=move |ev| {
                                    vm.form.update(|f| f.set_rejection_remarks(event_target_value(&ev)))
                                }
                            ></textarea>
                        </div>
                    </DialogContent>
                    <DialogButtons
                        vm=vm
                        action=RequisitionAction::Reject
                        on_submit=Callback::new(move |_| vm.submit_rejection())
                    />
                </DialogBody>
            </DialogSurface>
        </Dialog>
    }
}

#[component]
pub fn FulfillRequestDialog(vm: RequisitionsViewModel) -> impl IntoView {
    vm.reset_on_close(RequisitionAction::Fulfill);

    let balance = move || {
        vm.form.with(|f| f.fulfillment_balance()).map(|b| {
            view! {
                <div class="fulfillment-balance">
                    <div><span class="label">"Approved: "</span>{format_quantity(b.approved)}</div>
                    <div><span class="label">"Already fulfilled: "</span>{format_quantity(b.fulfilled)}</div>
                    <div><span class="label">"Remaining: "</span>{format_quantity(b.remaining)}</div>
                </div>
            }
        })
    };

    view! {
        <Dialog open=vm.fulfill_open>
            <DialogSurface>
                <DialogBody>
                    <DialogTitle>"Fulfill Requisition"</DialogTitle>
                    <DialogContent>
                        <DialogError vm=vm />
                        <SelectedSummary vm=vm />
                        {balance}
                        <div class="form-group">
                            <Label>"Quantity to fulfill"</Label>
                            <input
                                type="number"
                                min="1"
                                step="1"
                                prop:value=move || vm.form.with(|f| f.fulfillment_quantity()).to_string()
                                on:input=move |ev| {
                                    let quantity = parse_i64(&event_target_value(&ev));
                                    vm.form.update(|f| f.set_fulfillment_quantity(quantity));
                                }
                            />
                        </div>
                    </DialogContent>
                    <DialogButtons
                        vm=vm
                        action=RequisitionAction::Fulfill
                        on_submit=Callback::new(move |_| vm.submit_fulfillment())
                    />
                </DialogBody>
            </DialogSurface>
        </Dialog>
    }
}

#[component]
pub fn ConfirmReceiptDialog(vm: RequisitionsViewModel) -> impl IntoView {
    vm.reset_on_close(RequisitionAction::Confirm);

    view! {
        <Dialog open=vm.confirm_open>
            <DialogSurface>
                <DialogBody>
                    <DialogTitle>"Confirm Receipt"</DialogTitle>
                    <DialogContent>
                        <DialogError vm=vm />
                        <SelectedSummary vm=vm />
                        <div class="form-group">
                            <Label>"Remarks (optional)"</Label>
                            <textarea
                                rows="3"
                                prop:value=move || vm.form.with(|f| f.confirmation_remarks().to_string())
                                on:input=move |ev| {
                                    vm.form.update(|f| f.set_confirmation_remarks(event_target_value(&ev)))
                                }
                            ></textarea>
                        </div>
                    </DialogContent>
                    <DialogButtons
                        vm=vm
                        action=RequisitionAction::Confirm
                        on_submit=Callback::new(move |_| vm.submit_confirmation())
                    />
                </DialogBody>
            </DialogSurface>
        </Dialog>
    }
}
