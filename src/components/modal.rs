use leptos::prelude::*;

use crate::components::result_card::RecordDetails;
use crate::models::content::CandidateRecord;

/// Whether a detail overlay is showing, and for what.
#[derive(Debug, Clone, PartialEq)]
pub enum ModalState<T> {
    Closed,
    Open(T),
}

impl<T> Default for ModalState<T> {
    fn default() -> Self {
        ModalState::Closed
    }
}

impl<T: Clone> ModalState<T> {
    pub fn open(&mut self, item: T) {
        *self = ModalState::Open(item);
    }

    pub fn close(&mut self) {
        *self = ModalState::Closed;
    }

    pub fn is_open(&self) -> bool {
        matches!(self, ModalState::Open(_))
    }

    pub fn current(&self) -> Option<T> {
        match self {
            ModalState::Open(item) => Some(item.clone()),
            ModalState::Closed => None,
        }
    }
}

/// Overlay with the full details of a photo or team member.
///
/// Clicking the backdrop or the close button closes it.
#[component]
pub fn RecordModal(state: RwSignal<ModalState<CandidateRecord>>) -> impl IntoView {
    let close = move |_: leptos::ev::MouseEvent| state.update(ModalState::close);

    view! {
        <Show when=move || state.with(ModalState::is_open)>
            <div class="modal-backdrop" on:click=close>
                <div class="modal" on:click=|ev| ev.stop_propagation()>
                    <button class="modal-close" on:click=close>"×"</button>
                    {move || state.get().current().map(|record| view! { <RecordDetails record=record/> })}
                </div>
            </div>
        </Show>
    }
}
