use itertools::Itertools;
use meetings_model::{AgendaItem, State, UserData};
use std::sync::Arc;

use crate::params::{AgendaItemParams, ListParams, StatusParams};
use crate::select::*;

/// Highest net score first. Built as a stable ascending sort that is then
/// reversed, so items with equal scores come out in reverse cache order.
fn by_net_votes_desc<'a>(items: impl Iterator<Item = &'a Arc<AgendaItem>>) -> Listing<AgendaItem> {
    items
        .cloned()
        .sorted_by_key(|item| item.votes.net())
        .rev()
        .collect()
}

pub(crate) fn select_agenda_items(state: &State, _params: &ListParams) -> Listing<AgendaItem> {
    by_net_votes_desc(state.agenda_items.cache.values())
}

pub(crate) fn select_filtered_agenda_items(
    state: &State,
    params: &StatusParams,
) -> Listing<AgendaItem> {
    let status = params.status.as_deref();
    by_net_votes_desc(
        state
            .agenda_items
            .cache
            .values()
            .filter(|item| item.status.as_deref() == status),
    )
}

pub(crate) fn select_agenda_item(
    state: &State,
    params: &AgendaItemParams,
) -> Option<Arc<AgendaItem>> {
    let agenda_item = match present(params.agenda_item_id) {
        Some(agenda_item_id) => state.agenda_items.get(&agenda_item_id),
        None => state.agenda_items.get_selected(),
    };
    agenda_item.cloned()
}

pub(crate) fn select_is_user_in_stack(
    user_data: Option<&UserData>,
    agenda_item: Option<&AgendaItem>,
) -> bool {
    match (user_data, agenda_item) {
        (Some(user_data), Some(agenda_item)) => agenda_item.has_stack_owner(user_data.id),
        _ => false,
    }
}
