use meetings_model::{Amendment, Proposal, State};
use std::sync::Arc;

use crate::params::{AmendmentParams, ProposalParams, ProposalsParams};
use crate::select::*;
use crate::ViewError;

pub(crate) fn select_proposals(
    state: &State,
    params: &ProposalsParams,
) -> Result<Listing<Proposal>, ViewError> {
    let agenda_item_id = required("proposals", "agenda_item_id", params.agenda_item_id)?;

    let listing = match state.agenda_items.get(&agenda_item_id) {
        Some(agenda_item) => by_inserted_at(agenda_item.proposals.values(), |p| p.inserted_at.as_ref()),
        None => empty_listing(),
    };

    Ok(listing)
}

pub(crate) fn select_proposal(
    state: &State,
    params: &ProposalParams,
) -> Result<Option<Arc<Proposal>>, ViewError> {
    let agenda_item_id = required("proposal", "agenda_item_id", params.agenda_item_id)?;
    let proposal_id = required("proposal", "proposal_id", params.proposal_id)?;

    Ok(state
        .agenda_items
        .get(&agenda_item_id)
        .and_then(|agenda_item| agenda_item.proposal(proposal_id))
        .cloned())
}

pub(crate) fn select_amendments(
    state: &State,
    params: &ProposalParams,
) -> Result<Listing<Amendment>, ViewError> {
    let agenda_item_id = required("amendments", "agenda_item_id", params.agenda_item_id)?;
    let proposal_id = required("amendments", "proposal_id", params.proposal_id)?;

    let proposal = state
        .agenda_items
        .get(&agenda_item_id)
        .and_then(|agenda_item| agenda_item.proposal(proposal_id));

    let listing = match proposal {
        Some(proposal) => by_inserted_at(proposal.amendments.values(), |a| a.inserted_at.as_ref()),
        None => empty_listing(),
    };

    Ok(listing)
}

pub(crate) fn select_amendment(
    state: &State,
    params: &AmendmentParams,
) -> Result<Option<Arc<Amendment>>, ViewError> {
    let agenda_item_id = required("amendment", "agenda_item_id", params.agenda_item_id)?;
    let proposal_id = required("amendment", "proposal_id", params.proposal_id)?;
    let amendment_id = required("amendment", "amendment_id", params.amendment_id)?;

    Ok(state
        .agenda_items
        .get(&agenda_item_id)
        .and_then(|agenda_item| agenda_item.proposal(proposal_id))
        .and_then(|proposal| proposal.amendment(amendment_id))
        .cloned())
}
