use meetings_model::{MeetingParticipant, State};

use crate::select::*;

/// Everyone in the meeting except the session user, by full name descending.
/// Participants without a name come first.
pub(crate) fn select_meeting_participants(state: &State) -> Listing<MeetingParticipant> {
    let user_id = state.session.user_data.as_ref().map(|user| user.id);

    sorted_listing(
        state
            .meeting_participants
            .cache
            .values()
            .filter(|participant| Some(participant.id) != user_id),
        |a, b| absent_first_desc(a.full_name.as_ref(), b.full_name.as_ref()),
    )
}
