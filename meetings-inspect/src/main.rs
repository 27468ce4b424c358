use clap::{Parser, Subcommand};
use log::info;
use meetings_model::State;
use meetings_ref::{AgendaItemId, AmendmentId, MeetingId, MeetingInvitationId, ProposalId, TopicId};
use meetings_views::{
    AgendaItemParams, AmendmentParams, ListParams, MeetingInvitationParams, MeetingParams,
    ProposalParams, ProposalsParams, SortCriteria, StatusParams, TopicParams, ViewError, Views,
};
use serde_json::{to_string_pretty, to_value, Value};
use std::{io, path::PathBuf, process::ExitCode, sync::Arc};
use tokio::fs::read;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("No home directory to look for the state file in")]
    NoHomeDir,
    #[error("Failed to read state file {path:?}, cause: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to parse state snapshot, cause: {0}")]
    ParseState(#[source] serde_json::Error),
    #[error("Failed to serialize JSON to string: {0}")]
    JsonToString(#[source] serde_json::Error),
    #[error("{0}")]
    View(#[from] ViewError),
}

/// Print a derived view of a meetings state snapshot as JSON.
#[derive(Debug, Parser)]
#[command(name = "meetings-inspect")]
struct Args {
    /// State snapshot to read [default: ~/.meetings/state.json]
    #[arg(long)]
    state: Option<PathBuf>,
    #[command(subcommand)]
    view: ViewCommand,
}

#[derive(Debug, Subcommand)]
enum ViewCommand {
    Ui,
    Proposals {
        #[arg(long)]
        agenda_item: Option<AgendaItemId>,
    },
    Proposal {
        #[arg(long)]
        agenda_item: Option<AgendaItemId>,
        #[arg(long)]
        proposal: Option<ProposalId>,
    },
    Amendments {
        #[arg(long)]
        agenda_item: Option<AgendaItemId>,
        #[arg(long)]
        proposal: Option<ProposalId>,
    },
    Amendment {
        #[arg(long)]
        agenda_item: Option<AgendaItemId>,
        #[arg(long)]
        proposal: Option<ProposalId>,
        #[arg(long)]
        amendment: Option<AmendmentId>,
    },
    Participants,
    Invitations,
    Invitation {
        #[arg(long)]
        invitation: Option<MeetingInvitationId>,
    },
    UserInvitations,
    UserInvitation {
        #[arg(long)]
        invitation: Option<MeetingInvitationId>,
    },
    LoggedIn,
    User,
    Contacts,
    UninvitedContacts,
    Meeting {
        #[arg(long)]
        meeting: Option<MeetingId>,
    },
    Meetings,
    AgendaItems {
        #[arg(long)]
        status: Option<String>,
    },
    AgendaItem {
        #[arg(long)]
        agenda_item: Option<AgendaItemId>,
    },
    InStack {
        #[arg(long)]
        agenda_item: Option<AgendaItemId>,
    },
    Topic {
        #[arg(long)]
        topic: Option<TopicId>,
    },
    Topics {
        #[arg(long)]
        sort: Option<SortCriteria>,
    },
}

pub struct Config {
    state_path: PathBuf,
}

impl Config {
    fn from_args(args: &Args) -> Result<Self, Error> {
        let state_path = match &args.state {
            Some(path) => path.clone(),
            None => simple_home_dir::home_dir()
                .ok_or(Error::NoHomeDir)?
                .join(".meetings")
                .join("state.json"),
        };

        Ok(Config { state_path })
    }
}

async fn load_state(config: &Config) -> Result<Arc<State>, Error> {
    let Config { state_path } = config;
    let bytes = read(state_path).await.map_err(|source| Error::ReadFile {
        path: state_path.clone(),
        source,
    })?;
    let state: State = serde_json::from_slice(&bytes).map_err(Error::ParseState)?;

    info!(
        "Loaded state from {:?}: {} meetings, {} agenda items, {} topics",
        state_path,
        state.meetings.cache.len(),
        state.agenda_items.cache.len(),
        state.topics.cache.len()
    );

    Ok(Arc::new(state))
}

fn render_view(views: &mut Views, state: &Arc<State>, command: &ViewCommand) -> Result<Value, Error> {
    let value = match command {
        ViewCommand::Ui => to_value(&*views.ui(state)),
        ViewCommand::Proposals { agenda_item } => {
            let params = ProposalsParams {
                agenda_item_id: *agenda_item,
            };
            to_value(&*views.proposals(state, &params)?)
        }
        ViewCommand::Proposal {
            agenda_item,
            proposal,
        } => {
            let params = ProposalParams {
                agenda_item_id: *agenda_item,
                proposal_id: *proposal,
            };
            to_value(views.proposal(state, &params)?)
        }
        ViewCommand::Amendments {
            agenda_item,
            proposal,
        } => {
            let params = ProposalParams {
                agenda_item_id: *agenda_item,
                proposal_id: *proposal,
            };
            to_value(&*views.amendments(state, &params)?)
        }
        ViewCommand::Amendment {
            agenda_item,
            proposal,
            amendment,
        } => {
            let params = AmendmentParams {
                agenda_item_id: *agenda_item,
                proposal_id: *proposal,
                amendment_id: *amendment,
            };
            to_value(views.amendment(state, &params)?)
        }
        ViewCommand::Participants => to_value(&*views.meeting_participants(state)),
        ViewCommand::Invitations => to_value(&*views.meeting_invitations(state)),
        ViewCommand::Invitation { invitation } => {
            let params = MeetingInvitationParams {
                meeting_invitation_id: *invitation,
            };
            to_value(views.meeting_invitation(state, &params))
        }
        ViewCommand::UserInvitations => to_value(&*views.user_meeting_invitations(state)),
        ViewCommand::UserInvitation { invitation } => {
            let params = MeetingInvitationParams {
                meeting_invitation_id: *invitation,
            };
            to_value(views.user_meeting_invitation(state, &params))
        }
        ViewCommand::LoggedIn => to_value(views.is_user_logged_in(state)),
        ViewCommand::User => to_value(views.user_data(state)),
        ViewCommand::Contacts => to_value(&*views.user_contacts(state)),
        ViewCommand::UninvitedContacts => to_value(&*views.uninvited_contacts(state)),
        ViewCommand::Meeting { meeting } => {
            let params = MeetingParams {
                meeting_id: *meeting,
            };
            to_value(views.meeting(state, &params))
        }
        ViewCommand::Meetings => to_value(&*views.meetings(state, &ListParams::default())),
        ViewCommand::AgendaItems { status: None } => {
            to_value(&*views.agenda_items(state, &ListParams::default()))
        }
        ViewCommand::AgendaItems {
            status: Some(status),
        } => to_value(&*views.filtered_agenda_items(state, &StatusParams::new(status.as_str()))),
        ViewCommand::AgendaItem { agenda_item } => {
            let params = AgendaItemParams {
                agenda_item_id: *agenda_item,
            };
            to_value(views.agenda_item(state, &params))
        }
        ViewCommand::InStack { agenda_item } => {
            let params = AgendaItemParams {
                agenda_item_id: *agenda_item,
            };
            to_value(views.is_user_in_stack(state, &params))
        }
        ViewCommand::Topic { topic } => {
            let params = TopicParams { topic_id: *topic };
            to_value(views.topic(state, &params))
        }
        ViewCommand::Topics { sort } => {
            let params = ListParams {
                sort_criteria: *sort,
            };
            to_value(&*views.topics(state, &params))
        }
    };

    value.map_err(Error::JsonToString)
}

async fn run(args: Args) -> Result<(), Error> {
    let config = Config::from_args(&args)?;
    let state = load_state(&config).await?;

    let mut views = Views::new();
    let value = render_view(&mut views, &state, &args.view)?;
    let output = to_string_pretty(&value).map_err(Error::JsonToString)?;
    println!("{}", output);

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {}", error);
            ExitCode::FAILURE
        }
    }
}
