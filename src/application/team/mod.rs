//! Team membership and join request use cases

mod get_team;
mod handle_join_request;
mod invite_team_member;
mod remove_team_member;
mod request_to_join;

pub use get_team::{GetTeamCommand, GetTeamUseCase};
pub use handle_join_request::{HandleJoinRequestCommand, HandleJoinRequestUseCase};
pub use invite_team_member::{InviteTeamMemberCommand, InviteTeamMemberUseCase, TeamRole};
pub use remove_team_member::{RemoveTeamMemberCommand, RemoveTeamMemberUseCase};
pub use request_to_join::{RequestToJoinCommand, RequestToJoinUseCase};
