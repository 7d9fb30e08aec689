//! Application services and ports.

#![forbid(unsafe_code)]

mod config;
mod roster_board;
mod roster_ports;
mod roster_service;
mod session_service;

#[cfg(test)]
mod test_fakes;

pub use config::ClubSettings;
pub use roster_board::RosterBoard;
pub use roster_ports::{RosterRepository, SelectionRepository};
pub use roster_service::{RosterError, RosterService};
pub use session_service::{
    RoleAssignmentRepository, RoleAssignmentRow, SessionContext, SessionService,
};
