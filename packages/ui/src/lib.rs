//! This crate contains all shared UI for the workspace: screen controllers,
//! the session context and the views platform packages route to.

pub mod batch;
pub mod controllers;
pub use controllers::*;

mod generation;
pub use generation::{LoadGeneration, LoadTicket};

mod notice;
pub use notice::Notice;

mod storage;
pub use storage::{make_storage, AppStorage};

mod auth;
pub use auth::{use_session, AppClient, AppSession, LogoutButton, SessionContext, SessionProvider};

mod navbar;
pub use navbar::Navbar;

pub mod views;
