//! Wire types shared by every pokerroom client build.
//!
//! `auth` holds the HTTP bodies of the authentication API, `messages` the
//! envelopes exchanged over the room channel and `game` the snapshot the room
//! server pushes on every update.

pub mod auth;
pub mod game;
pub mod messages;

pub use auth::{
    CredentialsBody, ErrorReply, LoginReply, RegisterReply, VerifyReply, VerifyRequest,
    LOGIN_PATH, REGISTER_PATH, VERIFY_PATH,
};
pub use game::GameUpdate;
pub use messages::{ChatMessage, ClientEvent, JoinRoom, RoomAction, ServerEvent};
