pub mod listener;
pub mod state;
pub mod users;

pub use state::ServerState;
pub use users::UserRegistry;
