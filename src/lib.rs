pub mod bot;
pub mod config;
pub mod handlers;
pub mod intent;
pub mod keyboards;
pub mod messages;
pub mod notify;
pub mod session;
pub mod slots;
pub mod store;
pub mod transport;
