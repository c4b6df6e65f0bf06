pub mod collaborators;
pub mod config;
pub mod error;
pub mod event_loop;
pub mod form;
pub mod render;
pub mod session;
pub mod store;
pub mod workout;

#[cfg(test)]
pub(crate) mod testing;
