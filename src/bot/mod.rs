pub mod chat_event;
pub mod commands;
pub mod cooldown;
pub mod dispatcher;
pub mod platforms;
pub mod replies;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;
