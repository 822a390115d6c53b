pub mod oauth;
pub mod twitch_api;
