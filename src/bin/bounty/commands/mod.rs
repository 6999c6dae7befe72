pub mod config;
pub mod create;
pub mod fill;
pub mod list;
pub mod show;
pub mod update;
pub mod watch;
