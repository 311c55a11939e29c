//! One-shot `clap` subcommands over a [`Session`](crate::session::Session).

pub mod db;
pub mod lookup;
pub mod search;
pub mod serve;

pub use db::DbCommand;
pub use lookup::LookupCommand;
