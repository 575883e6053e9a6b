mod args;
mod runner;

pub(crate) use args::{CacheAction, Cli, Commands, ConfigAction, FavAction};
pub(crate) use runner::run;
