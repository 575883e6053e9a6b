mod cache_cmds;
mod config_cmds;
mod core;
mod favorite_cmds;
mod stats_cmds;

pub use cache_cmds::cmd_cache;
pub use config_cmds::cmd_config;
pub use core::{cmd_apply, cmd_current, cmd_delete, cmd_list, cmd_shuffle, cmd_thumb};
pub use favorite_cmds::cmd_fav;
pub use stats_cmds::cmd_stats;
