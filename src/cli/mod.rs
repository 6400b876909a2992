mod commands;
mod handlers;

pub use commands::{Cli, Commands, StorageArgs};
pub use handlers::{
    handle_add, handle_delete, handle_get, handle_list, handle_serve, load_config,
    resolve_bind_addr,
};
