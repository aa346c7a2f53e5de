mod commands;
mod server;

pub use commands::{crops_command, plan_command, products_command};
pub use server::serve;
