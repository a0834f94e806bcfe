pub mod check;
mod command_result;
pub mod edit;
pub mod helper;
pub mod init;
pub mod inspect;
pub mod recent;

pub use command_result::*;
