//! 会话模块
//!
//! 提供本地会话文件的发现与注册

pub mod discovery;
pub mod registrator;

pub use discovery::{discover, Session, SESSION_EXT};
pub use registrator::register_session;
