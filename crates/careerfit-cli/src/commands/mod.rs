pub mod init;
pub mod score;
pub mod show;
pub mod take;
pub mod validate;
