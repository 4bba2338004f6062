pub mod compare;
pub mod eval;
pub mod init;
pub mod paper;
pub mod topics;
pub mod validate;
