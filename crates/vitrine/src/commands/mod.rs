pub mod build;
pub mod init;
pub mod meta;
pub mod serve;
pub mod stats;
