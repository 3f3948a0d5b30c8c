pub mod init;
pub mod paper;
pub mod results;
pub mod score;
pub mod validate;
