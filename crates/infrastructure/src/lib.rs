pub mod dns;
pub mod http;
pub mod repositories;
pub mod system;
