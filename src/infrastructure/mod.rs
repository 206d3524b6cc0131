pub mod html;
pub mod http;
pub mod memory;
pub mod sqlite;
