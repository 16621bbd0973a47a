pub mod enums;
pub mod schema;
