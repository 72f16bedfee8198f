pub mod ads;
pub mod categories;
pub mod users;
