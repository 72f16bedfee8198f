mod location;
mod user;

pub use location::Location;
pub use user::{User, UserRole, UserWithAdCount};
