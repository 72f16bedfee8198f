mod ad;

pub use ad::{Ad, AdWithRelations};
