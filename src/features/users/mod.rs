//! Users feature.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/users/` | Paginated listing with location names and published-ad counts |
//! | POST | `/users/create/` | Create a user (locations by name, get-or-create) |
//! | GET | `/users/{id}/` | Get a user |
//! | PUT | `/users/{id}/update/` | Update a user (locations by id) |
//! | DELETE | `/users/{id}/delete/` | Delete a user (cascades to their ads) |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::UserService;
