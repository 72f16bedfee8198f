//! Ad categories feature.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/categories/` | List all categories ordered by name |
//! | POST | `/categories/create/` | Create a category |
//! | GET | `/categories/{id}/` | Get a category |
//! | PUT | `/categories/{id}/update/` | Rename a category |
//! | DELETE | `/categories/{id}/delete/` | Delete a category (cascades to its ads) |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::CategoryService;
