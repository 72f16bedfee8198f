//! Advertisements feature.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/ads/` | Paginated listing, price descending |
//! | POST | `/ads/create/` | Create an ad |
//! | GET | `/ads/{id}/` | Get an ad |
//! | PUT | `/ads/{id}/update/` | Update an ad (partial merge) |
//! | DELETE | `/ads/{id}/delete/` | Delete an ad |
//! | POST | `/ads/{id}/upload_image/` | Attach/replace the ad image (multipart) |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::AdService;
