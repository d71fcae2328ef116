mod events;
mod health;
mod inquiries;
mod leads;
mod recipes;
mod reviews;
mod stores;
mod track;

pub use events::{event_routes, EventService};
pub use health::{health_routes, AppStartTime, HealthService};
pub use inquiries::{inquiry_routes, InquiryService};
pub use leads::{lead_routes, LeadService};
pub use recipes::{recipe_routes, RecipeService};
pub use reviews::{review_routes, ReviewService};
pub use stores::{store_routes, StoreService};
pub use track::{track_routes, TrackService, SESSION_COOKIE_NAME};
