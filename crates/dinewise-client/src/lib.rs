//! API client for the dinewise restaurant and events backend.
//!
//! [`ApiClient`] picks a reachable base URL from a priority-ordered candidate
//! list, fails over once when that endpoint breaks, and hands collection
//! responses back as bare lists regardless of which backend version answered.

pub mod client;
mod endpoints;
pub mod error;
mod failover;
pub mod normalize;
pub mod resolver;
pub mod schedule;
pub mod settings;
pub mod types;

pub use client::ApiClient;
pub use error::ClientError;
pub use normalize::{normalize, normalize_records, split_envelope};
pub use resolver::{ActiveEndpoint, EndpointResolver};
pub use schedule::{weekly_schedule, DayHours, WeeklySchedule};
pub use settings::ClientSettings;
pub use types::{
    Acknowledgement, ChatReply, ChatRequest, Company, Conversation, Event, Feedback, FeedbackKind,
    GeoPoint, HealthReport, Location, NewReservation, OpeningHours, Pagination, Reservation,
    Suggestions, SuggestionsRequest,
};
