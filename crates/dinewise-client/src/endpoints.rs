//! Typed collection and record endpoints.
//!
//! Collection calls accept either wire shape (bare array or `{ data, pagination }`
//! envelope) and skip individual records that fail to deserialize. Single
//! record calls deserialize strictly.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::ApiClient;
use crate::error::ClientError;
use crate::normalize::{normalize_records, split_envelope};
use crate::schedule::{weekly_schedule, WeeklySchedule};
use crate::types::{
    Acknowledgement, ChatReply, ChatRequest, Company, Conversation, Event, Feedback, HealthReport,
    Location, NewReservation, OpeningHours, Pagination, Reservation, Suggestions,
    SuggestionsRequest,
};

impl ApiClient {
    /// `GET /locations`.
    ///
    /// # Errors
    ///
    /// Transport and status errors from [`ApiClient::request`].
    pub async fn list_locations(&self) -> Result<Vec<Location>, ClientError> {
        self.list("/locations").await
    }

    /// `GET /locations?page=&pageSize=`, keeping the envelope's pagination.
    ///
    /// # Errors
    ///
    /// Transport and status errors from [`ApiClient::request`].
    pub async fn list_locations_page(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<(Vec<Location>, Option<Pagination>), ClientError> {
        let path = format!("/locations?page={page}&pageSize={page_size}");
        let body = self.get(&path).await?;
        let (items, pagination) = split_envelope(body);
        let records = normalize_records(Value::Array(items), &path);
        Ok((records, pagination))
    }

    /// `GET /events`.
    ///
    /// # Errors
    ///
    /// Transport and status errors from [`ApiClient::request`].
    pub async fn list_events(&self) -> Result<Vec<Event>, ClientError> {
        self.list("/events").await
    }

    /// `GET /companies`.
    ///
    /// # Errors
    ///
    /// Transport and status errors from [`ApiClient::request`].
    pub async fn list_companies(&self) -> Result<Vec<Company>, ClientError> {
        self.list("/companies").await
    }

    /// `GET /locations/{id}/hours`: raw day-of-week rows.
    ///
    /// # Errors
    ///
    /// Transport and status errors from [`ApiClient::request`].
    pub async fn location_hours(&self, location_id: i64) -> Result<Vec<OpeningHours>, ClientError> {
        self.list(&format!("/locations/{location_id}/hours")).await
    }

    /// `GET /locations/{id}/hours` merged into a Monday..Sunday week.
    ///
    /// # Errors
    ///
    /// Transport and status errors from [`ApiClient::request`].
    pub async fn location_schedule(&self, location_id: i64) -> Result<WeeklySchedule, ClientError> {
        let rows = self.location_hours(location_id).await?;
        Ok(weekly_schedule(&rows))
    }

    /// `GET /locations/{id}/reservations`.
    ///
    /// # Errors
    ///
    /// Transport and status errors from [`ApiClient::request`].
    pub async fn location_reservations(
        &self,
        location_id: i64,
    ) -> Result<Vec<Reservation>, ClientError> {
        self.list(&format!("/locations/{location_id}/reservations"))
            .await
    }

    /// `GET /reservation/user/{id}`.
    ///
    /// # Errors
    ///
    /// Transport and status errors from [`ApiClient::request`].
    pub async fn user_reservations(&self, user_id: i64) -> Result<Vec<Reservation>, ClientError> {
        self.list(&format!("/reservation/user/{user_id}")).await
    }

    /// `POST /reservation`.
    ///
    /// # Errors
    ///
    /// - Transport and status errors from [`ApiClient::request`].
    /// - [`ClientError::Deserialize`] if the created record does not parse.
    pub async fn create_reservation(
        &self,
        reservation: &NewReservation,
    ) -> Result<Reservation, ClientError> {
        let body = self.post("/reservation", Some(reservation)).await?;
        decode(body, "POST /reservation")
    }

    /// `GET /health`, parsed for display.
    ///
    /// # Errors
    ///
    /// - Transport and status errors from [`ApiClient::request`].
    /// - [`ClientError::Deserialize`] if the payload is not a health object.
    pub async fn health(&self) -> Result<HealthReport, ClientError> {
        let body = self.get("/health").await?;
        decode(body, "GET /health")
    }

    /// `POST /api/chat` on the recommendation assistant.
    ///
    /// # Errors
    ///
    /// - Transport and status errors from [`ApiClient::request`].
    /// - [`ClientError::Deserialize`] if the reply does not parse.
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, ClientError> {
        let body = self.post("/api/chat", Some(request)).await?;
        decode(body, "POST /api/chat")
    }

    /// `GET /api/conversation?user_id=&session_id=` on the recommendation
    /// assistant: the stored context of one chat session.
    ///
    /// # Errors
    ///
    /// - Transport and status errors from [`ApiClient::request`].
    /// - [`ClientError::Deserialize`] if the reply does not parse.
    pub async fn conversation(
        &self,
        user_id: &str,
        session_id: &str,
    ) -> Result<Conversation, ClientError> {
        let user_id = utf8_percent_encode(user_id, NON_ALPHANUMERIC);
        let session_id = utf8_percent_encode(session_id, NON_ALPHANUMERIC);
        let path = format!("/api/conversation?user_id={user_id}&session_id={session_id}");
        let body = self.get(&path).await?;
        decode(body, "GET /api/conversation")
    }

    /// `POST /api/suggestions`: completions for a partially typed query.
    ///
    /// # Errors
    ///
    /// - Transport and status errors from [`ApiClient::request`].
    /// - [`ClientError::Deserialize`] if the reply does not parse.
    pub async fn suggestions(
        &self,
        request: &SuggestionsRequest,
    ) -> Result<Suggestions, ClientError> {
        let body = self.post("/api/suggestions", Some(request)).await?;
        decode(body, "POST /api/suggestions")
    }

    /// `POST /api/feedback` on a chat reply.
    ///
    /// # Errors
    ///
    /// - Transport and status errors from [`ApiClient::request`].
    /// - [`ClientError::Deserialize`] if the reply does not parse.
    pub async fn send_feedback(&self, feedback: &Feedback) -> Result<Acknowledgement, ClientError> {
        let body = self.post("/api/feedback", Some(feedback)).await?;
        decode(body, "POST /api/feedback")
    }

    /// `POST /api/reset`: drop the assistant's memory of one chat session.
    ///
    /// # Errors
    ///
    /// - Transport and status errors from [`ApiClient::request`].
    /// - [`ClientError::Deserialize`] if the reply does not parse.
    pub async fn reset_conversation(
        &self,
        user_id: &str,
        session_id: &str,
    ) -> Result<Acknowledgement, ClientError> {
        let request = serde_json::json!({ "user_id": user_id, "session_id": session_id });
        let body = self.post("/api/reset", Some(&request)).await?;
        decode(body, "POST /api/reset")
    }

    async fn list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ClientError> {
        let body = self.get(path).await?;
        Ok(normalize_records(body, path))
    }
}

fn decode<T: DeserializeOwned>(body: Value, context: &str) -> Result<T, ClientError> {
    serde_json::from_value(body).map_err(|e| ClientError::Deserialize {
        context: context.to_string(),
        source: e,
    })
}
