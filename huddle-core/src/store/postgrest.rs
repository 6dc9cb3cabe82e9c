//! PostgREST-backed remote store.
//!
//! Talks to a hosted Postgres-over-REST backend (Supabase-style):
//! `/rest/v1/<table>` with query-string filters, embedded joins via
//! `select=`, and upsert via `Prefer: resolution=merge-duplicates`.

use chrono::{DateTime, Utc};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Response, StatusCode};
use serde::{Deserialize, Serialize};

use crate::config::HuddleConfig;
use crate::meetup::{Meetup, MeetupPatch, NewMeetup};
use crate::rsvp::{EventRef, RsvpStatus};
use crate::store::{Collection, RemoteStore, StoreError, StoreResult};
use crate::time_away::{NewTimeAway, TimeAway, TimeAwayPatch};
use crate::trip::{NewTrip, Trip, TripPatch};
use async_trait::async_trait;

const RSVP_SELECT: &str = "*,rsvps(id,member_id,status,comment)";

/// PostgREST client for the remote store.
pub struct PostgrestStore {
    http: reqwest::Client,
    base_url: String,
}

impl PostgrestStore {
    pub fn new(store_url: &str, api_key: &str) -> StoreResult<Self> {
        let mut headers = HeaderMap::new();
        let key_value = HeaderValue::from_str(api_key)
            .map_err(|_| StoreError::Decode("API key is not a valid header value".into()))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|_| StoreError::Decode("API key is not a valid header value".into()))?;
        headers.insert("apikey", key_value);
        headers.insert(AUTHORIZATION, bearer);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(PostgrestStore {
            http,
            base_url: format!("{}/rest/v1", store_url.trim_end_matches('/')),
        })
    }

    pub fn from_config(config: &HuddleConfig) -> StoreResult<Self> {
        Self::new(&config.store_url, &config.api_key)
    }

    fn table_url(&self, collection: Collection) -> String {
        format!("{}/{}", self.base_url, collection.table())
    }

    async fn fetch_collection<T: for<'de> Deserialize<'de>>(
        &self,
        collection: Collection,
        select: &str,
        order: &str,
    ) -> StoreResult<Vec<T>> {
        let resp = self
            .http
            .get(self.table_url(collection))
            .query(&[("select", select), ("order", order)])
            .send()
            .await?;
        let resp = check(resp).await?;

        resp.json().await.map_err(|e| StoreError::Decode(e.to_string()))
    }

    async fn insert_row<R: Serialize, T: for<'de> Deserialize<'de>>(
        &self,
        collection: Collection,
        row: &R,
    ) -> StoreResult<T> {
        let resp = self
            .http
            .post(self.table_url(collection))
            .header("Prefer", "return=representation")
            .header(ACCEPT, "application/vnd.pgrst.object+json")
            .json(row)
            .send()
            .await?;
        let resp = check(resp).await?;

        resp.json().await.map_err(|e| StoreError::Decode(e.to_string()))
    }

    async fn update_row<R: Serialize>(
        &self,
        collection: Collection,
        id: &str,
        patch: &R,
    ) -> StoreResult<()> {
        let resp = self
            .http
            .patch(self.table_url(collection))
            .query(&[("id", format!("eq.{}", id))])
            .json(&stamped(patch)?)
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }

    async fn delete_row(&self, collection: Collection, id: &str) -> StoreResult<()> {
        let resp = self
            .http
            .delete(self.table_url(collection))
            .query(&[("id", format!("eq.{}", id))])
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }
}

#[async_trait]
impl RemoteStore for PostgrestStore {
    async fn fetch_meetups(&self) -> StoreResult<Vec<Meetup>> {
        self.fetch_collection(Collection::Meetups, RSVP_SELECT, "date_time.desc")
            .await
    }

    async fn fetch_trips(&self) -> StoreResult<Vec<Trip>> {
        self.fetch_collection(Collection::Trips, RSVP_SELECT, "start_date.desc")
            .await
    }

    async fn fetch_time_away(&self) -> StoreResult<Vec<TimeAway>> {
        self.fetch_collection(Collection::TimeAway, "*", "start_date.desc")
            .await
    }

    async fn insert_meetup(&self, new: NewMeetup) -> StoreResult<Meetup> {
        self.insert_row(Collection::Meetups, &new).await
    }

    async fn update_meetup(&self, id: &str, patch: MeetupPatch) -> StoreResult<()> {
        self.update_row(Collection::Meetups, id, &patch).await
    }

    async fn delete_meetup(&self, id: &str) -> StoreResult<()> {
        self.delete_row(Collection::Meetups, id).await
    }

    async fn insert_trip(&self, new: NewTrip) -> StoreResult<Trip> {
        self.insert_row(Collection::Trips, &new).await
    }

    async fn update_trip(&self, id: &str, patch: TripPatch) -> StoreResult<()> {
        self.update_row(Collection::Trips, id, &patch).await
    }

    async fn delete_trip(&self, id: &str) -> StoreResult<()> {
        self.delete_row(Collection::Trips, id).await
    }

    async fn insert_time_away(&self, new: NewTimeAway) -> StoreResult<TimeAway> {
        self.insert_row(Collection::TimeAway, &new).await
    }

    async fn update_time_away(&self, id: &str, patch: TimeAwayPatch) -> StoreResult<()> {
        self.update_row(Collection::TimeAway, id, &patch).await
    }

    async fn delete_time_away(&self, id: &str) -> StoreResult<()> {
        self.delete_row(Collection::TimeAway, id).await
    }

    async fn upsert_rsvp(
        &self,
        event: &EventRef,
        member_id: &str,
        status: RsvpStatus,
        comment: Option<&str>,
    ) -> StoreResult<()> {
        let row = RsvpUpsertRow::new(event, member_id, status, comment);

        let resp = self
            .http
            .post(self.table_url(Collection::Rsvps))
            .query(&[("on_conflict", conflict_target(event))])
            .header("Prefer", "resolution=merge-duplicates")
            .json(&row)
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }

    async fn delete_rsvp(&self, event: &EventRef, member_id: &str) -> StoreResult<()> {
        let resp = self
            .http
            .delete(self.table_url(Collection::Rsvps))
            .query(&[
                (event_fk_column(event), format!("eq.{}", event.id())),
                ("member_id", format!("eq.{}", member_id)),
            ])
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }

    async fn probe(&self, collection: Collection) -> StoreResult<String> {
        let stamp = stamp_column(collection);
        let order = probe_order(collection);
        let resp = self
            .http
            .get(self.table_url(collection))
            .query(&[("select", stamp), ("order", order.as_str()), ("limit", "1")])
            .header("Prefer", "count=exact")
            .send()
            .await?;
        let resp = check(resp).await?;

        // Row count (from Content-Range) plus the newest stamp: any
        // insert, update, or delete changes one of the two.
        let range = resp
            .headers()
            .get("content-range")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        let body = resp.text().await.unwrap_or_default();

        Ok(format!("{}|{}", range, body))
    }
}

/// Wire row for the rsvps table: the polymorphic foreign key only exists
/// here, reconstructed from the client-side `EventRef`. `comment` is
/// always serialized so merge-duplicates overwrites a stale one, and
/// `responded_at` moves the probe fingerprint on every response.
#[derive(Serialize)]
struct RsvpUpsertRow<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    meetup_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trip_id: Option<&'a str>,
    member_id: &'a str,
    status: RsvpStatus,
    comment: Option<&'a str>,
    responded_at: DateTime<Utc>,
}

impl<'a> RsvpUpsertRow<'a> {
    fn new(
        event: &'a EventRef,
        member_id: &'a str,
        status: RsvpStatus,
        comment: Option<&'a str>,
    ) -> Self {
        let (meetup_id, trip_id) = match event {
            EventRef::Meetup(id) => (Some(id.as_str()), None),
            EventRef::Trip(id) => (None, Some(id.as_str())),
        };
        RsvpUpsertRow {
            meetup_id,
            trip_id,
            member_id,
            status,
            comment,
            responded_at: Utc::now(),
        }
    }
}

fn event_fk_column(event: &EventRef) -> &'static str {
    match event {
        EventRef::Meetup(_) => "meetup_id",
        EventRef::Trip(_) => "trip_id",
    }
}

fn conflict_target(event: &EventRef) -> &'static str {
    match event {
        EventRef::Meetup(_) => "meetup_id,member_id",
        EventRef::Trip(_) => "trip_id,member_id",
    }
}

fn stamp_column(collection: Collection) -> &'static str {
    match collection {
        Collection::Rsvps => "responded_at",
        _ => "updated_at",
    }
}

/// Never-edited rows carry a null stamp, and descending order puts
/// nulls first by default; they must sort last or the limit-1 probe
/// would stay pinned to null no matter how many rows get edited.
fn probe_order(collection: Collection) -> String {
    format!("{}.desc.nullslast", stamp_column(collection))
}

/// Merge a fresh `updated_at` into an update payload so every edit
/// moves the probe fingerprint.
fn stamped<R: Serialize>(patch: &R) -> StoreResult<serde_json::Value> {
    let mut body = serde_json::to_value(patch).map_err(|e| StoreError::Decode(e.to_string()))?;
    if let serde_json::Value::Object(map) = &mut body {
        map.insert("updated_at".to_string(), serde_json::json!(Utc::now()));
    }
    Ok(body)
}

/// Pass successful responses through; classify everything else.
async fn check(resp: Response) -> StoreResult<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    Err(classify_failure(status, &body))
}

#[derive(Deserialize)]
struct ErrorBody {
    code: Option<String>,
    message: Option<String>,
}

fn classify_failure(status: StatusCode, body: &str) -> StoreError {
    let (code, message) = match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => (
            parsed.code,
            parsed.message.unwrap_or_else(|| body.to_string()),
        ),
        Err(_) => (None, body.to_string()),
    };

    if looks_like_missing_schema(code.as_deref(), &message) {
        return StoreError::MissingSchema;
    }

    StoreError::Rejected {
        status: status.as_u16(),
        message,
    }
}

/// Heuristic for "the tables were never provisioned", matching the error
/// shapes PostgREST and Postgres produce for absent relations.
fn looks_like_missing_schema(code: Option<&str>, message: &str) -> bool {
    if let Some(code) = code {
        if code == "PGRST116" || code == "PGRST205" || code == "42P01" {
            return true;
        }
    }

    message.contains("relation") && message.contains("does not exist")
        || message.contains("Could not find the table")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_schema_detected_from_codes() {
        assert!(matches!(
            classify_failure(
                StatusCode::NOT_FOUND,
                r#"{"code":"PGRST205","message":"Could not find the table 'public.meetups' in the schema cache"}"#,
            ),
            StoreError::MissingSchema
        ));
        assert!(matches!(
            classify_failure(
                StatusCode::BAD_REQUEST,
                r#"{"code":"42P01","message":"relation \"public.meetups\" does not exist"}"#,
            ),
            StoreError::MissingSchema
        ));
    }

    #[test]
    fn missing_schema_detected_from_message_without_code() {
        assert!(matches!(
            classify_failure(
                StatusCode::NOT_FOUND,
                r#"{"message":"relation \"public.trips\" does not exist"}"#,
            ),
            StoreError::MissingSchema
        ));
    }

    #[test]
    fn other_failures_are_rejections() {
        let err = classify_failure(
            StatusCode::CONFLICT,
            r#"{"code":"23505","message":"duplicate key value"}"#,
        );
        match err {
            StoreError::Rejected { status, message } => {
                assert_eq!(status, 409);
                assert!(message.contains("duplicate key"));
            }
            other => panic!("expected Rejected, got {:?}", other),
        }
    }

    #[test]
    fn non_json_body_becomes_rejection_with_raw_text() {
        let err = classify_failure(StatusCode::BAD_GATEWAY, "upstream unavailable");
        match err {
            StoreError::Rejected { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "upstream unavailable");
            }
            other => panic!("expected Rejected, got {:?}", other),
        }
    }

    #[test]
    fn rsvp_row_sets_exactly_one_foreign_key() {
        let meetup = EventRef::Meetup("m1".into());
        let row = RsvpUpsertRow::new(&meetup, "ben", RsvpStatus::Going, Some("bringing snacks"));
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["meetup_id"], "m1");
        assert!(json.get("trip_id").is_none());
        assert_eq!(json["status"], "going");
        assert_eq!(json["comment"], "bringing snacks");

        let trip = EventRef::Trip("t1".into());
        let row = RsvpUpsertRow::new(&trip, "ben", RsvpStatus::Maybe, None);
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["trip_id"], "t1");
        assert!(json.get("meetup_id").is_none());
        // Serialized even when absent, so an upsert clears a stale one.
        assert!(json["comment"].is_null());
    }

    #[test]
    fn rsvp_row_carries_response_stamp() {
        let meetup = EventRef::Meetup("m1".into());
        let row = RsvpUpsertRow::new(&meetup, "ben", RsvpStatus::Going, None);
        let json = serde_json::to_value(&row).unwrap();
        assert!(json["responded_at"].is_string());
    }

    #[test]
    fn update_payload_carries_fresh_stamp() {
        let patch = MeetupPatch {
            title: "Dinner".to_string(),
            date_time: Utc::now(),
            location: None,
            notes: None,
            updated_by: "ben".to_string(),
        };
        let body = stamped(&patch).unwrap();
        assert_eq!(body["title"], "Dinner");
        assert!(body["updated_at"].is_string());
    }

    #[test]
    fn probe_orders_null_stamps_last() {
        assert_eq!(probe_order(Collection::Meetups), "updated_at.desc.nullslast");
        assert_eq!(probe_order(Collection::Trips), "updated_at.desc.nullslast");
        assert_eq!(probe_order(Collection::Rsvps), "responded_at.desc.nullslast");
    }

    #[test]
    fn conflict_target_follows_event_kind() {
        assert_eq!(
            conflict_target(&EventRef::Meetup("m".into())),
            "meetup_id,member_id"
        );
        assert_eq!(
            conflict_target(&EventRef::Trip("t".into())),
            "trip_id,member_id"
        );
    }
}
