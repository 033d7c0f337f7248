//! Serde models for Statuspage resources.
//!
//! Read models (`Page`, `Component`, ...) tolerate missing fields: every field
//! has a default, and an explicit `null` in a non-optional field decodes to
//! that default, so partial or empty payloads still decode. Input models
//! (`*Input`) omit unset fields when serialized so that a PATCH only touches
//! what the caller set.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Operational state of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentStatus {
    Operational,
    DegradedPerformance,
    PartialOutage,
    MajorOutage,
    UnderMaintenance,
    /// A status this version of the crate does not know about.
    #[serde(other)]
    Unknown,
}

/// Lifecycle state of an incident or scheduled maintenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentStatus {
    Investigating,
    Identified,
    Monitoring,
    Resolved,
    Scheduled,
    InProgress,
    Verifying,
    Completed,
    #[serde(other)]
    Unknown,
}

impl IncidentStatus {
    /// Query parameter value.
    pub fn as_str(self) -> &'static str {
        match self {
            IncidentStatus::Investigating => "investigating",
            IncidentStatus::Identified => "identified",
            IncidentStatus::Monitoring => "monitoring",
            IncidentStatus::Resolved => "resolved",
            IncidentStatus::Scheduled => "scheduled",
            IncidentStatus::InProgress => "in_progress",
            IncidentStatus::Verifying => "verifying",
            IncidentStatus::Completed => "completed",
            IncidentStatus::Unknown => "unknown",
        }
    }
}

/// Impact level of an incident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentImpact {
    None,
    Minor,
    Major,
    Critical,
    Maintenance,
    #[serde(other)]
    Unknown,
}

impl IncidentImpact {
    /// Query parameter value.
    pub fn as_str(self) -> &'static str {
        match self {
            IncidentImpact::None => "none",
            IncidentImpact::Minor => "minor",
            IncidentImpact::Major => "major",
            IncidentImpact::Critical => "critical",
            IncidentImpact::Maintenance => "maintenance",
            IncidentImpact::Unknown => "unknown",
        }
    }
}

/// A status page and its presentation settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Page {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub page_description: Option<String>,
    pub headline: Option<String>,
    pub branding: Option<String>,
    pub subdomain: Option<String>,
    pub domain: Option<String>,
    pub url: Option<String>,
    pub support_url: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub hidden_from_search: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub allow_page_subscribers: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub allow_incident_subscribers: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub allow_email_subscribers: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub allow_sms_subscribers: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub allow_rss_atom_feeds: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub allow_webhook_subscribers: bool,
    pub notifications_from_email: Option<String>,
    pub notifications_email_footer: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub activity_score: f64,
    pub twitter_username: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub viewers_must_be_team_members: bool,
    pub ip_restrictions: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub time_zone: Option<String>,
    pub css_body_background_color: Option<String>,
    pub css_font_color: Option<String>,
    pub css_light_font_color: Option<String>,
    pub css_greens: Option<String>,
    pub css_yellows: Option<String>,
    pub css_oranges: Option<String>,
    pub css_blues: Option<String>,
    pub css_reds: Option<String>,
    pub css_border_color: Option<String>,
    pub css_graph_color: Option<String>,
    pub css_link_color: Option<String>,
    pub css_no_data: Option<String>,
    pub favicon_logo: Option<serde_json::Value>,
    pub transactional_logo: Option<serde_json::Value>,
    pub hero_cover: Option<serde_json::Value>,
    pub email_logo: Option<serde_json::Value>,
    pub twitter_logo: Option<serde_json::Value>,
}

/// Editable page settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subdomain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branding: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_body_background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_font_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_light_font_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_greens: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_yellows: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_oranges: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_blues: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_reds: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_graph_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_link_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_no_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden_from_search: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewers_must_be_team_members: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_page_subscribers: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_incident_subscribers: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_email_subscribers: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_sms_subscribers: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_rss_atom_feeds: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_webhook_subscribers: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifications_from_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifications_email_footer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter_username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub support_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_restrictions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favicon_logo: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transactional_logo: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_cover: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_logo: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter_logo: Option<serde_json::Value>,
}

/// A tracked service or system.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Component {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub page_id: String,
    pub group_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "null_as_default")]
    pub group: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub description: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub position: i64,
    pub status: Option<ComponentStatus>,
    #[serde(deserialize_with = "null_as_default")]
    pub showcase: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub only_show_if_degraded: bool,
    pub automation_email: Option<String>,
    pub start_date: Option<String>,
}

/// Editable component fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComponentInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ComponentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub only_show_if_degraded: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showcase: Option<bool>,
    /// `YYYY-MM-DD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
}

/// A named set of components.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentGroup {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub page_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub description: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub components: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub position: i64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComponentGroupInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
}

/// A component's status transition recorded by an incident.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AffectedComponent {
    #[serde(deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub old_status: Option<ComponentStatus>,
    pub new_status: Option<ComponentStatus>,
}

/// An incident or scheduled maintenance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Incident {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub page_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub status: Option<IncidentStatus>,
    pub impact: Option<IncidentImpact>,
    pub impact_override: Option<IncidentImpact>,
    #[serde(deserialize_with = "null_as_default")]
    pub components: Vec<Component>,
    #[serde(deserialize_with = "null_as_default")]
    pub incident_updates: Vec<IncidentUpdate>,
    #[serde(deserialize_with = "null_as_default")]
    pub component_ids: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub affected_components: Vec<AffectedComponent>,
    pub shortlink: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub monitoring_at: Option<DateTime<Utc>>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub postmortem_body: Option<String>,
    pub postmortem_body_last_updated_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "null_as_default")]
    pub postmortem_ignored: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub postmortem_notified_subscribers: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub postmortem_notified_twitter: bool,
    pub postmortem_published_at: Option<DateTime<Utc>>,
    pub scheduled_for: Option<DateTime<Utc>>,
    pub scheduled_until: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "null_as_default")]
    pub scheduled_remind_prior: bool,
    pub scheduled_reminded_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "null_as_default")]
    pub scheduled_auto_in_progress: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub scheduled_auto_completed: bool,
}

/// Editable incident fields.
///
/// `components` maps component ids to the status they should take while the
/// incident is open.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IncidentInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<IncidentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact_override: Option<IncidentImpact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_for: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_until: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_remind_prior: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_auto_in_progress: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_auto_completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub component_ids: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub components: BTreeMap<String, ComponentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deliver_notifications: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_transition_deliver_notifications_at_end: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_transition_deliver_notifications_at_start: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_transition_to_maintenance_state: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_transition_to_operational_state: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_tweet_at_beginning: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_tweet_on_completion: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_tweet_on_creation: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_tweet_one_hour_before: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backfill_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backfilled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

/// A message posted to an incident's timeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncidentUpdate {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub incident_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub affected_components: Vec<AffectedComponent>,
    #[serde(deserialize_with = "null_as_default")]
    pub body: String,
    pub custom_tweet: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub deliver_notifications: bool,
    pub status: Option<IncidentStatus>,
    pub tweet_id: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub wants_twitter_update: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub display_at: Option<DateTime<Utc>>,
    pub twitter_updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IncidentUpdateInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<IncidentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deliver_notifications: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_tweet: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tweet_id: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub components: BTreeMap<String, ComponentStatus>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub affected_components: Vec<String>,
}

/// Someone receiving notifications for a page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Subscriber {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub page_id: String,
    /// Delivery channel, e.g. `email`, `sms` or `webhook`.
    pub mode: Option<String>,
    pub email: Option<String>,
    pub endpoint: Option<String>,
    pub phone_country: Option<String>,
    pub phone_number: Option<String>,
    pub display_phone_number: Option<String>,
    pub obfuscated_channel_name: Option<String>,
    pub workspace_url: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub skip_confirmation_notification: bool,
    pub page_access_user_id: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub components: Vec<Component>,
    #[serde(deserialize_with = "null_as_default")]
    pub component_ids: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub quarantined: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub purge_at: Option<DateTime<Utc>>,
    pub unsubscribed_at: Option<DateTime<Utc>>,
    pub quarantined_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SubscriberInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_confirmation_notification: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub component_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_access_user_id: Option<String>,
}

/// A system metric shown on the page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metric {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub page_id: String,
    pub metrics_provider_id: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub display_name: Option<String>,
    pub tooltip: Option<String>,
    pub suffix: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub decimal_places: i64,
    pub y_axis_min: Option<f64>,
    pub y_axis_max: Option<f64>,
    #[serde(deserialize_with = "null_as_default")]
    pub y_axis_hidden: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub backfill_percentage: f64,
    pub backfill_status: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub backfill_errors_count: i64,
    pub backfilled_at: Option<DateTime<Utc>>,
    pub most_recent_data_at: Option<DateTime<Utc>>,
    pub last_fetched_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetricInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_axis_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_axis_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_axis_hidden: Option<bool>,
    /// Aggregation applied when rolling up points, e.g. `average` or `sum`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimal_places: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// One metric data point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricData {
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "null_as_default")]
    pub value: f64,
}

/// A data point to submit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricDataInput {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

/// A user of an audience-specific page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageAccessUser {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub page_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    pub external_login: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub page_access_group_ids: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub component_ids: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub metric_ids: Vec<String>,
    pub status_page_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageAccessUserInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_login: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub page_access_group_ids: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub component_ids: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub metric_ids: Vec<String>,
}

/// A group of audience-specific page users sharing the same visibility.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageAccessGroup {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub page_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub component_ids: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub metric_ids: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub page_access_user_ids: Vec<String>,
    pub external_identifier: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageAccessGroupInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub component_ids: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub metric_ids: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub page_access_user_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_identifier: Option<String>,
}

/// A reusable incident message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Template {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub page_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub title: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub body: String,
    pub group_id: Option<String>,
    pub update_status: Option<IncidentStatus>,
    #[serde(deserialize_with = "null_as_default")]
    pub should_tweet: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub should_send_notifications: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TemplateInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_status: Option<IncidentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub should_tweet: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub should_send_notifications: Option<bool>,
}

/// Appearance of the embeddable status widget.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusEmbedConfig {
    #[serde(deserialize_with = "null_as_default")]
    pub page_id: String,
    pub position: Option<String>,
    pub incident_background_color: Option<String>,
    pub incident_text_color: Option<String>,
    pub maintenance_background_color: Option<String>,
    pub maintenance_text_color: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatusEmbedConfigInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incident_background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incident_text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance_background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance_text_color: Option<String>,
}

/// Query parameters sent by a list call.
pub(crate) type QueryPairs = Vec<(&'static str, String)>;

/// Pagination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// 1-based page number.
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ListOptions {
    pub(crate) fn query_pairs(&self) -> QueryPairs {
        let mut pairs = QueryPairs::new();
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            pairs.push(("per_page", per_page.to_string()));
        }
        pairs
    }
}

/// Filters for listing incidents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IncidentListOptions {
    /// Free-text search.
    pub q: Option<String>,
    pub impact: Option<IncidentImpact>,
    pub status: Option<IncidentStatus>,
    pub list: ListOptions,
}

impl IncidentListOptions {
    pub(crate) fn query_pairs(&self) -> QueryPairs {
        let mut pairs = QueryPairs::new();
        if let Some(q) = &self.q {
            pairs.push(("q", q.clone()));
        }
        if let Some(impact) = self.impact {
            pairs.push(("impact", impact.as_str().to_string()));
        }
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        pairs.extend(self.list.query_pairs());
        pairs
    }
}

/// Filters for listing subscribers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubscriberListOptions {
    pub q: Option<String>,
    /// Sort field, e.g. `created_at`.
    pub sort: Option<String>,
    pub list: ListOptions,
}

impl SubscriberListOptions {
    pub(crate) fn query_pairs(&self) -> QueryPairs {
        let mut pairs = QueryPairs::new();
        if let Some(q) = &self.q {
            pairs.push(("q", q.clone()));
        }
        if let Some(sort) = &self.sort {
            pairs.push(("sort", sort.clone()));
        }
        pairs.extend(self.list.query_pairs());
        pairs
    }
}

/// Time window for reading metric data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricDataListOptions {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl MetricDataListOptions {
    pub(crate) fn query_pairs(&self) -> QueryPairs {
        let mut pairs = QueryPairs::new();
        if let Some(from) = self.from {
            pairs.push(("from", from.to_rfc3339_opts(SecondsFormat::Secs, true)));
        }
        if let Some(to) = self.to {
            pairs.push(("to", to.to_rfc3339_opts(SecondsFormat::Secs, true)));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_component_decodes_partial_payload() {
        let component: Component = serde_json::from_value(json!({
            "id": "c1",
            "name": "API",
            "status": "partial_outage",
            "created_at": "2024-03-01T12:00:00Z",
        }))
        .unwrap();

        assert_eq!(component.id, "c1");
        assert_eq!(component.status, Some(ComponentStatus::PartialOutage));
        assert_eq!(
            component.created_at,
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap())
        );
        assert!(component.group_id.is_none());
    }

    #[test]
    fn test_unknown_status_is_tolerated() {
        let component: Component =
            serde_json::from_value(json!({"status": "on_fire"})).unwrap();
        assert_eq!(component.status, Some(ComponentStatus::Unknown));
    }

    #[test]
    fn test_null_fields_decode() {
        let incident: Incident = serde_json::from_value(json!({
            "id": "i1",
            "resolved_at": null,
            "impact": "major",
            "incident_updates": [{"id": "u1", "body": "Investigating", "status": "investigating"}],
        }))
        .unwrap();

        assert!(incident.resolved_at.is_none());
        assert_eq!(incident.impact, Some(IncidentImpact::Major));
        assert_eq!(
            incident.incident_updates[0].status,
            Some(IncidentStatus::Investigating)
        );
    }

    #[test]
    fn test_null_scalars_decode_to_default() {
        let incident: Incident = serde_json::from_str(
            r#"{"id":"i1","name":"x","postmortem_ignored":null,"components":null}"#,
        )
        .unwrap();
        assert_eq!(incident.name, "x");
        assert!(!incident.postmortem_ignored);
        assert!(incident.components.is_empty());

        let component: Component =
            serde_json::from_str(r#"{"id":"c1","position":null,"page_id":null}"#).unwrap();
        assert_eq!(component.position, 0);
        assert_eq!(component.page_id, "");

        let metrics: Vec<Metric> = serde_json::from_value(json!([
            {"id": "m1", "backfill_percentage": null, "decimal_places": null},
            {"id": "m2", "backfill_percentage": 12.5},
        ]))
        .unwrap();
        assert_eq!(metrics[0].backfill_percentage, 0.0);
        assert_eq!(metrics[1].backfill_percentage, 12.5);

        let update: IncidentUpdate =
            serde_json::from_value(json!({"body": null, "deliver_notifications": null}))
                .unwrap();
        assert_eq!(update.body, "");
    }

    #[test]
    fn test_input_omits_unset_fields() {
        let input = ComponentInput {
            status: Some(ComponentStatus::MajorOutage),
            showcase: Some(false),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&input).unwrap(),
            json!({"status": "major_outage", "showcase": false})
        );

        let mut components = BTreeMap::new();
        components.insert("c1".to_string(), ComponentStatus::DegradedPerformance);
        let input = IncidentInput {
            name: Some("Elevated errors".to_string()),
            status: Some(IncidentStatus::InProgress),
            components,
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&input).unwrap(),
            json!({
                "name": "Elevated errors",
                "status": "in_progress",
                "components": {"c1": "degraded_performance"},
            })
        );
    }

    #[test]
    fn test_list_option_query_pairs() {
        assert!(ListOptions::default().query_pairs().is_empty());

        let options = IncidentListOptions {
            q: Some("database".to_string()),
            status: Some(IncidentStatus::Resolved),
            list: ListOptions {
                page: Some(2),
                per_page: None,
            },
            ..Default::default()
        };
        assert_eq!(
            options.query_pairs(),
            vec![
                ("q", "database".to_string()),
                ("status", "resolved".to_string()),
                ("page", "2".to_string()),
            ]
        );

        let window = MetricDataListOptions {
            from: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
            to: None,
        };
        assert_eq!(
            window.query_pairs(),
            vec![("from", "2024-01-01T00:00:00Z".to_string())]
        );
    }
}
