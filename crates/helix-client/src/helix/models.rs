//! Helix response payloads.
//!
//! Missing fields decode to their zero value and unknown fields are ignored,
//! so payloads keep decoding when Twitch adds or drops fields. Fields Helix
//! may send as `null` also decode to their zero value.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Decode `null` as `T::default()`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Envelopes
// ---------------------------------------------------------------------------

/// Helix pagination block. Pass `cursor` back as `after` to fetch the next
/// page; an empty cursor means there are no more pages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pagination {
    #[serde(deserialize_with = "null_as_default")]
    pub cursor: String,
}

impl Pagination {
    /// The cursor, if another page exists.
    pub fn next(&self) -> Option<&str> {
        Some(self.cursor.as_str()).filter(|cursor| !cursor.is_empty())
    }
}

/// `{"data": [...]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct HelixResponse<T> {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<T>,
}

/// `{"data": [...], "pagination": {...}}`, with `total` on endpoints that
/// report one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct HelixPaginatedResponse<T> {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<T>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pagination: Pagination,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

/// Emote listings carry a CDN URL template next to the data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct EmoteResponse<T> {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<T>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub template: String,
}

// ---------------------------------------------------------------------------
// Ads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Commercial {
    /// Length of the triggered commercial in seconds.
    pub length: u32,
    /// Seconds until the next commercial can be served on this channel.
    pub retry_after: u32,
    /// Why the request failed, when it did.
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
}

// ---------------------------------------------------------------------------
// Analytics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DateRange {
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
}

/// Download link for an extension analytics report. Valid for 5 minutes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtensionAnalytic {
    pub extension_id: String,
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "type")]
    pub report_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub date_range: DateRange,
}

/// Download link for a game analytics report. Valid for 5 minutes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameAnalytic {
    pub game_id: String,
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "type")]
    pub report_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub date_range: DateRange,
}

// ---------------------------------------------------------------------------
// Channels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Channel {
    pub broadcaster_id: String,
    pub broadcaster_login: String,
    pub broadcaster_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub game_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub game_id: String,
    /// ISO 639-1 code or `other`.
    pub broadcaster_language: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    /// Stream delay in seconds.
    pub delay: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelEditor {
    pub user_id: String,
    pub user_name: String,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Chat
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatEmoteImages {
    pub url_1x: String,
    pub url_2x: String,
    pub url_4x: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelEmote {
    pub id: String,
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tier: String,
    pub emote_type: String,
    pub emote_set_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub format: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub scale: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub theme_mode: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub images: ChatEmoteImages,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalEmote {
    pub id: String,
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub format: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub scale: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub theme_mode: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub images: ChatEmoteImages,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SetEmote {
    pub id: String,
    pub name: String,
    pub emote_type: String,
    pub emote_set_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub owner_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub format: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub scale: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub theme_mode: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub images: ChatEmoteImages,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatBadge {
    pub set_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub versions: Vec<ChatBadgeVersion>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatBadgeVersion {
    pub id: String,
    pub image_url_1x: String,
    pub image_url_2x: String,
    pub image_url_4x: String,
}

/// Chat room settings. Durations are `None` when the matching mode is off.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatSettings {
    pub broadcaster_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub moderator_id: String,
    pub emote_mode: bool,
    pub follower_mode: bool,
    pub non_moderator_chat_delay: bool,
    pub slow_mode: bool,
    pub subscriber_mode: bool,
    pub unique_chat_mode: bool,
    /// Minutes a user must follow before chatting.
    pub follower_mode_duration: Option<u32>,
    /// Seconds non-moderator messages are held back.
    pub non_moderator_chat_delay_duration: Option<u32>,
    /// Seconds between messages from one user.
    pub slow_mode_wait_time: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserChatColor {
    pub user_id: String,
    pub user_login: String,
    pub user_name: String,
    /// Hex color such as `#9146FF`; empty when the user never set one.
    #[serde(deserialize_with = "null_as_default")]
    pub color: String,
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: String,
    pub login: String,
    pub display_name: String,
    #[serde(rename = "type")]
    pub user_type: String,
    pub broadcaster_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    pub profile_image_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub offline_image_url: String,
    /// Only present with the `user:read:email` scope.
    #[serde(
        skip_serializing_if = "String::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserFollow {
    pub from_id: String,
    pub from_login: String,
    pub from_name: String,
    pub to_id: String,
    pub to_login: String,
    pub to_name: String,
    pub followed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserBlock {
    pub user_id: String,
    pub user_login: String,
    pub display_name: String,
}

/// An extension the user has installed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserExtension {
    pub id: String,
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub version: String,
    /// Slot types the extension supports: `component`, `mobile`, `panel`, `overlay`.
    #[serde(rename = "type")]
    #[serde(deserialize_with = "null_as_default")]
    pub extension_type: Vec<String>,
    pub can_activate: bool,
}

/// Active extensions per slot, keyed by slot number (`"1"`, `"2"`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActiveExtensions {
    #[serde(deserialize_with = "null_as_default")]
    pub component: BTreeMap<String, ActiveExtension>,
    #[serde(deserialize_with = "null_as_default")]
    pub panel: BTreeMap<String, ActiveExtension>,
    #[serde(deserialize_with = "null_as_default")]
    pub overlay: BTreeMap<String, ActiveExtension>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActiveExtension {
    pub active: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    #[serde(deserialize_with = "null_as_default")]
    pub version: String,
    /// Component slots only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<i32>,
    /// Component slots only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ActiveExtensionsResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub data: ActiveExtensions,
}

// ---------------------------------------------------------------------------
// Streams
// ---------------------------------------------------------------------------

/// A live stream from GET /helix/streams.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Stream {
    pub id: String,
    pub user_id: String,
    pub user_login: String,
    pub user_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub game_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub game_name: String,
    /// `live`, or empty on error.
    #[serde(rename = "type")]
    pub stream_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    pub viewer_count: u64,
    pub started_at: DateTime<Utc>,
    pub language: String,
    /// Contains `{width}` and `{height}` placeholders.
    #[serde(deserialize_with = "null_as_default")]
    pub thumbnail_url: String,
    pub is_mature: bool,
}

// ---------------------------------------------------------------------------
// Channel points
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardImage {
    pub url_1x: String,
    pub url_2x: String,
    pub url_4x: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MaxPerStreamSetting {
    pub is_enabled: bool,
    pub max_per_stream: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MaxPerUserPerStreamSetting {
    pub is_enabled: bool,
    pub max_per_user_per_stream: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalCooldownSetting {
    pub is_enabled: bool,
    pub global_cooldown_seconds: u64,
}

/// Custom channel point reward.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomReward {
    pub broadcaster_id: String,
    pub broadcaster_login: String,
    pub broadcaster_name: String,
    pub id: String,
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub prompt: String,
    pub cost: u64,
    /// `None` when the broadcaster did not upload an image.
    pub image: Option<RewardImage>,
    #[serde(deserialize_with = "null_as_default")]
    pub default_image: RewardImage,
    #[serde(deserialize_with = "null_as_default")]
    pub background_color: String,
    pub is_enabled: bool,
    pub is_user_input_required: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub max_per_stream_setting: MaxPerStreamSetting,
    #[serde(deserialize_with = "null_as_default")]
    pub max_per_user_per_stream_setting: MaxPerUserPerStreamSetting,
    #[serde(deserialize_with = "null_as_default")]
    pub global_cooldown_setting: GlobalCooldownSetting,
    pub is_paused: bool,
    pub is_in_stock: bool,
    pub should_redemptions_skip_request_queue: bool,
    /// `None` when the stream is offline or the limit is disabled.
    pub redemptions_redeemed_current_stream: Option<u64>,
    pub cooldown_expires_at: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// Subscriptions
// ---------------------------------------------------------------------------

/// A user's subscription to a broadcaster.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSubscription {
    pub broadcaster_id: String,
    pub broadcaster_login: String,
    pub broadcaster_name: String,
    pub is_gift: bool,
    /// Set only for gifted subscriptions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gifter_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gifter_login: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gifter_name: Option<String>,
    /// `1000`, `2000` or `3000`.
    pub tier: String,
}
