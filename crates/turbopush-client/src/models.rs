//! Request and response models for the Turbo Push API.
//!
//! The service sends more fields than we care about, so response models
//! keep a flattened `extra` map instead of failing on unknown keys.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// Login
// ============================================================================

/// Payload of a successful `POST /user/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginData {
    /// Credential material; `secure.openID` becomes the auth token
    #[serde(default)]
    pub secure: SecureInfo,
    /// Binary-specific fields we pass through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `secure` block inside login data.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecureInfo {
    /// Token to send as the `Authorization` header from now on
    #[serde(rename = "openID", default)]
    pub open_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ============================================================================
// Accounts & platforms
// ============================================================================

/// A publishing account known to the service.
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    /// The platform this account belongs to
    #[serde(default)]
    pub platform: AccountPlatform,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Platform descriptor embedded in an account record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountPlatform {
    /// Stable platform identifier, e.g. `"weibo"`, `"bilibili"`
    #[serde(default)]
    pub plat_type: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Find the first account for a given platform type.
pub fn find_account_by_type<'a>(accounts: &'a [Account], plat_type: &str) -> Option<&'a Account> {
    accounts.iter().find(|acc| acc.platform.plat_type == plat_type)
}

/// Filters for `GET /platform/list`. All optional; `None` means "no filter".
#[derive(Debug, Clone, Default)]
pub struct PlatformQuery {
    /// Only platforms with login enabled
    pub enable: Option<bool>,
    /// Only platforms supporting article publishing
    pub article: Option<bool>,
    /// Only platforms supporting graph-text publishing
    pub graph_text: Option<bool>,
    /// Only platforms supporting video publishing
    pub video: Option<bool>,
}

impl PlatformQuery {
    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(enable) = self.enable {
            query.push(("enable", enable.to_string()));
        }
        if let Some(article) = self.article {
            query.push(("article", article.to_string()));
        }
        if let Some(graph_text) = self.graph_text {
            query.push(("graph_text", graph_text.to_string()));
        }
        if let Some(video) = self.video {
            query.push(("video", video.to_string()));
        }
        query
    }
}

/// Human-readable name for a platform type, where we know one.
pub fn platform_display_name(plat_type: &str) -> Option<&'static str> {
    match plat_type {
        "wechat" => Some("WeChat Official Account"),
        "wechat-video" => Some("WeChat Channels"),
        "weibo" => Some("Weibo"),
        "bilibili" => Some("Bilibili"),
        "xiaohongshu" => Some("Xiaohongshu"),
        "douyin" => Some("Douyin"),
        "toutiaohao" => Some("Toutiao"),
        "zhihu" => Some("Zhihu"),
        "csdn" => Some("CSDN"),
        "juejin" => Some("Juejin"),
        "kuaishou" => Some("Kuaishou"),
        "acfun" => Some("AcFun"),
        _ => None,
    }
}

// ============================================================================
// Content creation & publishing
// ============================================================================

/// Media payload for `POST /graphText/create` and `POST /video/create`.
///
/// `files` are absolute paths on the machine running the binary; video
/// creation accepts a single file, graph-text creation several images.
#[derive(Debug, Clone, Serialize)]
pub struct ContentPayload {
    pub files: Vec<String>,
    pub title: String,
    /// Topics use `#topic#` markup, mentions `@username `
    pub desc: String,
    /// Cover image candidates (the service picks one)
    pub thumb: Vec<String>,
}

/// Body for the `POST /sse/{kind}/{id}` publish endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct PublishRequest {
    /// Also keep a draft copy on the target platforms
    #[serde(rename = "syncDraft")]
    pub sync_draft: bool,
    /// Accounts to publish through
    #[serde(rename = "postAccounts")]
    pub post_accounts: Vec<Value>,
}

impl PublishRequest {
    /// Publish through the given accounts without syncing drafts.
    #[must_use]
    pub fn new(post_accounts: Vec<Value>) -> Self {
        Self {
            sync_draft: false,
            post_accounts,
        }
    }

    #[must_use]
    pub const fn with_sync_draft(mut self, sync_draft: bool) -> Self {
        self.sync_draft = sync_draft;
        self
    }
}

// ============================================================================
// Publish records
// ============================================================================

/// Aggregate outcome of a publish run, as filtered by `GET /record/list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishStatus {
    Publishing,
    AllFailed,
    PartialSuccess,
    AllSucceeded,
}

impl PublishStatus {
    /// Integer value used on the wire.
    pub const fn as_wire(self) -> u8 {
        match self {
            Self::Publishing => 1,
            Self::AllFailed => 2,
            Self::PartialSuccess => 3,
            Self::AllSucceeded => 4,
        }
    }
}

/// Content kind filter for `GET /record/list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Article,
    GraphText,
    Video,
}

impl ContentType {
    /// Integer value used on the wire.
    pub const fn as_wire(self) -> u8 {
        match self {
            Self::Article => 1,
            Self::GraphText => 2,
            Self::Video => 3,
        }
    }
}

/// Paging and filters for `GET /record/list`.
#[derive(Debug, Clone)]
pub struct RecordQuery {
    pub status: Option<PublishStatus>,
    pub content_type: Option<ContentType>,
    /// Records per page
    pub size: u32,
    /// 1-based page number
    pub page: u32,
}

impl Default for RecordQuery {
    fn default() -> Self {
        Self {
            status: None,
            content_type: None,
            size: 10,
            page: 1,
        }
    }
}

impl RecordQuery {
    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("size", self.size.to_string()),
            ("current", self.page.to_string()),
        ];
        if let Some(status) = self.status {
            query.push(("status", status.as_wire().to_string()));
        }
        if let Some(content_type) = self.content_type {
            query.push(("type", content_type.as_wire().to_string()));
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_login_data_extracts_open_id() {
        let data: LoginData = serde_json::from_value(json!({
            "secure": {"openID": "tok-123", "expires": 3600},
            "nickname": "tester"
        }))
        .unwrap();
        assert_eq!(data.secure.open_id.as_deref(), Some("tok-123"));
        assert_eq!(data.extra["nickname"], "tester");
    }

    #[test]
    fn test_login_data_without_secure_block() {
        let data: LoginData = serde_json::from_value(json!({"nickname": "x"})).unwrap();
        assert!(data.secure.open_id.is_none());
    }

    #[test]
    fn test_find_account_by_type() {
        let accounts: Vec<Account> = serde_json::from_value(json!([
            {"platform": {"plat_type": "weibo"}, "name": "a"},
            {"platform": {"plat_type": "zhihu"}, "name": "b"},
        ]))
        .unwrap();

        let hit = find_account_by_type(&accounts, "zhihu").unwrap();
        assert_eq!(hit.extra["name"], "b");
        assert!(find_account_by_type(&accounts, "douyin").is_none());
    }

    #[test]
    fn test_platform_query_serialization() {
        let query = PlatformQuery {
            enable: Some(true),
            video: Some(false),
            ..Default::default()
        };
        assert_eq!(
            query.to_query(),
            vec![("enable", "true".to_string()), ("video", "false".to_string())]
        );
        assert!(PlatformQuery::default().to_query().is_empty());
    }

    #[test]
    fn test_publish_request_field_names() {
        let request = PublishRequest::new(vec![json!({"id": 1})]).with_sync_draft(true);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["syncDraft"], true);
        assert_eq!(value["postAccounts"][0]["id"], 1);
    }

    #[test]
    fn test_record_query_defaults() {
        let query = RecordQuery::default().to_query();
        assert_eq!(
            query,
            vec![("size", "10".to_string()), ("current", "1".to_string())]
        );
    }

    #[test]
    fn test_record_query_filters() {
        let query = RecordQuery {
            status: Some(PublishStatus::AllSucceeded),
            content_type: Some(ContentType::Video),
            size: 25,
            page: 3,
        };
        assert_eq!(
            query.to_query(),
            vec![
                ("size", "25".to_string()),
                ("current", "3".to_string()),
                ("status", "4".to_string()),
                ("type", "3".to_string()),
            ]
        );
    }

    #[test]
    fn test_platform_display_names() {
        assert_eq!(platform_display_name("weibo"), Some("Weibo"));
        assert_eq!(platform_display_name("bilibili"), Some("Bilibili"));
        assert_eq!(platform_display_name("not-a-platform"), None);
    }
}
