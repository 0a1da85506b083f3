#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod client;
mod config;
mod envelope;
mod error;
mod http;
mod models;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::TurboPushClient;

// Configuration
pub use config::ClientConfig;

// Errors
pub use error::{ClientError, ClientResult};

// HTTP seam for dependency injection
pub use http::{HttpBackend, ReqwestBackend};

// Wire models
pub use models::{
    Account, AccountPlatform, ContentPayload, ContentType, LoginData, PlatformQuery,
    PublishRequest, PublishStatus, RecordQuery, SecureInfo, find_account_by_type,
    platform_display_name,
};
