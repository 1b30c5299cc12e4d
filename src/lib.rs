//! DeliverEase widget - phone-to-address lookup with a manual-entry fallback.
//!
//! Given a Norwegian phone number the widget asks the lookup service for the
//! registered address and reports the result either to the page that embeds it
//! or through its own UI. When the service is busy, slow or fails, the user is
//! sent to a manual-entry form instead.
//!
//! # Architecture
//!
//! - **domain**: Phone number sanitizer/validator and wire value types
//! - **gateway**: Timeout race around one outbound call
//! - **classifier**: Maps a lookup result onto a terminal outcome
//! - **bridge**: Embedded (post to parent) vs standalone (local UI) notification
//! - **manual_entry**: Manual address entry modal
//! - **controller**: One widget instance tying the above together
//! - **client**: HTTP client for the lookup service
//! - **config**, **i18n**, **metrics**, **error**: Ambient plumbing

pub mod bridge;
pub mod classifier;
pub mod client;
pub mod config;
pub mod controller;
pub mod domain;
pub mod error;
pub mod gateway;
pub mod i18n;
pub mod manual_entry;
pub mod metrics;

pub use bridge::{FrameContext, LocalUi, MessageTarget, Notifier, OutgoingMessage};
pub use classifier::{classify, LookupOutcome, OutcomeKind};
pub use client::{AsyncLookupClient, AsyncLookupClientImpl, LookupClient};
pub use config::WidgetConfig;
pub use controller::{InputState, WidgetController, WidgetParts};
pub use domain::{AddressData, ManualEntryData, PhoneNumber, PostalCode};
pub use error::{BridgeError, ConfigError, LookupApiError, ManualEntryError, WidgetError};
pub use gateway::{call_with_timeout, GatewayError};
pub use i18n::{Catalog, Language};
pub use manual_entry::{ManualEntryForm, ManualField};
pub use metrics::{Metrics, MetricsSummary};
