//! Rust client SDK for the [Mautic](https://www.mautic.org) REST API.
//!
//! Mautic's JSON responses are irregular: the contact endpoints still use the
//! legacy "lead" naming, per-instance custom fields are nested under group
//! keys with their metadata duplicated between the two, and collections such
//! as IP addresses arrive as objects keyed by value. This crate rewrites
//! those responses into a uniform tree and binds them to typed models:
//!
//! ```text
//! bytes → json tree → normalize(tree) → ListContactsResult / GetContactResult
//! ```
//!
//! # Quick start
//!
//! Parsing works on any byte stream, no HTTP required:
//!
//! ```rust
//! let body = br#"{
//!     "total": 1,
//!     "leads": [{
//!         "id": 449,
//!         "points": 18,
//!         "isPublished": true,
//!         "dateAdded": "2016-05-24T19:23:25+00:00"
//!     }]
//! }"#;
//!
//! let result = mautic::parse_list_contacts(&body[..]).expect("well-formed response");
//! assert_eq!(result.total, 1);
//! assert_eq!(result.contacts[0].id, 449);
//! ```
//!
//! Against a live instance, configure an OAuth2 transport and use the
//! endpoint wrappers:
//!
//! ```rust,no_run
//! use mautic::{MauticApi, oauth2::OAuth2Service};
//!
//! let service = OAuth2Service::new(
//!     "https://mautic.example.com",
//!     "api-key",
//!     "api-secret",
//! )
//! .with_access_token("stored-access-token");
//!
//! let api = MauticApi::new(service);
//! let contacts = api.list_contacts().expect("request failed");
//! println!("{} contacts", contacts.total);
//! ```
//!
//! # Feature flags
//!
//! | Feature  | Default | Description |
//! |----------|---------|-------------|
//! | `oauth2` | yes     | OAuth2 transport over [`ureq`]. Enables [`oauth2::OAuth2Service`]. |

pub mod client;
pub mod datetime;
pub mod error;
pub mod normalize;
pub mod parse;
pub mod types;

#[cfg(feature = "oauth2")]
pub mod oauth2;

pub use client::{ApiRequest, ContactSearch, MauticApi, Method, OauthService};
pub use error::*;
pub use types::*;

// Re-export entry-point functions at the crate root for convenience.
pub use parse::{parse_get_contact, parse_list_contacts};
