//! `discord-profile` turns the payload of a Discord user profile fetch into a read-only snapshot.
//!
//! Every part of the payload except the base user is optional; missing parts come back as
//! `None` or empty lists. Linked accounts resolve to public URLs on their own services.
//!
//! ```
//! use discord_profile::core::profile::ProfileSnapshot;
//!
//! let snapshot = ProfileSnapshot::from_json(
//!     r#"{
//!         "user": { "id": "80351110224678912", "username": "nelly" },
//!         "connected_accounts": [
//!             { "id": "1", "name": "nelly", "type": "github", "verified": true }
//!         ]
//!     }"#,
//!     None,
//! )
//! .unwrap();
//!
//! assert_eq!(snapshot.connections()[0].hyperlink(), "[nelly](https://github.com/nelly)");
//! ```
//!
//! # Installation
//!
//! Add the following to your `Cargo.toml` file:
//!
//! ```toml
//! [dependencies]
//! discord-profile = "0.1.0"
//! ```

#![doc(html_root_url = "https://docs.rs/discord-profile/*")]
pub mod core {
    pub mod application;
    pub mod asset;
    pub mod badge;
    pub mod colour;
    pub mod config;
    pub mod connection;
    pub mod errors;
    pub mod member;
    pub mod mutual_guild;
    pub mod overlay;
    pub mod premium;
    pub mod profile;
    pub mod session;
    pub mod snowflake;
    pub mod user;
}

pub use crate::core::{
    connection::{ConnectionRecord, ServiceType},
    errors::ProfileError,
    profile::ProfileSnapshot,
    session::SessionContext,
    snowflake::Snowflake,
};
