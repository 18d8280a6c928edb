//! site-frontend: the Intelliflake marketing site.
//!
//! Serves the static marketing pages and the `/api/chat` placeholder
//! endpoint the site's chat widget talks to.

pub mod handlers;
pub mod services;
pub mod startup;
