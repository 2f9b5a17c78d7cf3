//! Service plumbing: HTTP surface.

pub mod http;
