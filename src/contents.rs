//! Client for a remote repository's file-content API.
//!
//! Every operation composes the same three steps: build the request, send
//! it over the transport, then interpret the response.

/// Client construction settings and API constants.
pub mod config;

/// Client entry points and branch-bound handles.
pub mod client;

/// Request building for the five file operations.
pub mod request;

/// Classification and unpacking of raw responses.
pub mod response;

/// HTTP execution behind a mockable trait.
pub mod transport;

/// Wire types exchanged with the remote API.
pub mod types;
