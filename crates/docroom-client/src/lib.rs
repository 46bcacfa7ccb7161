//! # docroom-client
//!
//! The collaborator boundary between DocRoom and the managed backend that
//! owns link records, folder expansion, URL signing, and view accounting.
//!
//! [`DeliveryBackend`] is the seam services program against;
//! [`HttpDeliveryBackend`] is the JSON/HTTP implementation used in
//! production. Tests substitute their own implementations.

pub mod backend;
pub mod dto;
pub mod http;

pub use backend::DeliveryBackend;
pub use http::HttpDeliveryBackend;
