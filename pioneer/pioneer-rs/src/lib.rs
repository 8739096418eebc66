//! # Pioneer-rs
//!
//! The core of the Pioneer governance front-end: chain access offloaded to a worker behind a typed
//! message channel, and the multi-step bounty creation wizard driving a signed extrinsic.
//!
//! ## Modules
//!
//! ### `pioneer_primitives`
//!
//! Defines the API identifiers, correlation ids, bounty and member types and amount arithmetic.
//!
//! ### `pioneer_macros`
//!
//! Provides simple macros for wizard type conversions.
//!
//! ### `pioneer_proxy_api`
//!
//! The message envelopes, the channel carrying them, the worker owning the chain connection and
//! the client facade turning every call into a future or a stream.
//!
//! ### `pioneer_bounty_wizard`
//!
//! The bounty creation state machine, its step validation, the pure builders of the
//! `bounty.createBounty` call and the driver connecting it to identity and submission.

#![warn(missing_debug_implementations, missing_docs, rust_2018_idioms, unreachable_pub)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[doc(inline)]
pub use pioneer_bounty_wizard;
#[doc(inline)]
pub use pioneer_macros;
#[doc(inline)]
pub use pioneer_primitives;
#[doc(inline)]
pub use pioneer_proxy_api;

/// Easy imports of frequently used type definitions and traits.
#[doc(hidden)]
#[allow(unknown_lints, ambiguous_glob_reexports)]
pub mod prelude {
	pub use pioneer_macros::*;
	pub use pioneer_primitives::types::*;
}
