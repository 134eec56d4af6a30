//! Navigation policy for wrapped applications.
//!
//! Two pure decision layers:
//! - [`policy`] classifies a candidate URL as internal or external to the
//!   wrapped site.
//! - [`disposition`] turns navigation and new-window events into a
//!   [`DispositionDecision`] for the shell to enact.
//!
//! Nothing in this crate performs I/O or holds state; every function is
//! deterministic over its arguments.

pub mod disposition;
pub mod policy;

pub use disposition::{
    resolve_navigation, resolve_new_window, DispositionDecision, RequestedDisposition,
};
pub use policy::{is_internal, registrable_domain};
