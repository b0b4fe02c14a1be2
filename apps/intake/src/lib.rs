//! Upload form coordinator for the job-description analysis page.
//!
//! Keeps each upload slot's primary and fallback file inputs in lockstep,
//! accepts PDF drag-and-drop, and gates submission on every slot having a
//! file or pasted text. Element handles and the notification channel are
//! injected, so the coordinator runs without a live document.

pub mod config;
pub mod errors;
pub mod replay;
pub mod upload;
