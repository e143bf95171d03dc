//! Core data types for the cuentos story workflow.
//!
//! This crate holds everything the stage controller reasons about without
//! touching the network or a screen:
//!
//! - [`Stage`] - the fixed, forward-only workflow ordering
//! - [`Session`] - accumulated selections for one workflow run
//! - [`CandidateList`] - an ephemeral, line-split list of villains or heroes
//! - wire types ([`VillainsRequest`], [`StageReply`], ...) for the generation service

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod audio;
mod candidate;
mod failure;
mod session;
mod stage;
mod wire;

pub use audio::{AudioRef, DEFAULT_AUDIO_TRACK};
pub use candidate::{Candidate, CandidateFilter, CandidateKind, CandidateList, parse_candidates};
pub use failure::{FailureOrigin, StageFailure};
pub use session::{Session, StoryInputs};
pub use stage::Stage;
pub use wire::{
    Endpoint, HeroesRequest, ScrapeRequest, StageReply, StoryRequest, SummaryRequest,
    VillainsRequest,
};
