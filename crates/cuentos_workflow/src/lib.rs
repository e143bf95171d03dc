//! Stage orchestration for the cuentos story workflow.
//!
//! The [`StageController`] walks one [`Session`](cuentos_core::Session)
//! through summary, villain selection, hero selection and story generation.
//! It talks to the generation service through a
//! [`StoryService`](cuentos_client::StoryService) and to the screen through
//! two seams:
//!
//! - [`Presenter`] - status text and selectable candidate lists
//! - [`StoryModal`] - the final story surface and its audio track
//!
//! [`SelectionRegion`], [`StatusRegion`] and [`ModalController`] are the
//! reusable display state behind those seams; front ends render them.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod controller;
mod modal;
mod presentation;

pub use config::{CuentosConfig, WorkflowConfig, WorkflowConfigBuilder};
pub use controller::{
    GENERATING_SUMMARY, StageController, empty_list_status_text, transport_status_text,
};
pub use modal::{AudioElement, ModalController, StorySurface};
pub use presentation::{Presenter, SelectionRegion, StatusRegion, StoryModal, UserAction};
