//! Test utilities for workflow tests.
//!
//! This module provides a scripted story service and a recording presenter.

pub mod mock_service;
pub mod recording_presenter;

#[allow(unused_imports)]
pub use mock_service::{MockReply, MockStoryService};
#[allow(unused_imports)]
pub use recording_presenter::{PresenterEvent, RecordingPresenter};
