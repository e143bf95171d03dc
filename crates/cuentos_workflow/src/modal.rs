//! The story surface and its audio element.

use crate::StoryModal;
use cuentos_core::AudioRef;
use tracing::{debug, info};

/// Fixed display surface for the finished story.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorySurface {
    text: String,
    visible: bool,
}

impl StorySurface {
    /// Story text currently written to the surface.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the surface is shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// An audio element with a replaceable source.
///
/// Changing the source does nothing on its own; [`AudioElement::load`] must
/// run before the new source is the one that plays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AudioElement {
    source: Option<AudioRef>,
    loaded: Option<AudioRef>,
    loads: u32,
}

impl AudioElement {
    /// Point the element at a new source.
    pub fn set_source(&mut self, source: AudioRef) {
        self.source = Some(source);
    }

    /// Reload from the current source.
    pub fn load(&mut self) {
        self.loaded = self.source.clone();
        self.loads += 1;
        debug!(source = ?self.loaded.as_ref().map(AudioRef::as_str), "Audio reloaded");
    }

    /// Configured source reference.
    pub fn source(&self) -> Option<&AudioRef> {
        self.source.as_ref()
    }

    /// Source in effect since the last load.
    pub fn loaded_source(&self) -> Option<&AudioRef> {
        self.loaded.as_ref()
    }

    /// How many times the element has been reloaded.
    pub fn load_count(&self) -> u32 {
        self.loads
    }
}

/// Displays the final story and binds its audio track.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalController {
    surface: StorySurface,
    audio: AudioElement,
}

impl ModalController {
    /// Story surface.
    pub fn surface(&self) -> &StorySurface {
        &self.surface
    }

    /// Bound audio element.
    pub fn audio(&self) -> &AudioElement {
        &self.audio
    }

    /// Whether the story surface is shown.
    pub fn is_visible(&self) -> bool {
        self.surface.visible
    }
}

impl StoryModal for ModalController {
    fn present(&mut self, story: &str, audio: &AudioRef) {
        info!(len = story.len(), audio = %audio, "Presenting story");
        self.surface.text = story.to_string();
        self.surface.visible = true;
        self.audio.set_source(audio.clone());
        self.audio.load();
    }

    fn dismiss(&mut self) {
        debug!("Dismissing story surface");
        self.surface.visible = false;
    }
}
