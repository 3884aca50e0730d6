//! Background audio player controller
//!
//! Transport semantics over a single [`AudioElement`]: play/pause, stop,
//! volume and end-of-track, plus the track title shown in the player panel.
//! Playback is always user-initiated; loading a source never starts it.

use crate::page::{PlayLabel, TITLE_PLACEHOLDER, UiPort};
use anyhow::Result;
use tracing::{debug, warn};

#[cfg(test)]
use mockall::automock;

/// The one audio output the portal drives
#[cfg_attr(test, automock)]
pub trait AudioElement {
    /// Point the element at a new source; playback stays paused
    fn set_src(&mut self, src: &str);

    /// Drop the source; a playing element stops
    fn clear_src(&mut self);

    fn has_src(&self) -> bool;

    fn is_paused(&self) -> bool;

    /// Start or resume playback from the current position
    fn play(&mut self) -> Result<()>;

    fn pause(&mut self);

    /// Move the position back to zero
    fn rewind(&mut self);

    /// Volume in 0.0..=1.0
    fn set_volume(&mut self, volume: f32);

    /// Returns true once when the track finished on its own
    fn poll_ended(&mut self) -> bool;
}

impl<A: AudioElement + ?Sized> AudioElement for Box<A> {
    fn set_src(&mut self, src: &str) {
        (**self).set_src(src)
    }

    fn clear_src(&mut self) {
        (**self).clear_src()
    }

    fn has_src(&self) -> bool {
        (**self).has_src()
    }

    fn is_paused(&self) -> bool {
        (**self).is_paused()
    }

    fn play(&mut self) -> Result<()> {
        (**self).play()
    }

    fn pause(&mut self) {
        (**self).pause()
    }

    fn rewind(&mut self) {
        (**self).rewind()
    }

    fn set_volume(&mut self, volume: f32) {
        (**self).set_volume(volume)
    }

    fn poll_ended(&mut self) -> bool {
        (**self).poll_ended()
    }
}

/// Derive a display title from a track URL
///
/// Last path segment, extension stripped, runs of `-`/`_` collapsed to one
/// space, trimmed. Returns `None` when nothing is left.
pub fn track_title(src: &str) -> Option<String> {
    let file = src.rsplit('/').next().unwrap_or(src);

    let stem = match file.rfind('.') {
        Some(idx) if idx + 1 < file.len() => &file[..idx],
        _ => file,
    };

    let mut title = String::with_capacity(stem.len());
    let mut in_separator = false;
    for c in stem.chars() {
        if c == '-' || c == '_' {
            if !in_separator {
                title.push(' ');
                in_separator = true;
            }
        } else {
            title.push(c);
            in_separator = false;
        }
    }

    let title = title.trim();
    if title.is_empty() {
        None
    } else {
        Some(title.to_string())
    }
}

/// Player controller bound to one audio element
pub struct AudioPlayer<A: AudioElement> {
    audio: A,
    volume: f32,
}

impl<A: AudioElement> AudioPlayer<A> {
    pub fn new(mut audio: A, volume: f32) -> Self {
        let volume = volume.clamp(0.0, 1.0);
        audio.set_volume(volume);
        Self { audio, volume }
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn is_playing(&self) -> bool {
        self.audio.has_src() && !self.audio.is_paused()
    }

    /// Make `src` the current source and show its title, without playing
    pub fn load<P: UiPort + ?Sized>(&mut self, port: &mut P, src: &str) {
        self.audio.set_src(src);
        let title = track_title(src);
        port.set_track_title(title.as_deref().unwrap_or(TITLE_PLACEHOLDER));
        port.set_play_label(PlayLabel::Play);
    }

    /// Drop the source and title
    pub fn unload<P: UiPort + ?Sized>(&mut self, port: &mut P) {
        self.audio.clear_src();
        port.set_track_title(TITLE_PLACEHOLDER);
        port.set_play_label(PlayLabel::Play);
    }

    /// Pause and drop the source
    pub fn halt<P: UiPort + ?Sized>(&mut self, port: &mut P) {
        self.audio.pause();
        self.unload(port);
    }

    pub fn play_pause<P: UiPort + ?Sized>(&mut self, port: &mut P) {
        if !self.audio.has_src() {
            debug!("play/pause ignored: no source");
            return;
        }

        if self.audio.is_paused() {
            if let Err(e) = self.audio.play() {
                warn!("Audio play failed: {e:#}");
            }
            port.set_play_label(PlayLabel::Pause);
        } else {
            self.audio.pause();
            port.set_play_label(PlayLabel::Play);
        }
    }

    pub fn stop<P: UiPort + ?Sized>(&mut self, port: &mut P) {
        if !self.audio.has_src() {
            debug!("stop ignored: no source");
            return;
        }
        self.audio.pause();
        self.audio.rewind();
        port.set_play_label(PlayLabel::Play);
    }

    /// Apply a slider value; clamped to 0.0..=1.0
    pub fn set_volume<P: UiPort + ?Sized>(&mut self, port: &mut P, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        self.audio.set_volume(self.volume);
        port.set_volume_display(self.volume);
    }

    /// Reset the control when the track ended on its own
    pub fn poll<P: UiPort + ?Sized>(&mut self, port: &mut P) {
        if self.audio.poll_ended() {
            debug!("track ended");
            port.set_play_label(PlayLabel::Play);
        }
    }
}
