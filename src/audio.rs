//! Audio element backed by rodio
//!
//! [`RodioAudio`] reads the soundtrack (a local file, or an http(s) URL fetched
//! into memory), decodes it and plays it on the default output device. The
//! output stream is opened on first play, so a portal that never plays audio
//! never touches the sound card.

use crate::catalog::CatalogSource;
use crate::player::AudioElement;
use anyhow::{anyhow, Context, Result};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use std::fs;
use std::io::{Cursor, Read};
use std::time::Duration;
use tracing::{debug, warn};

/// Read the whole soundtrack into memory
fn read_source(src: &str) -> Result<Vec<u8>> {
    match CatalogSource::parse(src) {
        CatalogSource::Path(path) => fs::read(&path)
            .with_context(|| format!("Failed to read soundtrack: {}", path.display())),
        CatalogSource::Url(url) => {
            let response = ureq::get(&url)
                .call()
                .with_context(|| format!("Failed to fetch soundtrack: {url}"))?;
            let mut bytes = Vec::new();
            response
                .into_reader()
                .read_to_end(&mut bytes)
                .with_context(|| format!("Failed to download soundtrack: {url}"))?;
            Ok(bytes)
        }
    }
}

/// Audio element playing through rodio
pub struct RodioAudio {
    src: Option<String>,
    volume: f32,
    /// Decoded track queued on the output; rebuilt after it runs out
    sink: Option<Sink>,
    /// Kept alive for as long as any sink plays on it
    output: Option<(OutputStream, OutputStreamHandle)>,
}

impl Default for RodioAudio {
    fn default() -> Self {
        Self::new()
    }
}

impl RodioAudio {
    pub fn new() -> Self {
        Self {
            src: None,
            volume: 1.0,
            sink: None,
            output: None,
        }
    }

    /// Decode the current source into a fresh, paused sink
    fn build_sink(&mut self) -> Result<()> {
        let src = self.src.as_deref().ok_or_else(|| anyhow!("no source"))?;
        let bytes = read_source(src)?;
        let decoder = Decoder::new(Cursor::new(bytes))
            .with_context(|| format!("Failed to decode soundtrack: {src}"))?;

        if self.output.is_none() {
            let output = OutputStream::try_default().context("Failed to open audio output")?;
            debug!("audio output opened");
            self.output = Some(output);
        }
        let (_, handle) = self
            .output
            .as_ref()
            .ok_or_else(|| anyhow!("no audio output"))?;

        let sink = Sink::try_new(handle).context("Failed to create audio sink")?;
        sink.pause();
        sink.set_volume(self.volume);
        sink.append(decoder);
        self.sink = Some(sink);
        Ok(())
    }
}

impl AudioElement for RodioAudio {
    fn set_src(&mut self, src: &str) {
        self.sink = None;
        self.src = Some(src.to_string());
    }

    fn clear_src(&mut self) {
        self.sink = None;
        self.src = None;
    }

    fn has_src(&self) -> bool {
        self.src.is_some()
    }

    fn is_paused(&self) -> bool {
        self.sink
            .as_ref()
            .is_none_or(|sink| sink.is_paused() || sink.empty())
    }

    fn play(&mut self) -> Result<()> {
        if self.src.is_none() {
            return Err(anyhow!("no source"));
        }
        if self.sink.as_ref().is_none_or(|sink| sink.empty()) {
            self.build_sink()?;
        }
        if let Some(sink) = &self.sink {
            sink.play();
        }
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(sink) = &self.sink {
            sink.pause();
        }
    }

    fn rewind(&mut self) {
        let Some(sink) = &self.sink else {
            return;
        };
        if let Err(e) = sink.try_seek(Duration::ZERO) {
            // Next play decodes again from the start
            warn!("Audio seek failed: {e}");
            self.sink = None;
        }
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        if let Some(sink) = &self.sink {
            sink.set_volume(self.volume);
        }
    }

    fn poll_ended(&mut self) -> bool {
        let ended = self
            .sink
            .as_ref()
            .is_some_and(|sink| !sink.is_paused() && sink.empty());
        if ended {
            debug!("soundtrack finished");
            self.sink = None;
        }
        ended
    }
}

/// State-only audio element for controller tests
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct SilentAudio {
    src: Option<String>,
    paused: bool,
    volume: f32,
}

#[cfg(test)]
impl SilentAudio {
    pub fn new() -> Self {
        Self {
            src: None,
            paused: true,
            volume: 1.0,
        }
    }

    pub fn src(&self) -> Option<&str> {
        self.src.as_deref()
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }
}

#[cfg(test)]
impl AudioElement for SilentAudio {
    fn set_src(&mut self, src: &str) {
        self.src = Some(src.to_string());
        self.paused = true;
    }

    fn clear_src(&mut self) {
        self.src = None;
        self.paused = true;
    }

    fn has_src(&self) -> bool {
        self.src.is_some()
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn play(&mut self) -> Result<()> {
        if self.src.is_none() {
            return Err(anyhow!("no source"));
        }
        self.paused = false;
        Ok(())
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn rewind(&mut self) {}

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    fn poll_ended(&mut self) -> bool {
        false
    }
}
