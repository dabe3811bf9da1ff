//! Media launcher: audio and video sessions in their own windows.
//!
//! Decoding and output are delegated to a [`MediaBackend`]. This module owns
//! the transport state (volume, mute, the seek bar) and the lifecycle rule
//! that a session releases its player when its window closes.

use crate::error::{Result, WhiteboardError};
use crate::files::FileKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use uuid::Uuid;

/// Volume a new session starts at.
pub const DEFAULT_VOLUME: f32 = 0.5;

/// Kind of media a session plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaKind {
    Audio,
    Video,
}

impl MediaKind {
    /// File kind used for the open dialog and extension checks.
    pub fn file_kind(self) -> FileKind {
        match self {
            MediaKind::Audio => FileKind::Audio,
            MediaKind::Video => FileKind::Video,
        }
    }

    pub fn from_file_kind(kind: FileKind) -> Option<Self> {
        match kind {
            FileKind::Audio => Some(MediaKind::Audio),
            FileKind::Video => Some(MediaKind::Video),
            FileKind::Image => None,
        }
    }

    /// Initial size of the player window.
    pub fn window_size(self) -> (f32, f32) {
        match self {
            MediaKind::Audio => (400.0, 150.0),
            MediaKind::Video => (640.0, 480.0),
        }
    }
}

/// A decoder/player bound to one file.
pub trait MediaPlayer {
    fn play(&mut self);
    fn pause(&mut self);
    fn is_playing(&self) -> bool;
    fn seek(&mut self, position: Duration);
    /// Output volume in `0.0..=1.0`.
    fn set_volume(&mut self, volume: f32);
    /// Current playback position.
    fn position(&self) -> Duration;
    /// Total length, when the container reports one.
    fn duration(&self) -> Option<Duration>;
    /// Stop output and free decoder resources. Called once.
    fn release(&mut self);
}

/// Opens players for files.
pub trait MediaBackend {
    type Player: MediaPlayer;

    fn open(&mut self, path: &Path, kind: MediaKind) -> Result<Self::Player>;
}

/// Seek slider state.
///
/// While the user holds the slider, playback position updates are ignored;
/// while they don't, slider values are never turned into seeks.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SeekBar {
    /// Slider position in seconds.
    pub value: f64,
    /// Slider maximum in seconds (0 when the length is unknown).
    pub max: f64,
    scrubbing: bool,
}

impl SeekBar {
    pub fn is_scrubbing(&self) -> bool {
        self.scrubbing
    }
}

/// One opened media file and its transport state.
pub struct MediaSession<P: MediaPlayer> {
    id: Uuid,
    kind: MediaKind,
    path: PathBuf,
    title: String,
    player: P,
    volume: f32,
    muted: bool,
    seek: SeekBar,
    released: bool,
}

impl<P: MediaPlayer> MediaSession<P> {
    fn new(path: PathBuf, kind: MediaKind, mut player: P) -> Self {
        let title = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        player.set_volume(DEFAULT_VOLUME);
        let max = player.duration().map_or(0.0, |d| d.as_secs_f64());
        Self {
            id: Uuid::new_v4(),
            kind,
            path,
            title,
            player,
            volume: DEFAULT_VOLUME,
            muted: false,
            seek: SeekBar {
                value: 0.0,
                max,
                scrubbing: false,
            },
            released: false,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name shown in the window.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Window title, e.g. `"Now Playing: song.mp3"`.
    pub fn window_title(&self) -> String {
        format!("Now Playing: {}", self.title)
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn is_playing(&self) -> bool {
        self.player.is_playing()
    }

    pub fn seek_bar(&self) -> &SeekBar {
        &self.seek
    }

    pub fn play(&mut self) {
        self.player.play();
    }

    pub fn pause(&mut self) {
        self.player.pause();
    }

    /// Pause and rewind to the start.
    pub fn stop(&mut self) {
        self.player.pause();
        self.player.seek(Duration::ZERO);
        self.seek.value = 0.0;
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
        self.player
            .set_volume(if self.muted { 0.0 } else { self.volume });
    }

    /// Set the volume. While muted the new level applies on unmute.
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        if !self.muted {
            self.player.set_volume(self.volume);
        }
    }

    /// Pull the playback position into the seek bar.
    pub fn tick(&mut self) {
        if self.seek.max == 0.0 {
            if let Some(d) = self.player.duration() {
                self.seek.max = d.as_secs_f64();
            }
        }
        if !self.seek.scrubbing {
            self.seek.value = self.player.position().as_secs_f64();
        }
    }

    pub fn begin_scrub(&mut self) {
        self.seek.scrubbing = true;
    }

    /// Move the slider; seeks only while a scrub is in progress.
    pub fn scrub(&mut self, seconds: f64) {
        if !self.seek.scrubbing {
            return;
        }
        let seconds = if self.seek.max > 0.0 {
            seconds.clamp(0.0, self.seek.max)
        } else {
            seconds.max(0.0)
        };
        self.seek.value = seconds;
        self.player.seek(Duration::from_secs_f64(seconds));
    }

    pub fn end_scrub(&mut self) {
        self.seek.scrubbing = false;
    }

    /// Stop playback and release the player.
    pub fn close(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.player.pause();
        self.player.release();
        log::info!("Released media session {} ({})", self.id, self.title);
    }
}

impl<P: MediaPlayer> Drop for MediaSession<P> {
    fn drop(&mut self) {
        self.release();
    }
}

/// Opens media files and tracks one session per window.
///
/// Sessions coexist; opening a second file does not close the first.
pub struct MediaLauncher<B: MediaBackend> {
    backend: B,
    sessions: Vec<MediaSession<B::Player>>,
}

impl<B: MediaBackend> MediaLauncher<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            sessions: Vec::new(),
        }
    }

    /// Open `path` as `kind` and return the new session's id.
    ///
    /// Unsupported extensions and any backend failure are reported as
    /// [`WhiteboardError::Decode`].
    pub fn open(&mut self, path: impl Into<PathBuf>, kind: MediaKind) -> Result<Uuid> {
        let path = path.into();
        if !kind.file_kind().accepts(&path) {
            return Err(WhiteboardError::decode(&path, "unsupported file type"));
        }
        let player = self.backend.open(&path, kind).map_err(|err| match err {
            WhiteboardError::Decode { .. } => err,
            other => WhiteboardError::decode(&path, other),
        })?;
        let session = MediaSession::new(path, kind, player);
        let id = session.id();
        log::info!("Opened {:?} session {} for {}", kind, id, session.path().display());
        self.sessions.push(session);
        Ok(id)
    }

    pub fn sessions(&self) -> &[MediaSession<B::Player>] {
        &self.sessions
    }

    pub fn sessions_mut(&mut self) -> &mut [MediaSession<B::Player>] {
        &mut self.sessions
    }

    pub fn get(&self, id: Uuid) -> Option<&MediaSession<B::Player>> {
        self.sessions.iter().find(|s| s.id() == id)
    }

    pub fn get_mut(&mut self, id: Uuid) -> Option<&mut MediaSession<B::Player>> {
        self.sessions.iter_mut().find(|s| s.id() == id)
    }

    /// Close the window for `id`, releasing its player. Returns false for unknown ids.
    pub fn close(&mut self, id: Uuid) -> bool {
        match self.sessions.iter().position(|s| s.id() == id) {
            Some(index) => {
                self.sessions.remove(index).close();
                true
            }
            None => false,
        }
    }

    /// Close every session.
    pub fn close_all(&mut self) {
        for session in self.sessions.drain(..) {
            session.close();
        }
    }

    /// Refresh the seek bars of all sessions.
    pub fn tick(&mut self) {
        for session in &mut self.sessions {
            session.tick();
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// Format a playback time as `MM:SS`.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds as u64
    } else {
        0
    };
    format!("{:02}:{:02}", total / 60, total % 60)
}
