//! rodio-backed media players.
//!
//! Video containers are demuxed by symphonia and only their audio track is
//! played; the window shows a placeholder display surface instead of frames.

use inkslate_core::{MediaBackend, MediaKind, MediaPlayer, Result, WhiteboardError};
use rodio::{Decoder, OutputStream, Sink, Source};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

fn open_source(path: &Path) -> Result<Decoder<BufReader<File>>> {
    let file = File::open(path).map_err(|e| WhiteboardError::decode(path, e))?;
    Decoder::new(BufReader::new(file)).map_err(|e| WhiteboardError::decode(path, e))
}

/// Opens files on the default audio output device.
#[derive(Debug, Default)]
pub struct RodioBackend;

impl MediaBackend for RodioBackend {
    type Player = RodioPlayer;

    fn open(&mut self, path: &Path, kind: MediaKind) -> Result<RodioPlayer> {
        let source = open_source(path)?;
        let duration = source.total_duration();
        let (stream, handle) =
            OutputStream::try_default().map_err(|e| WhiteboardError::decode(path, e))?;
        let sink = Sink::try_new(&handle).map_err(|e| WhiteboardError::decode(path, e))?;
        sink.pause();
        sink.append(source);
        log::debug!("Opened {:?} player for {} ({:?})", kind, path.display(), duration);
        Ok(RodioPlayer {
            _stream: stream,
            sink,
            path: path.to_path_buf(),
            duration,
        })
    }
}

/// One sink on its own output stream.
pub struct RodioPlayer {
    // Dropping the stream silences the sink.
    _stream: OutputStream,
    sink: Sink,
    path: PathBuf,
    duration: Option<Duration>,
}

impl RodioPlayer {
    /// Queue the file again once it has played to the end.
    fn reload_if_finished(&mut self) {
        if !self.sink.empty() {
            return;
        }
        match open_source(&self.path) {
            Ok(source) => self.sink.append(source),
            Err(e) => log::error!("{e}"),
        }
    }
}

impl MediaPlayer for RodioPlayer {
    fn play(&mut self) {
        self.reload_if_finished();
        self.sink.play();
    }

    fn pause(&mut self) {
        self.sink.pause();
    }

    fn is_playing(&self) -> bool {
        !self.sink.is_paused() && !self.sink.empty()
    }

    fn seek(&mut self, position: Duration) {
        self.reload_if_finished();
        if let Err(e) = self.sink.try_seek(position) {
            log::warn!("Seek to {:?} in {} failed: {e}", position, self.path.display());
        }
    }

    fn set_volume(&mut self, volume: f32) {
        self.sink.set_volume(volume);
    }

    fn position(&self) -> Duration {
        if self.sink.empty() {
            return self.duration.unwrap_or_default();
        }
        self.sink.get_pos()
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }

    fn release(&mut self) {
        self.sink.stop();
        self.sink.clear();
    }
}
