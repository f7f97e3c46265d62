/// The interactive viewing session
///
/// Owns the loaded catalog, the cursor, the display cache and the output
/// directory. Commands are handled one at a time, each to completion,
/// including any marker side effects.

use super::catalog::Catalog;
use super::chosen::ChosenDir;
use super::cursor::Cursor;
use super::data::ImageRecord;
use super::review::{self, Transition};
use crate::gpu::{DisplayCache, DisplaySink, Rect};

/// Abstract input commands, independent of key bindings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    NavigateNext,
    NavigatePrevious,
    MarkAccepted,
    MarkRejectedOrToggle,
    Quit,
}

/// Whether the event loop should keep going after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct ViewerSession<B> {
    catalog: Catalog,
    cursor: Cursor,
    display: DisplayCache<B>,
    chosen: ChosenDir,
}

impl<B> ViewerSession<B> {
    pub fn new(catalog: Catalog, chosen: ChosenDir) -> Self {
        let cursor = Cursor::new(catalog.non_zero_len());
        Self {
            catalog,
            cursor,
            display: DisplayCache::new(),
            chosen,
        }
    }

    pub fn handle(&mut self, command: Command) -> Flow {
        match command {
            Command::NavigateNext => {
                self.cursor.next();
            }
            Command::NavigatePrevious => {
                self.cursor.previous();
            }
            Command::MarkAccepted | Command::MarkRejectedOrToggle => {
                self.classify(command);
            }
            Command::Quit => return Flow::Quit,
        }

        self.log_viewing();
        Flow::Continue
    }

    fn classify(&mut self, command: Command) {
        let index = self.cursor.index();
        let Some(record) = self.catalog.get_mut(index) else {
            return;
        };

        let transition = if command == Command::MarkAccepted {
            review::mark_accepted(record, &self.chosen)
        } else {
            review::mark_rejected_or_toggle(record, &self.chosen)
        };

        if let Some(e) = transition.persist_error() {
            tracing::warn!(
                file = %record.filename,
                state = transition.state().label(),
                "⚠️  Marker update failed, state kept: {}",
                e
            );
        } else if let Transition::Changed { from, to, .. } = transition {
            tracing::debug!(file = %record.filename, from = from.label(), to = to.label(), "Review state changed");
        }
    }

    /// Draw the active record into `sink`
    pub fn present<S>(&mut self, sink: &mut S) -> Option<Rect>
    where
        S: DisplaySink<Buffer = B>,
    {
        let record = self.catalog.get(self.cursor.index())?;
        self.display.present(record, sink)
    }

    /// Release the display buffer and every decoded image
    pub fn shutdown<S>(&mut self, sink: &mut S)
    where
        S: DisplaySink<Buffer = B>,
    {
        let (accepted, rejected, neutral) = self.catalog.review_counts();
        tracing::info!(accepted, rejected, neutral, "📊 Session summary");

        self.display.release(sink);
        let released = self.catalog.release_pixels();
        tracing::debug!(released, "Released image buffers");
    }

    pub fn active(&self) -> Option<&ImageRecord> {
        self.catalog.get(self.cursor.index())
    }

    pub fn cursor(&self) -> usize {
        self.cursor.index()
    }

    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[cfg(test)]
    pub fn chosen(&self) -> &ChosenDir {
        &self.chosen
    }

    /// "[i/N] filename" for logs and the window title
    pub fn status_line(&self) -> String {
        match self.active() {
            Some(record) => format!("[{}/{}] {}", self.cursor() + 1, self.len(), record.filename),
            None => String::new(),
        }
    }

    /// Status line followed by size and channel count, or the decode error
    pub fn detail_line(&self) -> String {
        let Some(record) = self.active() else {
            return String::new();
        };
        match record.failure() {
            Some(reason) => format!("{}  failed to load: {}", self.status_line(), reason),
            None => format!(
                "{}  {}x{}  {}ch  {}",
                self.status_line(),
                record.width,
                record.height,
                record.channels,
                record.review.label()
            ),
        }
    }

    fn log_viewing(&self) {
        let Some(record) = self.active() else {
            return;
        };
        match record.failure() {
            Some(reason) => tracing::info!(
                "[{}/{}] Viewing: {} [{}] (failed to load: {})",
                self.cursor() + 1,
                self.len(),
                record.filename,
                record.review.label(),
                reason
            ),
            None => tracing::info!(
                "[{}/{}] Viewing: {} [{}]",
                self.cursor() + 1,
                self.len(),
                record.filename,
                record.review.label()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::bulk::{load_all, LoadProgress};
    use crate::gpu::cache::tests::RecordingSink;
    use crate::state::data::ReviewState;
    use image::{Rgb, RgbImage};
    use std::collections::BTreeSet;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_image(dir: &Path, name: &str, width: u32, height: u32) {
        RgbImage::from_pixel(width, height, Rgb([200, 100, 50]))
            .save(dir.join(name))
            .unwrap();
    }

    async fn session_for(dir: &Path) -> ViewerSession<u32> {
        let chosen = ChosenDir::open(dir, "chosen").unwrap();
        let mut catalog = Catalog::scan(dir).unwrap();
        catalog.recover(&chosen);
        load_all(&mut catalog, &LoadProgress::default()).await;
        ViewerSession::new(catalog, chosen)
    }

    fn assert_markers_match_accepted<B>(session: &ViewerSession<B>) {
        let markers = session.chosen().markers().unwrap();
        let accepted: BTreeSet<String> = session
            .catalog()
            .records()
            .iter()
            .filter(|r| r.review == ReviewState::Accepted)
            .map(|r| r.filename.clone())
            .collect();
        assert_eq!(markers, accepted);
    }

    #[tokio::test]
    async fn test_failed_record_presents_nothing() {
        let dir = TempDir::new().unwrap();
        write_image(dir.path(), "a.jpg", 40, 30);
        fs::write(dir.path().join("b.png"), b"corrupt").unwrap();
        write_image(dir.path(), "c.bmp", 30, 40);

        let mut session = session_for(dir.path()).await;
        let mut sink = RecordingSink::new(1280, 720);
        assert_eq!(session.len(), 3);

        session.handle(Command::NavigateNext);
        assert_eq!(session.cursor(), 1);
        assert!(session.active().unwrap().is_failed());

        session.handle(Command::MarkRejectedOrToggle);
        assert_eq!(session.present(&mut sink), None);
        assert_eq!(sink.created, 0);
        assert!(sink.borders.is_empty());

        session.handle(Command::NavigateNext);
        assert!(session.present(&mut sink).is_some());
        assert_eq!(sink.created, 1);
    }

    #[tokio::test]
    async fn test_detail_line_shows_size_or_failure() {
        let dir = TempDir::new().unwrap();
        write_image(dir.path(), "a.png", 40, 30);
        fs::write(dir.path().join("b.png"), b"corrupt").unwrap();

        let mut session = session_for(dir.path()).await;
        assert_eq!(session.detail_line(), "[1/2] a.png  40x30  3ch  neutral");

        session.handle(Command::NavigateNext);
        let reason = session.active().unwrap().failure().unwrap().to_string();
        assert!(!reason.is_empty());
        assert_eq!(
            session.detail_line(),
            format!("[2/2] b.png  failed to load: {}", reason)
        );
    }

    #[tokio::test]
    async fn test_navigation_wraps_both_ways() {
        let dir = TempDir::new().unwrap();
        for name in ["a.png", "b.png", "c.png", "d.png"] {
            write_image(dir.path(), name, 2, 2);
        }
        let mut session = session_for(dir.path()).await;

        session.handle(Command::NavigatePrevious);
        assert_eq!(session.cursor(), 3);
        for _ in 0..4 {
            session.handle(Command::NavigateNext);
        }
        assert_eq!(session.cursor(), 3);
        assert_eq!(session.status_line(), "[4/4] d.png");
    }

    #[tokio::test]
    async fn test_markers_track_accepted_set() {
        let dir = TempDir::new().unwrap();
        for name in ["a.png", "b.png", "c.png"] {
            write_image(dir.path(), name, 2, 2);
        }
        let mut session = session_for(dir.path()).await;

        let script = [
            Command::MarkAccepted,
            Command::NavigateNext,
            Command::MarkAccepted,
            Command::MarkAccepted,
            Command::NavigateNext,
            Command::MarkRejectedOrToggle,
            Command::NavigatePrevious,
            Command::MarkRejectedOrToggle,
            Command::MarkRejectedOrToggle,
            Command::NavigatePrevious,
            Command::MarkAccepted,
        ];
        for command in script {
            assert_eq!(session.handle(command), Flow::Continue);
            assert_markers_match_accepted(&session);
        }

        let states: Vec<ReviewState> = session.catalog().records().iter().map(|r| r.review).collect();
        assert_eq!(
            states,
            [ReviewState::Accepted, ReviewState::Rejected, ReviewState::Rejected]
        );
    }

    #[tokio::test]
    async fn test_accept_then_toggle_leaves_no_marker() {
        let dir = TempDir::new().unwrap();
        write_image(dir.path(), "a.jpg", 4, 4);
        let mut session = session_for(dir.path()).await;
        let marker = session.chosen().marker_path("a.jpg");

        session.handle(Command::MarkAccepted);
        let source = session.active().unwrap().path.clone();
        assert_eq!(fs::read_link(&marker).unwrap(), source);

        session.handle(Command::MarkRejectedOrToggle);
        assert_eq!(session.active().unwrap().review, ReviewState::Neutral);
        assert!(fs::symlink_metadata(&marker).is_err());
    }

    #[tokio::test]
    async fn test_previous_session_is_recovered() {
        let dir = TempDir::new().unwrap();
        write_image(dir.path(), "a.png", 2, 2);
        write_image(dir.path(), "b.png", 2, 2);

        {
            let mut session = session_for(dir.path()).await;
            session.handle(Command::NavigateNext);
            session.handle(Command::MarkAccepted);
        }

        let session = session_for(dir.path()).await;
        assert_eq!(session.catalog().records()[1].review, ReviewState::Accepted);
        assert_markers_match_accepted(&session);
    }

    #[tokio::test]
    async fn test_quit_and_shutdown_release_everything() {
        let dir = TempDir::new().unwrap();
        write_image(dir.path(), "a.png", 2, 2);
        let mut session = session_for(dir.path()).await;
        let mut sink = RecordingSink::new(10, 10);

        session.present(&mut sink);
        assert_eq!(session.handle(Command::Quit), Flow::Quit);

        session.shutdown(&mut sink);
        assert!(sink.live.is_empty());
        assert!(session.catalog().records().iter().all(|r| r.pixels().is_none()));
    }
}
