use crate::draw::messages::{CaptureToSession, ExitReason, SessionToRender};
use crate::draw::session::DrawingSession;
use crate::settings::WhiteboardSettings;
use anyhow::{Context, Result};
use std::sync::mpsc::{channel, sync_channel, Receiver, Sender, SyncSender};
use std::thread::{self, JoinHandle};

/// Capture side may run at most one frame ahead of the session.
pub const CAPTURE_QUEUE_DEPTH: usize = 1;

pub struct SessionHandles {
    pub session_thread_handle: JoinHandle<()>,
    pub capture_tx: SyncSender<CaptureToSession>,
    pub render_rx: Receiver<SessionToRender>,
}

/// Drives a [`DrawingSession`] from a capture channel. The controller is the
/// only writer of the session's live state.
pub struct SessionController {
    session: DrawingSession,
    capture_rx: Receiver<CaptureToSession>,
    render_tx: Sender<SessionToRender>,
}

impl SessionController {
    pub fn new(
        session: DrawingSession,
        capture_rx: Receiver<CaptureToSession>,
        render_tx: Sender<SessionToRender>,
    ) -> Self {
        Self {
            session,
            capture_rx,
            render_tx,
        }
    }

    pub fn session(&self) -> &DrawingSession {
        &self.session
    }

    /// Handles one message. Returns the exit reason once the loop must stop.
    pub fn handle(&mut self, message: CaptureToSession) -> Option<ExitReason> {
        match message {
            CaptureToSession::Frame(input) => {
                let output = self.session.frame(&input);
                let exit = output.exit_requested();
                if self.render_tx.send(SessionToRender::Frame(output)).is_err() {
                    return Some(ExitReason::RenderDisconnected);
                }
                exit.then_some(ExitReason::UserRequest)
            }
            CaptureToSession::SetBackground { enabled, opacity } => {
                let panel = self.session.panel_mut();
                panel.background_enabled = enabled;
                panel.set_background_opacity(opacity);
                None
            }
            CaptureToSession::Shutdown => Some(ExitReason::UserRequest),
        }
    }

    pub fn run(mut self) -> ExitReason {
        let reason = loop {
            match self.capture_rx.recv() {
                Ok(message) => {
                    if let Some(reason) = self.handle(message) {
                        break reason;
                    }
                }
                Err(_) => break ExitReason::CaptureDisconnected,
            }
        };
        tracing::debug!(
            ?reason,
            history_len = self.session.history().len(),
            "whiteboard session loop finished"
        );
        let _ = self.render_tx.send(SessionToRender::Exited { reason });
        reason
    }
}

pub fn spawn_session(settings: &WhiteboardSettings) -> Result<SessionHandles> {
    let (capture_tx, capture_rx) = sync_channel::<CaptureToSession>(CAPTURE_QUEUE_DEPTH);
    let (render_tx, render_rx) = channel::<SessionToRender>();
    let session = DrawingSession::new(settings);

    let session_thread_handle = thread::Builder::new()
        .name("whiteboard-session".to_owned())
        .spawn(move || {
            let reason = SessionController::new(session, capture_rx, render_tx).run();
            if reason != ExitReason::UserRequest {
                tracing::warn!(?reason, "whiteboard session ended without a user request");
            }
        })
        .context("spawn whiteboard session thread")?;

    Ok(SessionHandles {
        session_thread_handle,
        capture_tx,
        render_rx,
    })
}
