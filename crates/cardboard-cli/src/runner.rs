//! Applies parsed script commands to a board.

use crate::script::Command;
use cardboard_core::{Board, BoardError, BoardEvent, ExportRequest, Exporter, Notice, Storage};

/// Stand-in for the document exporter: reports what would be rendered.
#[derive(Debug, Default)]
pub struct ExportLog {
    pub requests: Vec<ExportRequest>,
}

impl Exporter for ExportLog {
    fn export(&mut self, request: ExportRequest) {
        log::info!(
            "Export requested: {} ({} cards, {} connections)",
            request.file_name,
            request.snapshot.cards.len(),
            request.snapshot.connections.len()
        );
        self.requests.push(request);
    }
}

/// What happened while running a script.
#[derive(Debug, Default)]
pub struct RunReport {
    pub notices: Vec<Notice>,
    /// Failed commands with their line numbers.
    pub failures: Vec<(usize, BoardError)>,
    pub exports: Vec<ExportRequest>,
}

/// Run every command in order. A failing command is recorded and the
/// script carries on, the same way a user keeps clicking after a toast.
pub fn run_commands<S: Storage>(board: &mut Board<S>, commands: &[(usize, Command)]) -> RunReport {
    let mut report = RunReport::default();
    let mut exporter = ExportLog::default();

    for (line, command) in commands {
        if let Err(e) = apply(board, command, &mut exporter) {
            log::warn!("line {}: {}", line, e);
            report.failures.push((*line, e));
        }
        for event in board.drain_events() {
            if let BoardEvent::Notice(notice) = event {
                report.notices.push(notice);
            }
        }
    }

    report.exports = exporter.requests;
    report
}

fn apply<S: Storage>(board: &mut Board<S>, command: &Command, exporter: &mut ExportLog) -> Result<(), BoardError> {
    match command {
        Command::Create(card_type) => {
            let id = board.create_card(*card_type);
            log::debug!("Script created {}", id);
        }
        Command::Move { id, to } => {
            board.move_card(id, *to)?;
        }
        Command::Resize { id, size } => board.resize_card(id, *size)?,
        Command::Edit { id, text } => {
            board.edit_text(id, text.clone())?;
        }
        Command::Progress { id, value } => {
            board.set_progress(id, *value)?;
        }
        Command::Delete(id) => {
            board.delete_card(id)?;
        }
        Command::Connect(id) => {
            board.toggle_connect_target(id)?;
        }
        Command::CancelConnect => board.cancel_connect(),
        Command::Link { from, to } => board.create_connection(from.clone(), to.clone())?,
        Command::Unlink(index) => {
            board.remove_connection(*index)?;
        }
        Command::Undo => board.undo()?,
        Command::Redo => board.redo()?,
        Command::Save => board.save()?,
        Command::Load => board.load()?,
        Command::Export => board.export(exporter),
    }
    Ok(())
}
