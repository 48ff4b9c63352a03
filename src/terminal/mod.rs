pub mod events;
pub mod state;
pub mod ui;

use color_eyre::eyre::Result;
use crossterm::event::{self, Event};
use ratatui::DefaultTerminal;
use std::path::PathBuf;

use crate::domain::history::HistoryEntry;
use crate::mail::export::ExportFormat;
use crate::mail::source::HeaderSource;
use crate::store::repo::VerdictRepository;
use crate::store::{epoch_now, record_and_prune};
use crate::terminal::events::{Action, handle_key};
use crate::terminal::state::{AppState, Panel};

/// Everything the panel needs from the outside.
pub struct TuiContext<'a> {
    pub source: &'a dyn HeaderSource,
    pub history: Option<&'a dyn VerdictRepository>,
    pub export_path: PathBuf,
    pub export_format: ExportFormat,
    pub keep_history: usize,
}

pub fn run_tui(ctx: &TuiContext) -> Result<()> {
    color_eyre::install()?;

    let terminal = ratatui::init();
    let mut state = AppState::new(ctx.source.label());
    let result = run(terminal, &mut state, ctx);

    ratatui::restore();

    result
}

fn run(mut terminal: DefaultTerminal, state: &mut AppState, ctx: &TuiContext) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, state))?;
        let Event::Key(key) = event::read()? else {
            continue;
        };
        match handle_key(key, state) {
            Action::Quit => break,
            Action::Fetch => {
                state.begin_fetch();
                terminal.draw(|f| ui::render(f, state))?;
                state.finish_fetch(ctx.source.fetch_raw_headers());
                record(state, ctx);
            }
            Action::Export => state.export_headers(&ctx.export_path, ctx.export_format),
            Action::None => {}
        }
    }
    Ok(())
}

fn record(state: &mut AppState, ctx: &TuiContext) {
    let (Some(repo), Panel::Ready { info, verdict, .. }) = (ctx.history, &state.panel) else {
        return;
    };
    let entry = HistoryEntry::new(&state.source_label, &info.subject, verdict, epoch_now());
    if let Err(e) = record_and_prune(repo, &entry, ctx.keep_history) {
        log::warn!("could not record verdict history: {e:#}");
        state.notice = Some(format!("History not saved: {e}"));
    }
}
