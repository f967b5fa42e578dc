//! Terminal presentation layer.
//!
//! [`App`] holds what is currently on screen (the summary table, the one
//! attached chart and any notice) and turns key presses into dashboard
//! [`Event`]s. Drawing lives in [`layout`], the event loop in [`terminal`].

pub mod layout;
pub mod terminal;

pub use terminal::run;

use crossterm::event::KeyCode;

use crate::models::{ChartKind, RenderRequest, SummaryRow};
use crate::session::Event;
use crate::SalesDashboard;

/// What a key press asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Dispatch(Event),
    Quit,
}

/// Map a key to an action given the chart currently on screen.
///
/// `s` only toggles when a sortable bar chart is showing, and toggles that
/// chart's metric.
pub fn keymap(code: KeyCode, current: Option<ChartKind>) -> Option<Action> {
    match code {
        KeyCode::Char('1') => Some(Action::Dispatch(Event::SelectView(ChartKind::Pie))),
        KeyCode::Char('2') => Some(Action::Dispatch(Event::SelectView(ChartKind::QuantityBar))),
        KeyCode::Char('3') => Some(Action::Dispatch(Event::SelectView(ChartKind::RevenueBar))),
        KeyCode::Char('4') => Some(Action::Dispatch(Event::SelectView(ChartKind::TimeSeries))),
        KeyCode::Char('s') | KeyCode::Char('S') => current
            .and_then(|kind| kind.sort_metric())
            .map(|metric| Action::Dispatch(Event::ToggleSort(metric))),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::Dispatch(Event::LoadRequested)),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A modal message. While one is showing, only Enter or Esc is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: "Error".to_string(),
            message: message.into(),
        }
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: title.into(),
            message: message.into(),
        }
    }
}

pub struct App {
    dashboard: SalesDashboard,
    chart: Option<RenderRequest>,
    summary: Vec<SummaryRow>,
    notice: Option<Notice>,
    should_quit: bool,
}

impl App {
    pub fn new(dashboard: SalesDashboard) -> Self {
        Self {
            dashboard,
            chart: None,
            summary: Vec::new(),
            notice: None,
            should_quit: false,
        }
    }

    /// Initial load of the data file.
    pub fn start(&mut self) {
        self.reload();
    }

    pub fn dashboard(&self) -> &SalesDashboard {
        &self.dashboard
    }

    /// The chart currently attached to the screen.
    pub fn chart(&self) -> Option<&RenderRequest> {
        self.chart.as_ref()
    }

    pub fn summary(&self) -> &[SummaryRow] {
        &self.summary
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn on_key(&mut self, code: KeyCode) {
        if self.notice.is_some() {
            if matches!(code, KeyCode::Enter | KeyCode::Esc) {
                self.notice = None;
            }
            return;
        }

        let current = self.chart.as_ref().map(|chart| chart.kind);
        match keymap(code, current) {
            Some(Action::Dispatch(Event::LoadRequested)) => self.reload(),
            Some(Action::Dispatch(event)) => self.dispatch(event),
            Some(Action::Quit) => self.should_quit = true,
            None => {}
        }
    }

    fn dispatch(&mut self, event: Event) {
        match self.dashboard.handle(event) {
            // The new chart replaces the old one in a single assignment
            Ok(Some(request)) => self.chart = Some(request),
            Ok(None) => {}
            Err(e) => self.notice = Some(Notice::error(e.to_string())),
        }
    }

    fn reload(&mut self) {
        match self.dashboard.handle(Event::LoadRequested) {
            Ok(request) => {
                if request.is_some() {
                    self.chart = request;
                }
                self.summary = self.dashboard.summary_table();
                if self.summary.is_empty() {
                    self.notice = Some(Notice::info("No Data", "No summary data to display."));
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load sales data");
                self.notice = Some(Notice::error(format!(
                    "Error loading or processing data: {}",
                    e
                )));
            }
        }
    }
}
