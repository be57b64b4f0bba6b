use anyhow::Result;
use chrono::Local;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use std::io::{Stdout, stdout};
use textpage_config::Config;
use textpage_engine::{FileStore, GeneratedPage, KeyValueStore, PageHistory};

struct App<S: KeyValueStore> {
    history: PageHistory<S>,
    pages: Vec<GeneratedPage>,
    list_state: ListState,
    current_content: Vec<String>,
    status: Option<String>,
}

impl<S: KeyValueStore> App<S> {
    fn new(history: PageHistory<S>) -> Result<Self> {
        let pages = history.list()?;

        let mut app = Self {
            history,
            pages,
            list_state: ListState::default(),
            current_content: Vec::new(),
            status: None,
        };

        // Select first page if available
        if !app.pages.is_empty() {
            app.list_state.select(Some(0));
        }
        app.update_content_for_selection();

        Ok(app)
    }

    fn next_page(&mut self) {
        if self.pages.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1) % self.pages.len(),
            None => 0,
        };
        self.list_state.select(Some(i));
        self.update_content_for_selection();
    }

    fn previous_page(&mut self) {
        if self.pages.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) | None => self.pages.len() - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
        self.update_content_for_selection();
    }

    fn selected_page(&self) -> Option<&GeneratedPage> {
        self.list_state.selected().and_then(|i| self.pages.get(i))
    }

    fn update_content_for_selection(&mut self) {
        self.current_content = match self.selected_page() {
            Some(page) => page_lines(page),
            None => vec!["No saved pages. Run `textpage convert --save` first.".to_string()],
        };
    }

    fn delete_selected(&mut self) -> Result<()> {
        let Some(page) = self.selected_page() else {
            return Ok(());
        };
        let (id, title) = (page.id.clone(), page.title.clone());

        self.history.delete(&id)?;
        self.pages = self.history.list()?;
        self.status = Some(format!("Deleted \"{title}\""));

        let selected = match self.list_state.selected() {
            _ if self.pages.is_empty() => None,
            Some(i) => Some(i.min(self.pages.len() - 1)),
            None => Some(0),
        };
        self.list_state.select(selected);
        self.update_content_for_selection();
        Ok(())
    }
}

fn page_lines(page: &GeneratedPage) -> Vec<String> {
    let tags: Vec<&str> = page.tags.iter().map(|tag| tag.label()).collect();
    let mut lines = vec![
        page.title.clone(),
        String::new(),
        format!(
            "Created {} | {} | {} chars | {} min read",
            page.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
            page.generation_mode,
            page.character_count,
            page.estimated_read_minutes
        ),
        format!("Tags: {}", tags.join(", ")),
        String::new(),
    ];
    lines.extend(page.content.lines().map(str::to_string));
    lines
}

pub fn run(config: &Config) -> Result<()> {
    let history = PageHistory::new(FileStore::new(&config.data_dir));
    let mut app = App::new(history)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

fn run_app<S: KeyValueStore>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App<S>,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next_page(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_page(),
                KeyCode::Char('d') => {
                    if let Err(err) = app.delete_selected() {
                        log::warn!("Delete failed: {err:#}");
                        app.status = Some(format!("Delete failed: {err}"));
                    }
                }
                _ => {}
            }
        }
    }
}

fn ui<S: KeyValueStore>(f: &mut Frame, app: &mut App<S>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(f.area());

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(rows[0]);

    // Page list panel
    let page_items: Vec<ListItem> = app
        .pages
        .iter()
        .map(|page| {
            let date = page.created_at.with_timezone(&Local).format("%m-%d");
            ListItem::new(Line::from(vec![
                Span::styled(format!("{date} "), Style::default().fg(Color::DarkGray)),
                Span::raw(page.title.clone()),
            ]))
        })
        .collect();

    let pages_list = List::new(page_items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Pages ({})", app.pages.len())),
        )
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    f.render_stateful_widget(pages_list, chunks[0], &mut app.list_state);

    // Content panel
    let content_text: Vec<Line> = app
        .current_content
        .iter()
        .map(|line| Line::from(Span::raw(line.clone())))
        .collect();

    let content = Paragraph::new(content_text)
        .block(Block::default().borders(Borders::ALL).title("Text"))
        .wrap(ratatui::widgets::Wrap { trim: false });

    f.render_widget(content, chunks[1]);

    // Help or last status message
    let help_text = match &app.status {
        Some(status) => Line::from(Span::styled(
            status.clone(),
            Style::default().fg(Color::Green),
        )),
        None => Line::from("q: Quit | ↑/k: Previous | ↓/j: Next | d: Delete"),
    };
    f.render_widget(Paragraph::new(help_text), rows[1]);
}
