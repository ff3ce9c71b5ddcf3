use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};
use termitask_core::git::{GithubItem, RepoPanel, RepoSummary};
use termitask_core::BucketStore;
use unicode_width::UnicodeWidthStr;

use crate::tui::app::{App, Focus};

const ISSUE_COLOR: Color = Color::Red;
const PR_COLOR: Color = Color::Yellow;
const AUTHOR_COLOR: Color = Color::Blue;
const COMMIT_ID_COLOR: Color = Color::Red;
const COMMIT_DATE_COLOR: Color = Color::Green;

pub fn draw<S: BucketStore>(f: &mut Frame, app: &mut App<S>) {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Footer/Help
        ])
        .split(f.area());

    if app.panels.is_empty() {
        draw_task_box(f, app, main_chunks[0]);
    } else {
        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(main_chunks[0]);
        draw_repos(f, app, content_chunks[0]);
        draw_task_box(f, app, content_chunks[1]);
    }

    let footer = Paragraph::new(
        "Ctrl+r: list | Ctrl+f: new task | Ctrl+g: repos | Ctrl+c: clear done | Tab: next | Esc: quit",
    )
    .style(Style::default().fg(Color::DarkGray))
    .alignment(Alignment::Center);
    f.render_widget(footer, main_chunks[1]);
}

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

fn draw_task_box<S: BucketStore>(f: &mut Frame, app: &mut App<S>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(area);

    let name = app.tasks.name().to_string();
    let items: Vec<ListItem> = app.tasks.lines().into_iter().map(ListItem::new).collect();
    let list = List::new(items)
        .block(
            Block::default()
                .title(format!(" {} ", name))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(border_style(app.focus == Focus::List)),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol(">> ");
    f.render_stateful_widget(list, chunks[0], &mut app.state);

    let entry = Paragraph::new(app.input.as_str()).block(
        Block::default()
            .title(format!(" + {} ", name))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style(app.focus == Focus::Entry)),
    );
    f.render_widget(entry, chunks[1]);

    if app.focus == Focus::Entry {
        let before: String = app.input.chars().take(app.cursor_position).collect();
        let x = chunks[1].x + 1 + before.width() as u16;
        f.set_cursor_position((x.min(chunks[1].right().saturating_sub(2)), chunks[1].y + 1));
    }
}

fn draw_repos<S: BucketStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let constraints: Vec<Constraint> = app
        .panels
        .iter()
        .map(|_| Constraint::Ratio(1, app.panels.len() as u32))
        .collect();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, panel) in app.panels.iter().enumerate() {
        let focused = app.focus == Focus::Repos && app.repo_index == i;
        let block = Block::default()
            .title(format!(" {} ", panel.path().display()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style(focused));

        let lines = match panel {
            RepoPanel::Loaded(summary) => summary_lines(summary),
            RepoPanel::Failed { error, .. } => vec![Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            ))],
        };

        let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
        f.render_widget(paragraph, chunks[i]);
    }
}

fn heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    ))
}

fn item_line(item: &GithubItem, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("#{}", item.number), Style::default().fg(color)),
        Span::raw(format!(" {} ", item.title)),
        Span::styled(format!("<{}>", item.author()), Style::default().fg(AUTHOR_COLOR)),
    ])
}

fn summary_lines(summary: &RepoSummary) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if !summary.issues.is_empty() {
        lines.push(heading("Last Issues"));
        lines.extend(summary.issues.iter().map(|i| item_line(i, ISSUE_COLOR)));
        lines.push(Line::from(""));
    }

    if !summary.pull_requests.is_empty() {
        lines.push(heading("Last PRs"));
        lines.extend(summary.pull_requests.iter().map(|pr| item_line(pr, PR_COLOR)));
        lines.push(Line::from(""));
    }

    let commit = &summary.commit;
    lines.push(heading(&format!("Currently on {}", summary.branch)));
    lines.push(Line::from(vec![
        Span::styled(commit.hash.clone(), Style::default().fg(COMMIT_ID_COLOR)),
        Span::raw(format!(" {} ", commit.subject)),
        Span::styled(format!("({}) ", commit.date), Style::default().fg(COMMIT_DATE_COLOR)),
        Span::styled(format!("<{}>", commit.author), Style::default().fg(AUTHOR_COLOR)),
    ]));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use termitask_core::git::github::User;
    use termitask_core::git::Commit;
    use std::path::PathBuf;

    #[test]
    fn test_summary_lines_skip_empty_sections() {
        let summary = RepoSummary {
            path: PathBuf::from("/src/termitask"),
            branch: "main".to_string(),
            commit: Commit {
                hash: "1a2b3c4".to_string(),
                subject: "Fix redraw".to_string(),
                date: "2 hours ago".to_string(),
                author: "Jane".to_string(),
            },
            issues: Vec::new(),
            pull_requests: Vec::new(),
        };
        let lines = summary_lines(&summary);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].to_string(), "Currently on main");
        assert_eq!(lines[1].to_string(), "1a2b3c4 Fix redraw (2 hours ago) <Jane>");
    }

    #[test]
    fn test_item_line() {
        let item = GithubItem {
            number: 7,
            title: "Crash".to_string(),
            user: Some(User { login: "ana".to_string() }),
            pull_request: None,
        };
        assert_eq!(item_line(&item, ISSUE_COLOR).to_string(), "#7 Crash <ana>");
    }
}
