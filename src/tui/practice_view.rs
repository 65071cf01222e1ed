//! Rendering for the practice screen
//!
//! Pure drawing functions: everything shown comes from a `SessionView` and
//! the current `TypingAttempt`, so frames can be checked with a test
//! backend.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::theme::{current_theme, Theme};
use crate::player::Phase;
use crate::runtime::SessionView;
use crate::typing::TypingAttempt;

/// Key hints shown in the footer.
pub const FOOTER_KEYS: &[(&str, &str)] = &[
    ("^N", "next"),
    ("^R", "repeat"),
    ("^B", "prev"),
    ("^P", "play/pause"),
    ("^T", "subtitle"),
    ("Esc", "quit"),
];

/// Format milliseconds as `MM:SS`.
pub fn format_clock(ms: u64) -> String {
    let secs = ms / 1000;
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// "3/12", or "-/12" when no segment is active.
pub fn segment_counter(view: &SessionView) -> String {
    match view.sync.active_index {
        Some(i) => format!("{}/{}", i + 1, view.sync.segment_count),
        None => format!("-/{}", view.sync.segment_count),
    }
}

fn phase_label(phase: Phase, playing: bool) -> &'static str {
    match phase {
        Phase::Idle => "no media",
        Phase::Loading => "loading captions",
        Phase::Ready if playing => "playing",
        Phase::Ready => "ready",
        Phase::SegmentActive => "playing",
        Phase::SegmentPaused => "paused",
    }
}

pub fn header_line(view: &SessionView, theme: &Theme) -> Line<'static> {
    let media = view.sync.media_id.clone().unwrap_or_default();
    Line::from(vec![
        Span::styled(segment_counter(view), theme.accent_bold_style()),
        Span::styled("  ".to_string(), theme.text_secondary_style()),
        Span::styled(
            phase_label(view.sync.phase, view.sync.is_playing).to_string(),
            theme.text_style(),
        ),
        Span::styled(
            format!(
                "  {} / {}  ",
                format_clock(view.position_ms),
                format_clock(view.total_ms)
            ),
            theme.text_secondary_style(),
        ),
        Span::styled(media, theme.text_secondary_style()),
    ])
}

/// Subtitle text, or a placeholder when hidden or nothing is active.
pub fn subtitle_text(view: &SessionView) -> String {
    match (&view.sync.active_text, view.subtitle_visible) {
        (Some(text), true) => text.clone(),
        (Some(_), false) => "(subtitle hidden)".to_string(),
        (None, _) if view.sync.phase == Phase::Loading => "…".to_string(),
        (None, _) if view.sync.segment_count == 0 && view.sync.phase == Phase::Ready => {
            "(no captions for this media)".to_string()
        }
        (None, _) => String::new(),
    }
}

/// The typing row: one span per word.
///
/// Untyped words show as underscores, one per character, so the learner
/// sees the shape of the sentence without the text.
pub fn typing_line(typing: &TypingAttempt, theme: &Theme) -> Line<'static> {
    let mut spans = Vec::with_capacity(typing.words().len() * 2);
    for (i, (word, input)) in typing.words().iter().zip(typing.inputs()).enumerate() {
        let shown = if input.is_empty() {
            "_".repeat(word.char_len())
        } else {
            let pad = word.text.width().saturating_sub(input.width());
            format!("{}{}", input, "_".repeat(pad))
        };
        let style = if typing.is_correct(i) {
            theme.correct_style()
        } else if i == typing.cursor() {
            theme.cursor_style()
        } else if input.is_empty() {
            theme.text_secondary_style()
        } else {
            theme.incorrect_style()
        };
        spans.push(Span::styled(shown, style));

        let mut tail = word.punctuation.clone().unwrap_or_default();
        tail.push(' ');
        spans.push(Span::styled(tail, theme.text_secondary_style()));
    }
    Line::from(spans)
}

/// Key hints as `key: what | key: what`, keys in the accent color.
fn footer_line(keys: &[(&str, &str)], theme: &Theme) -> Line<'static> {
    let spans = keys.iter().enumerate().flat_map(|(i, (key, desc))| {
        let separator = (i > 0).then(|| Span::styled(" | ", theme.text_secondary_style()));
        separator.into_iter().chain([
            Span::styled(key.to_string(), theme.accent_style()),
            Span::styled(format!(": {}", desc), theme.text_secondary_style()),
        ])
    });
    Line::from(spans.collect::<Vec<_>>())
}

fn layout(area: Rect) -> [Rect; 5] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2], chunks[3], chunks[4]]
}

/// Draw one frame of the practice screen.
pub fn render(frame: &mut Frame, view: &SessionView, typing: Option<&TypingAttempt>) {
    let theme = current_theme();
    let [header, subtitle, input, status, footer] = layout(frame.area());

    frame.render_widget(Paragraph::new(header_line(view, &theme)), header);

    let subtitle_block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.text_secondary_style())
        .title(" Subtitle ");
    frame.render_widget(
        Paragraph::new(subtitle_text(view))
            .style(theme.text_style())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(subtitle_block),
        subtitle,
    );

    let typed = match typing {
        Some(typing) => {
            let done = if typing.is_complete() { " ✓ " } else { " Type " };
            (typing_line(typing, &theme), done)
        }
        None => (Line::default(), " Type "),
    };
    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.text_secondary))
        .title(typed.1);
    frame.render_widget(
        Paragraph::new(typed.0)
            .wrap(Wrap { trim: false })
            .block(input_block),
        input,
    );

    let message = view.status.clone().unwrap_or_default();
    frame.render_widget(
        Paragraph::new(message).style(theme.text_secondary_style()),
        status,
    );
    frame.render_widget(
        Paragraph::new(footer_line(FOOTER_KEYS, &theme)).alignment(Alignment::Center),
        footer,
    );
}
