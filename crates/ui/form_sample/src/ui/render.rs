use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use form::{FieldDescriptor, FieldKind, FieldValue, FormComponent};

use super::palette::Palette;
use super::view::FormView;
use crate::tui::Frame;

/// Everything the renderer reads besides the view state.
pub struct RenderContext<'a> {
    pub form: &'a FormComponent,
    pub palette: &'a Palette,
    pub title: &'a str,
    /// Pretty-printed payload of the last successful submission.
    pub result: Option<&'a str>,
    pub status: Option<&'a str>,
}

/// Vertical thumb position for a scrollbar-like indicator.
///
/// Returns `Some(y)` with `0 <= y < track_height`, or `None` when no
/// scrollbar is needed (everything fits, or degenerate sizes).
pub fn compute_scrollbar_thumb(
    total: usize,
    visible: usize,
    scroll: usize,
    track_height: u16,
) -> Option<usize> {
    if track_height == 0 {
        return None;
    }
    if total == 0 || visible == 0 || total <= visible {
        return None;
    }

    let max_thumb_y = track_height.saturating_sub(1) as usize;
    let denom = total.saturating_sub(visible).max(1);
    let ratio = (scroll as f32) / (denom as f32);
    let thumb_y = (ratio * (max_thumb_y as f32)).round() as usize;
    Some(thumb_y.min(max_thumb_y))
}

/// Draw the form (left) and the submission pane (right).
pub fn render_form(ctx: &RenderContext<'_>, view: &mut FormView, f: &mut Frame<'_>, area: Rect) {
    if area.width < 10 || area.height < 5 {
        return;
    }
    let [form_area, result_area] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .areas(area);

    render_fields(ctx, view, f, form_area);
    render_result(ctx, f, result_area);
}

fn render_fields(ctx: &RenderContext<'_>, view: &mut FormView, f: &mut Frame<'_>, area: Rect) {
    let styles = ctx.form.styles();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", ctx.title))
        .style(ctx.palette.resolve(&styles.container));
    let inner = block.inner(area);
    f.render_widget(Clear, area);
    f.render_widget(block, area);

    view.set_last_inner_height(inner.height);
    view.ensure_visible(inner.height);

    let fields = ctx.form.schema().fields();
    let (start, end) = view.visible_bounds(fields.len(), inner.height);
    let mut lines: Vec<Line> = Vec::new();

    for (offset, field) in fields[start..end].iter().enumerate() {
        let focused = start + offset == view.focused_index();
        lines.push(field_line(ctx, view, field, focused));
        if let Some(message) = ctx.form.visible_error(&field.property) {
            lines.push(Line::from(Span::styled(
                format!("  {} {}", field.label, message),
                ctx.palette.resolve(&styles.error),
            )));
        }
        lines.push(Line::raw(""));
    }

    lines.push(Line::from(vec![
        Span::styled(" Submit ", ctx.palette.resolve(&styles.submit)),
        Span::raw("  "),
        Span::styled(" Cancel ", ctx.palette.resolve(&styles.cancel)),
    ]));
    lines.push(Line::raw(""));
    lines.push(footer(view.is_editing()));

    let para = Paragraph::new(Text::from(lines)).wrap(Wrap { trim: false });
    f.render_widget(para, inner);

    // Scrollbar / track
    let visible = end.saturating_sub(start);
    if inner.width >= 1 {
        let track = Rect {
            x: inner.x + inner.width.saturating_sub(1),
            y: inner.y,
            width: 1,
            height: inner.height,
        };
        if let Some(thumb) = compute_scrollbar_thumb(fields.len(), visible, view.scroll(), track.height) {
            let track_lines: Vec<Line> = (0..track.height)
                .map(|i| {
                    if i as usize == thumb {
                        Line::from(Span::styled("█", Style::default().fg(Color::Gray)))
                    } else {
                        Line::from(Span::styled("│", Style::default().fg(Color::DarkGray)))
                    }
                })
                .collect();
            f.render_widget(Paragraph::new(Text::from(track_lines)), track);
        }
    }
}

fn field_line<'a>(
    ctx: &RenderContext<'a>,
    view: &FormView,
    field: &'a FieldDescriptor,
    focused: bool,
) -> Line<'a> {
    let styles = ctx.form.styles();
    let mut label_style = ctx.palette.resolve(&styles.label);
    if focused {
        label_style = label_style.add_modifier(Modifier::REVERSED);
    }
    let input_style = ctx.palette.resolve(&styles.input);
    let value = ctx
        .form
        .control(&field.property)
        .map(|c| c.value.clone())
        .unwrap_or_else(|| field.kind.initial_value());

    let mut spans = vec![Span::styled(format!("{}:", field.label), label_style), Span::raw(" ")];

    match field.kind {
        FieldKind::Select => {
            let shown = value
                .as_text()
                .and_then(|k| field.option_by_key(k))
                .map(|o| o.value.clone());
            match shown {
                Some(v) => spans.push(Span::styled(format!("‹ {v} ›"), input_style)),
                None => spans.push(placeholder(field, "‹ choose ›")),
            }
        }
        FieldKind::Radio => {
            for option in &field.options {
                let mark = if value.as_text() == Some(option.key.as_str()) {
                    "(•)"
                } else {
                    "( )"
                };
                spans.push(Span::styled(format!("{mark} {}  ", option.value), input_style));
            }
        }
        FieldKind::Checkbox => {
            for (idx, option) in field.options.iter().enumerate() {
                let mark = if ctx.form.has_option(&field.property, &option.key) {
                    "[x]"
                } else {
                    "[ ]"
                };
                let mut style = input_style;
                if focused && idx == view.option_cursor() {
                    style = style.add_modifier(Modifier::UNDERLINED);
                }
                spans.push(Span::styled(format!("{mark} {}", option.value), style));
                spans.push(Span::raw("  "));
            }
        }
        _ => {
            if focused && view.is_editing() {
                spans.push(Span::styled(
                    format!("{}▏", view.input_value()),
                    Style::default().fg(Color::Black).bg(Color::White),
                ));
            } else if value.is_empty() {
                spans.push(placeholder(field, ""));
            } else {
                spans.push(Span::styled(display_text(field, &value), input_style));
            }
        }
    }
    Line::from(spans)
}

fn display_text(field: &FieldDescriptor, value: &FieldValue) -> String {
    match field.kind {
        FieldKind::Textarea => value.display().replace('\n', " ⏎ "),
        _ => value.display(),
    }
}

fn placeholder<'a>(field: &FieldDescriptor, fallback: &str) -> Span<'a> {
    let text = field
        .placeholder
        .clone()
        .unwrap_or_else(|| fallback.to_string());
    Span::styled(text, Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC))
}

fn footer(editing: bool) -> Line<'static> {
    Line::from(vec![
        Span::styled("↑/↓", Style::default().fg(Color::White)),
        Span::raw(": Navigate   "),
        Span::styled("Enter", Style::default().fg(Color::White)),
        Span::raw(if editing { ": Confirm edit   " } else { ": Edit   " }),
        Span::styled("←/→ Space", Style::default().fg(Color::White)),
        Span::raw(": Choose   "),
        Span::styled("Ctrl+S", Style::default().fg(Color::White)),
        Span::raw(": Submit   "),
        Span::styled("Esc", Style::default().fg(Color::White)),
        Span::raw(": Cancel   "),
        Span::styled("Ctrl+Q", Style::default().fg(Color::White)),
        Span::raw(": Quit"),
    ])
    .fg(Color::DarkGray)
}

fn render_result(ctx: &RenderContext<'_>, f: &mut Frame<'_>, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();
    if let Some(status) = ctx.status {
        lines.push(Line::from(Span::styled(
            status.to_string(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::raw(""));
    }
    match ctx.result {
        Some(json) => lines.extend(json.lines().map(|l| Line::raw(l.to_string()))),
        None => lines.push(Line::from(Span::styled(
            "Nothing submitted yet",
            Style::default().fg(Color::DarkGray),
        ))),
    }
    let para = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title(" Submitted data "))
        .wrap(Wrap { trim: false });
    f.render_widget(para, area);
}
