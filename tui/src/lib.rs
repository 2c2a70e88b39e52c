//! TUI rendering and input handling for HYRESIS using ratatui.

mod app;
mod effects;
mod input;
mod log;
mod playback;
mod theme;

pub use app::GameApp;
pub use effects::apply_modal_effect;
pub use input::{InputPump, handle_events};
pub use log::TerminalLog;
pub use playback::{LogLine, Playback};
pub use theme::{Glyphs, Palette, cursor_frame, glyphs, palette, styles, symbol_label};

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

use hyresis_engine::{
    Clause, FlowPhase, PuzzleController, Symbol, SymbolGroup, command_help_summary,
    fragment_label,
};
use hyresis_types::ui::UiOptions;

const OVERLAY_MAX_WIDTH: u16 = 76;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &GameApp) {
    let options = app.ui_options();
    let palette = palette(options);
    let glyphs = glyphs(options);

    let bg_block = Block::default().style(Style::default().bg(palette.bg_dark));
    frame.render_widget(bg_block, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // Status bar
            Constraint::Min(1),    // Terminal log
            Constraint::Length(3), // Input
            Constraint::Length(1), // Key hints
        ])
        .split(frame.area());

    draw_status_bar(frame, app, chunks[0], &palette);
    draw_log(frame, app, chunks[1], &palette, &glyphs);
    draw_input(frame, app, chunks[2], &palette, &glyphs);
    draw_key_hints(frame, app, chunks[3], &palette);

    if app.phase() == FlowPhase::QuizLocked {
        draw_mission_overlay(frame, app, chunks[1], &palette, &glyphs);
    }
}

fn draw_status_bar(frame: &mut Frame, app: &GameApp, area: Rect, palette: &Palette) {
    let controller = app.controller();
    let trace = controller.trace();
    let muted = Style::default().fg(palette.text_muted);

    let status = Paragraph::new(Line::from(vec![
        Span::styled(" HYRESIS ", styles::phase_badge(palette)),
        Span::raw(" "),
        Span::styled(controller.phase().as_str(), muted),
        Span::styled(" │ ", muted),
        Span::styled(
            format!(
                "Recovered {} / {}",
                controller.recovered(),
                controller.clauses().len()
            ),
            Style::default().fg(palette.text_secondary),
        ),
        Span::styled(" │ ", muted),
        Span::styled("Trace ", muted),
        Span::styled(trace.to_string(), styles::trace(palette, trace.band())),
    ]));
    frame.render_widget(status, area);
}

fn draw_log(frame: &mut Frame, app: &GameApp, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.bg_border))
        .style(Style::default().bg(palette.bg_dark))
        .padding(Padding::horizontal(1));

    let log = app.log();
    let mut lines: Vec<Line> = log
        .lines()
        .map(|line| Line::from(Span::styled(line.text.clone(), styles::tone(palette, line.tone))))
        .collect();

    // Typing cursor trails the line currently being revealed.
    if !log.playback().is_idle()
        && let Some(last) = lines.last_mut()
    {
        last.push_span(Span::styled(
            cursor_frame(app.tick_count(), app.ui_options()),
            Style::default().fg(palette.accent),
        ));
    } else if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            glyphs.prompt,
            Style::default().fg(palette.text_muted),
        )));
    }

    let inner = block.inner(area);
    let total_lines = wrapped_line_count(&lines, inner.width);
    let scroll = total_lines.saturating_sub(inner.height);

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

fn wrapped_line_count(lines: &[Line], width: u16) -> u16 {
    if lines.is_empty() {
        return 0;
    }

    let rows = Paragraph::new(lines.to_vec())
        .wrap(Wrap { trim: false })
        .line_count(width.max(1));
    u16::try_from(rows).unwrap_or(u16::MAX)
}

fn draw_input(frame: &mut Frame, app: &GameApp, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let phase = app.phase();
    let (label, border) = match phase {
        FlowPhase::Streaming => (" TERMINAL ", palette.accent),
        FlowPhase::QuizLocked => (" SEQUENCE ", palette.primary),
        FlowPhase::Opening | FlowPhase::WaitContinue | FlowPhase::Ended => {
            (" LOCKED ", palette.bg_border)
        }
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .title(Span::styled(
            label,
            Style::default().fg(border).add_modifier(Modifier::BOLD),
        ));

    let accepts_typing = matches!(phase, FlowPhase::Streaming | FlowPhase::QuizLocked);
    let mut spans = vec![Span::styled(
        format!("{} ", glyphs.prompt),
        Style::default().fg(palette.primary),
    )];
    if app.draft().is_empty() {
        let placeholder = match phase {
            FlowPhase::Streaming => command_help_summary(),
            FlowPhase::QuizLocked => {
                "Type symbols or /command, Space inserts the selected symbol".to_owned()
            }
            FlowPhase::Opening | FlowPhase::WaitContinue => "Press Enter".to_owned(),
            FlowPhase::Ended => "Session closed".to_owned(),
        };
        if accepts_typing {
            spans.push(cursor_span(app, palette));
        }
        spans.push(Span::styled(
            placeholder,
            Style::default().fg(palette.text_muted),
        ));
    } else {
        spans.push(Span::styled(
            app.draft().to_owned(),
            Style::default().fg(palette.text_primary),
        ));
        spans.push(cursor_span(app, palette));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn cursor_span(app: &GameApp, palette: &Palette) -> Span<'static> {
    Span::styled(
        cursor_frame(app.tick_count(), app.ui_options()),
        Style::default().fg(palette.accent),
    )
}

fn draw_key_hints(frame: &mut Frame, app: &GameApp, area: Rect, palette: &Palette) {
    let hints: &[(&str, &str)] = match app.phase() {
        FlowPhase::Opening => &[("Enter", "skip"), ("Ctrl+C", "quit")],
        FlowPhase::WaitContinue => &[("Enter", "continue"), ("Ctrl+C", "quit")],
        FlowPhase::Streaming => &[
            ("Enter", "run"),
            ("↑↓", "history"),
            ("Esc", "skip"),
            ("Ctrl+C", "quit"),
        ],
        FlowPhase::QuizLocked => &[
            ("←→", "select"),
            ("Space", "insert"),
            ("Enter", "submit"),
            ("Bksp", "undo"),
            ("Del", "clear"),
            ("↑↓", "history"),
        ],
        FlowPhase::Ended => &[("Enter", "exit"), ("q", "quit")],
    };

    let mut spans = Vec::with_capacity(hints.len() * 3);
    for (index, (key, action)) in hints.iter().enumerate() {
        if index > 0 {
            spans.push(Span::styled("  ", styles::key_hint(palette)));
        }
        spans.push(Span::styled(*key, styles::key_highlight(palette)));
        spans.push(Span::styled(format!(" {action}"), styles::key_hint(palette)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Current sequence: the formula with locks and pending symbols for formula
/// clauses, a bracketed mask otherwise.
fn sequence_preview(
    controller: &PuzzleController<TerminalLog>,
    clause: &Clause,
    options: UiOptions,
) -> String {
    if clause.is_formula_puzzle() {
        return controller.formula_preview();
    }
    let pending = controller.pending();
    let cells: Vec<&str> = (0..clause.slot_count())
        .map(|index| {
            pending
                .get(index)
                .map_or("?", |symbol| symbol_label(*symbol, options))
        })
        .collect();
    format!("[{}]", cells.join(" "))
}

fn draw_mission_overlay(
    frame: &mut Frame,
    app: &GameApp,
    area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let controller = app.controller();
    let Some(clause) = controller.current_clause() else {
        return;
    };
    let options = app.ui_options();
    let muted = Style::default().fg(palette.text_muted);
    let secondary = Style::default().fg(palette.text_secondary);

    let mut lines = Vec::new();
    lines.push(Line::from(Span::styled(
        clause.title.clone(),
        Style::default().fg(palette.text_secondary),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        sequence_preview(controller, clause, options),
        Style::default()
            .fg(palette.text_primary)
            .add_modifier(Modifier::BOLD),
    )));

    let mut detail = vec![Span::styled(
        format!("Required: {} symbols", controller.required_length()),
        secondary,
    )];
    if clause.is_formula_puzzle() {
        let locked = controller.locks().locked_count();
        if locked > 0 {
            detail.push(Span::styled(
                format!("  {} {locked} locked", glyphs.locked),
                Style::default().fg(palette.success),
            ));
        }
        detail.push(Span::styled("  ", muted));
        detail.push(Span::styled(
            fragment_label(clause.fragment_total(), controller.fragment_progress())
                .replace('■', glyphs.fragment_full)
                .replace('□', glyphs.fragment_empty),
            secondary,
        ));
    }
    lines.push(Line::from(detail));

    let notes: Vec<&String> = if clause.hints.is_empty() {
        clause.problem_lines.iter().collect()
    } else {
        clause.hints.iter().collect()
    };
    if !notes.is_empty() {
        lines.push(Line::from(""));
        for note in notes {
            lines.push(Line::from(Span::styled(
                format!("{} {note}", glyphs.bullet),
                muted,
            )));
        }
    }

    lines.push(Line::from(""));
    lines.extend(symbol_chip_lines(app, palette, glyphs));

    if let Some(record) = controller
        .history()
        .iter()
        .filter(|record| record.clause_id == clause.id)
        .last()
    {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Last: {}", record.summary()),
            muted,
        )));
    }

    let width = OVERLAY_MAX_WIDTH.min(area.width.saturating_sub(4));
    let height = u16::try_from(lines.len() + 4)
        .unwrap_or(u16::MAX)
        .min(area.height);
    let base_area = Rect {
        x: area.x + (area.width.saturating_sub(width) / 2),
        y: area.y + (area.height.saturating_sub(height) / 2),
        width,
        height,
    };
    let overlay_area = app
        .modal_effect()
        .map_or(base_area, |effect| apply_modal_effect(effect, base_area, area));

    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.primary))
        .style(Style::default().bg(palette.bg_panel))
        .padding(Padding::horizontal(1))
        .title(Line::from(vec![Span::styled(
            format!(" CLAUSE {} · {} ", clause.roman_id(), clause.name),
            Style::default()
                .fg(palette.text_primary)
                .add_modifier(Modifier::BOLD),
        )]));

    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        overlay_area,
    );
}

/// One line per symbol group; chips are tinted by what earlier attempts
/// revealed about them.
fn symbol_chip_lines(app: &GameApp, palette: &Palette, glyphs: &Glyphs) -> Vec<Line<'static>> {
    let options = app.ui_options();
    let offered = app.palette();
    let selected = app.selected_symbol();
    let intel = app.controller().intel();
    let label_width = SymbolGroup::ALL
        .iter()
        .map(|group| group.label().width())
        .max()
        .unwrap_or(0);

    let mut lines = Vec::new();
    for group in SymbolGroup::ALL {
        let symbols: Vec<Symbol> = group
            .symbols()
            .filter(|symbol| offered.contains(symbol))
            .collect();
        if symbols.is_empty() {
            continue;
        }
        let label = group.label();
        let pad = label_width.saturating_sub(label.width());
        let mut spans = vec![Span::styled(
            format!("{label}{} ", " ".repeat(pad)),
            Style::default().fg(palette.text_muted),
        )];
        for symbol in symbols {
            let is_selected = selected == Some(symbol);
            let style = if is_selected {
                styles::chip_selected(palette)
            } else {
                styles::chip(palette, intel.status(symbol))
            };
            let marker = if is_selected { glyphs.selected } else { " " };
            spans.push(Span::styled(
                format!("{marker}{} ", symbol_label(symbol, options)),
                style,
            ));
            spans.push(Span::raw(" "));
        }
        lines.push(Line::from(spans));
    }

    if let Some(symbol) = selected {
        lines.push(Line::from(Span::styled(
            format!("{}  {}", symbol.command(), symbol.meaning()),
            Style::default().fg(palette.text_secondary),
        )));
    }
    lines
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer, text::Line};

    use hyresis_engine::{FlowPhase, HyresisConfig, TimingConfig};
    use hyresis_types::ui::UiOptions;

    use super::{GameApp, draw, wrapped_line_count};

    fn app(options: UiOptions) -> GameApp {
        let timing = TimingConfig {
            typing_enabled: false,
            ..TimingConfig::default()
        };
        GameApp::new(HyresisConfig::default().settings().unwrap(), timing, options)
    }

    fn quiz_app(options: UiOptions) -> GameApp {
        let mut app = app(options);
        app.skip_playback();
        app.tick(Duration::ZERO);
        app.skip_playback();
        app.confirm();
        app.skip_playback();
        app.tick(Duration::ZERO);
        assert_eq!(app.phase(), FlowPhase::QuizLocked);
        app
    }

    fn render(app: &GameApp) -> String {
        render_sized(app, 100, 40)
    }

    fn render_sized(app: &GameApp, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    fn buffer_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut out = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn opening_renders_status_and_log() {
        let mut app = app(UiOptions::default());
        app.skip_playback();
        let screen = render(&app);
        assert!(screen.contains("HYRESIS"));
        assert!(screen.contains("OPENING"));
        assert!(screen.contains("BEGIN RECONSTRUCTION"));
        assert!(screen.contains("Press Enter"));
    }

    #[test]
    fn quiz_overlay_shows_clause_and_symbol_groups() {
        let app = quiz_app(UiOptions::default());
        let screen = render(&app);
        assert!(screen.contains("CLAUSE I"));
        assert!(screen.contains("Self-Observation"));
        assert!(screen.contains("Required: 2 symbols"));
        assert!(screen.contains("[Quantifiers]"));
        assert!(screen.contains("[Time]"));
        assert!(screen.contains("/all"));
    }

    #[test]
    fn ascii_mode_uses_ascii_prompt_and_fragments() {
        let options = UiOptions {
            ascii_only: true,
            ..UiOptions::default()
        };
        let app = quiz_app(options);
        let screen = render(&app);
        assert!(screen.contains("Fragments: [ . . ]"));
        assert!(!screen.contains('❯'));
    }

    #[test]
    fn streaming_placeholder_lists_commands() {
        let options = UiOptions::default();
        let timing = TimingConfig {
            typing_enabled: false,
            auto_open_quiz: false,
            ..TimingConfig::default()
        };
        let mut app = GameApp::new(HyresisConfig::default().settings().unwrap(), timing, options);
        app.skip_playback();
        app.tick(Duration::ZERO);
        app.skip_playback();
        app.confirm();
        app.skip_playback();
        let screen = render(&app);
        assert!(screen.contains("TERMINAL"));
        assert!(screen.contains("Commands: /symbols"));
    }

    #[test]
    fn wrapped_line_count_breaks_at_words() {
        let lines = vec![
            Line::from("aaaaaa bbbbbb cccccc"),
            Line::from("> ENTER SYMBOL SEQUENCE:"),
        ];
        assert_eq!(wrapped_line_count(&lines, 10), 6);
        assert_eq!(wrapped_line_count(&[], 10), 0);
    }

    #[test]
    fn newest_log_line_stays_visible_when_lines_wrap() {
        let timing = TimingConfig {
            typing_enabled: false,
            ..TimingConfig::default()
        };
        let mut app = GameApp::new(
            HyresisConfig::default().settings().unwrap(),
            timing,
            UiOptions::default(),
        );
        app.skip_playback();
        app.tick(Duration::ZERO);
        app.skip_playback();
        let screen = render_sized(&app, 30, 14);
        assert!(screen.contains("CONTINUE"));
    }
}
