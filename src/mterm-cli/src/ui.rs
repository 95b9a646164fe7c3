//! Rendering of the terminal state.
//!
//! ```text
//! ┌ MTerminal ─────────────────────────────┐
//! │ output lines, colored per segment      │
//! │ ...                                    │
//! │ > hel|p                                │
//! └───────────────────────── Consolas 14 ──┘
//! ```

use mterm::{Color, Terminal};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

const PROMPT: &str = "> ";
const READ_PROMPT: &str = "? ";

fn tui_color(color: Color) -> ratatui::style::Color {
    ratatui::style::Color::Rgb(color.r, color.g, color.b)
}

/// Draws the whole terminal into the frame.
pub fn render(frame: &mut Frame, terminal: &Terminal) {
    let style = terminal.style();
    let base = Style::default()
        .fg(tui_color(style.foreground))
        .bg(tui_color(style.background));

    let block = Block::bordered()
        .title(format!(" {} ", terminal.title()))
        .title_bottom(
            Line::from(format!(
                " {} {} ",
                style.font_family,
                terminal.window_state().font_size
            ))
            .right_aligned(),
        )
        .style(base);
    let inner = block.inner(frame.area());
    frame.render_widget(block, frame.area());

    let [output_area, input_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

    render_output(frame, terminal, output_area, base);
    render_input(frame, terminal, input_area, base);
}

fn render_output(frame: &mut Frame, terminal: &Terminal, area: Rect, base: Style) {
    let lines: Vec<Line> = terminal
        .output()
        .lines()
        .map(|line| {
            Line::from(
                line.segments()
                    .iter()
                    .map(|segment| match segment.color {
                        Some(color) => Span::styled(segment.text.clone(), base.fg(tui_color(color))),
                        None => Span::styled(segment.text.clone(), base),
                    })
                    .collect::<Vec<_>>(),
            )
        })
        .collect();

    let paragraph = Paragraph::new(Text::from(lines))
        .style(base)
        .wrap(Wrap { trim: false });

    // Keep the newest output in view.
    let total = paragraph.line_count(area.width);
    let scroll = total.saturating_sub(usize::from(area.height));
    let scroll = u16::try_from(scroll).unwrap_or(u16::MAX);

    frame.render_widget(paragraph.scroll((scroll, 0)), area);
}

fn render_input(frame: &mut Frame, terminal: &Terminal, area: Rect, base: Style) {
    let line = terminal.command_line();
    let text = line.text();

    let prompt = if line.is_reading() {
        Span::styled(READ_PROMPT, base.fg(tui_color(Color::AQUA)))
    } else {
        Span::styled(PROMPT, base.fg(tui_color(Color::LIGHT_GRAY)))
    };

    let mut spans = vec![prompt, Span::styled(text, base.fg(tui_color(Color::LIGHT_GRAY)))];
    if let Some(rest) = line.suggestion().and_then(|s| s.strip_prefix(text)) {
        spans.push(Span::styled(
            rest,
            base.fg(tui_color(Color::GRAY)).add_modifier(Modifier::DIM),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).style(base), area);

    let offset = PROMPT.width() + text[..line.cursor_pos()].width();
    let x = area.x.saturating_add(u16::try_from(offset).unwrap_or(u16::MAX));
    frame.set_cursor_position((x.min(area.right().saturating_sub(1)), area.y));
}

#[cfg(test)]
mod tests {
    use super::*;
    use mterm::TerminalConfig;
    use ratatui::Terminal as TuiTerminal;
    use ratatui::backend::TestBackend;

    fn draw(terminal: &Terminal, width: u16, height: u16) -> String {
        let mut tui = TuiTerminal::new(TestBackend::new(width, height)).unwrap();
        tui.draw(|frame| render(frame, terminal)).unwrap();
        tui.backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_renders_title_output_and_input() {
        let mut terminal = Terminal::new(TerminalConfig::default()).unwrap();
        terminal.write_line("hello world");
        terminal.set_input("he");

        let screen = draw(&terminal, 40, 6);
        assert!(screen.contains("MTerminal"));
        assert!(screen.contains("hello world"));
        assert!(screen.contains("> help"));
        assert!(screen.contains("Consolas 14"));
    }

    #[test]
    fn test_scrolls_to_newest_output() {
        let mut terminal = Terminal::new(TerminalConfig::default()).unwrap();
        for i in 0..20 {
            terminal.write_line(&format!("line {:02}", i));
        }

        let screen = draw(&terminal, 30, 6);
        assert!(screen.contains("line 19"));
        assert!(!screen.contains("line 00"));
    }
}
