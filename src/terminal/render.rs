//! Terminal rendering module
//!
//! Draws one full frame with crossterm: title row, text area, the suggestion
//! popup on top of the text, and the status or prompt row at the bottom.

use std::io::{self, Write};

use crossterm::{
    cursor,
    style::{Attribute, Print, SetAttribute},
    terminal::{self, ClearType},
    QueueableCommand,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::app::EditorApp;
use crate::core::geometry::Rect;

/// Text area for a terminal of `cols` x `rows`: everything between the
/// title row and the status row.
pub fn text_area(cols: u16, rows: u16) -> Rect {
    Rect::new(0.0, 1.0, cols as f32, rows.saturating_sub(2) as f32)
}

/// Clip `text` to `width` display columns
fn clip(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(c);
    }
    out
}

/// Chars of one text line as drawn: the line ending is dropped, tabs and
/// other control characters become a single space.
fn cells(line: &str) -> impl Iterator<Item = char> + '_ {
    let line = match line.strip_suffix('\n') {
        Some(rest) => rest.strip_suffix('\r').unwrap_or(rest),
        None => line,
    };
    line.chars().map(|c| if c.is_control() { ' ' } else { c })
}

/// One visible text row, `skip` chars scrolled off to the left
fn visible_line(line: &str, skip: usize, width: usize) -> String {
    let shown: String = cells(line).skip(skip).collect();
    clip(&shown, width)
}

/// Screen columns taken by the `count` chars after `skip`
fn cell_offset(line: &str, skip: usize, count: usize) -> usize {
    cells(line)
        .skip(skip)
        .take(count)
        .map(|c| c.width().unwrap_or(0))
        .sum()
}

fn draw_bar(out: &mut impl Write, row: u16, text: &str, cols: u16) -> io::Result<()> {
    let text = clip(text, cols as usize);
    let pad = (cols as usize).saturating_sub(text.width());
    out.queue(cursor::MoveTo(0, row))?
        .queue(SetAttribute(Attribute::Reverse))?
        .queue(Print(text))?
        .queue(Print(" ".repeat(pad)))?
        .queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn draw_text(out: &mut impl Write, app: &EditorApp, area: Rect) -> io::Result<()> {
    let rope = app.document.rope();
    let (top, left) = (app.scroll.line, app.scroll.column);
    let width = area.width as usize;

    for row in 0..area.height as usize {
        out.queue(cursor::MoveTo(area.x as u16, area.y as u16 + row as u16))?;
        let line_idx = top + row;
        if line_idx < rope.len_lines() {
            let line = rope.line(line_idx).to_string();
            out.queue(Print(visible_line(&line, left, width)))?;
        }
        out.queue(terminal::Clear(ClearType::UntilNewLine))?;
    }
    Ok(())
}

fn draw_popup(out: &mut impl Write, app: &EditorApp, cols: u16, rows: u16) -> io::Result<()> {
    let Some(rect) = app.suggestions.popup_rect() else {
        return Ok(());
    };
    let x = rect.x as u16;
    let y = rect.y as u16;
    let width = (rect.width as u16).min(cols.saturating_sub(x));
    let height = (rect.height as u16).min(rows.saturating_sub(1).saturating_sub(y));
    if width < 3 || height < 3 {
        return Ok(());
    }
    let inner = width as usize - 2;

    let list = app.suggestions.candidates();
    let top = list.top();
    let selected = list.selected_index();

    out.queue(cursor::MoveTo(x, y))?
        .queue(Print(format!("┌{}┐", "─".repeat(inner))))?;

    for row in 0..height - 2 {
        let index = top + row as usize;
        let word = list.items().get(index).map(String::as_str).unwrap_or("");
        let label = clip(&format!(" {}", word), inner);
        let pad = inner - label.width();

        out.queue(cursor::MoveTo(x, y + 1 + row))?.queue(Print("│"))?;
        if selected == Some(index) {
            out.queue(SetAttribute(Attribute::Reverse))?;
        }
        out.queue(Print(label))?
            .queue(Print(" ".repeat(pad)))?
            .queue(SetAttribute(Attribute::Reset))?
            .queue(Print("│"))?;
    }

    out.queue(cursor::MoveTo(x, y + height - 1))?
        .queue(Print(format!("└{}┘", "─".repeat(inner))))?;
    Ok(())
}

/// Render a full frame and place the terminal cursor
pub fn render(out: &mut impl Write, app: &EditorApp, cols: u16, rows: u16) -> io::Result<()> {
    if cols == 0 || rows < 3 {
        return Ok(());
    }
    let area = text_area(cols, rows);

    out.queue(cursor::Hide)?;
    draw_bar(out, 0, &app.title_line(), cols)?;
    draw_text(out, app, area)?;
    draw_popup(out, app, cols, rows)?;

    let status_row = rows - 1;
    let cursor_pos = match &app.prompt {
        Some(prompt) => {
            let line = format!("{}{}", prompt.label, prompt.input);
            out.queue(cursor::MoveTo(0, status_row))?
                .queue(Print(clip(&line, cols as usize)))?
                .queue(terminal::Clear(ClearType::UntilNewLine))?;
            let before: String = prompt.input.chars().take(prompt.cursor()).collect();
            let column = prompt.label.width() + before.width();
            Some((column.min(cols as usize - 1) as u16, status_row))
        }
        None => {
            draw_bar(out, status_row, &app.status_line(), cols)?;
            let (line, column) = app.document.caret_line_col();
            let row = line.checked_sub(app.scroll.line);
            let col = column.checked_sub(app.scroll.column).map(|visible| {
                let text = app.document.rope().line(line).to_string();
                cell_offset(&text, app.scroll.column, visible)
            });
            match (row, col) {
                (Some(r), Some(c)) if r < area.height as usize && c < area.width as usize => {
                    Some((c as u16, area.y as u16 + r as u16))
                }
                _ => None,
            }
        }
    };

    if let Some((cx, cy)) = cursor_pos {
        out.queue(cursor::MoveTo(cx, cy))?.queue(cursor::Show)?;
    }
    out.flush()
}
