//! PDF renderer: title block, filter summary, paginated table, page footers.
//!
//! Uses the standard Helvetica faces with WinAnsi encoding, so no font
//! program is embedded. Characters outside Latin-1 print as `?`. Long cell
//! text wraps inside its column and the row grows to the tallest cell.

use std::ops::Range;

use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str};

use super::{DateStyle, table};
use crate::domain::ports::{ReportRenderError, ReportRenderer};
use crate::domain::{EXPORT_COLUMNS, ExportFormat, ExportReport};

// A4 landscape, in points.
const PAGE_WIDTH: f32 = 842.0;
const PAGE_HEIGHT: f32 = 595.0;
const MARGIN: f32 = 36.0;
const FOOTER_Y: f32 = 20.0;
const TABLE_BOTTOM: f32 = 40.0;
const FIRST_TABLE_TOP: f32 = PAGE_HEIGHT - MARGIN - 70.0;
const NEXT_TABLE_TOP: f32 = PAGE_HEIGHT - MARGIN;
const COLUMN_WIDTHS: [f32; 6] = [140.0, 170.0, 90.0, 190.0, 100.0, 80.0];
const BODY_SIZE: f32 = 9.0;
const LINE_HEIGHT: f32 = 11.0;
const CELL_PADDING_X: f32 = 4.0;
// Vertical padding summed over top and bottom; a one-line row is 18pt.
const CELL_PADDING_Y: f32 = 7.0;
const FIRST_BASELINE_DROP: f32 = 12.5;

const REGULAR: Name<'static> = Name(b"F1");
const BOLD: Name<'static> = Name(b"F2");

const CATALOG_ID: Ref = Ref::new(1);
const PAGE_TREE_ID: Ref = Ref::new(2);
const REGULAR_FONT_ID: Ref = Ref::new(3);
const BOLD_FONT_ID: Ref = Ref::new(4);
const FIRST_PAGE_ID: i32 = 5;

/// Renders the report as a paginated landscape PDF.
#[derive(Debug, Clone, Copy)]
pub struct PdfRenderer {
    first_page_space: f32,
    next_page_space: f32,
}

impl Default for PdfRenderer {
    fn default() -> Self {
        Self {
            first_page_space: FIRST_TABLE_TOP - TABLE_BOTTOM,
            next_page_space: NEXT_TABLE_TOP - TABLE_BOTTOM,
        }
    }
}

/// A table row broken into wrapped lines, one list per column.
#[derive(Debug, Clone, PartialEq)]
struct RowLayout {
    cells: Vec<Vec<String>>,
    height: f32,
}

impl RowLayout {
    fn new<'a>(cells: impl Iterator<Item = &'a str>) -> Self {
        let cells: Vec<Vec<String>> = cells
            .zip(COLUMN_WIDTHS)
            .map(|(cell, column)| wrap(cell, column - 2.0 * CELL_PADDING_X, BODY_SIZE))
            .collect();
        let lines = cells.iter().map(Vec::len).max().unwrap_or(1).max(1);
        Self {
            cells,
            height: lines as f32 * LINE_HEIGHT + CELL_PADDING_Y,
        }
    }
}

impl ReportRenderer for PdfRenderer {
    fn format(&self) -> ExportFormat {
        ExportFormat::Pdf
    }

    fn render(&self, report: &ExportReport) -> Result<Vec<u8>, ReportRenderError> {
        let header = RowLayout::new(EXPORT_COLUMNS.iter().copied());
        let rows: Vec<RowLayout> = table(report, DateStyle::Long)
            .iter()
            .map(|row| RowLayout::new(row.iter().map(String::as_str)))
            .collect();
        let heights: Vec<f32> = rows.iter().map(|row| row.height).collect();
        let plan = self.page_plan(header.height, &heights);
        let page_count = plan.len();

        let mut pdf = Pdf::new();
        let mut next_ref = Ref::new(FIRST_PAGE_ID);
        let ids: Vec<(Ref, Ref)> = plan
            .iter()
            .map(|_| (next_ref.bump(), next_ref.bump()))
            .collect();

        pdf.catalog(CATALOG_ID).pages(PAGE_TREE_ID);
        pdf.pages(PAGE_TREE_ID)
            .kids(ids.iter().map(|(page, _)| *page))
            .count(i32::try_from(page_count).map_err(|err| {
                ReportRenderError::encoding(format!("too many pages: {err}"))
            })?);
        pdf.type1_font(REGULAR_FONT_ID)
            .base_font(Name(b"Helvetica"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
        pdf.type1_font(BOLD_FONT_ID)
            .base_font(Name(b"Helvetica-Bold"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));

        for (index, (range, (page_id, content_id))) in plan.iter().zip(&ids).enumerate() {
            let mut page = pdf.page(*page_id);
            page.media_box(Rect::new(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT));
            page.parent(PAGE_TREE_ID);
            page.contents(*content_id);
            page.resources()
                .fonts()
                .pair(REGULAR, REGULAR_FONT_ID)
                .pair(BOLD, BOLD_FONT_ID);
            page.finish();

            let mut content = Content::new();
            let table_top = if index == 0 {
                draw_title_block(&mut content, report);
                FIRST_TABLE_TOP
            } else {
                NEXT_TABLE_TOP
            };
            draw_table(
                &mut content,
                table_top,
                &header,
                rows.get(range.clone()).unwrap_or_default(),
            );
            draw_footer(&mut content, report, index + 1, page_count);
            pdf.stream(*content_id, &content.finish());
        }

        Ok(pdf.finish())
    }
}

impl PdfRenderer {
    /// Row ranges per page given each row's height.
    ///
    /// Every page repeats the header and takes at least one row, so a row
    /// taller than a page still lands somewhere. An empty report gets one
    /// page.
    fn page_plan(&self, header_height: f32, heights: &[f32]) -> Vec<Range<usize>> {
        let mut plan = Vec::new();
        let mut start = 0;
        let mut space = self.first_page_space - header_height;
        while start < heights.len() || plan.is_empty() {
            let mut end = start;
            let mut used = 0.0;
            while let Some(height) = heights.get(end) {
                if end > start && used + height > space {
                    break;
                }
                used += height;
                end += 1;
            }
            plan.push(start..end);
            start = end;
            space = self.next_page_space - header_height;
        }
        plan
    }
}

fn draw_title_block(content: &mut Content, report: &ExportReport) {
    let summary = report
        .filters()
        .iter()
        .map(|entry| format!("{}: {}", entry.label, entry.value))
        .collect::<Vec<_>>()
        .join(" | ");

    text(content, BOLD, 16.0, MARGIN, PAGE_HEIGHT - MARGIN - 8.0, report.title());
    text(content, REGULAR, 11.0, MARGIN, PAGE_HEIGHT - MARGIN - 26.0, report.subtitle());
    text(
        content,
        REGULAR,
        BODY_SIZE,
        MARGIN,
        PAGE_HEIGHT - MARGIN - 44.0,
        &format!("Filter: {summary}"),
    );
    text(
        content,
        REGULAR,
        BODY_SIZE,
        MARGIN,
        PAGE_HEIGHT - MARGIN - 58.0,
        &format!("Jumlah data: {}", report.rows().len()),
    );
}

fn draw_table(content: &mut Content, top: f32, header: &RowLayout, rows: &[RowLayout]) {
    let width: f32 = COLUMN_WIDTHS.iter().sum();

    content.save_state();
    content.set_fill_rgb(0.020, 0.588, 0.412);
    content.rect(MARGIN, top - header.height, width, header.height);
    content.fill_nonzero();
    content.set_fill_rgb(1.0, 1.0, 1.0);
    draw_cells(content, BOLD, top, header);
    content.restore_state();

    let mut y = top - header.height;
    let mut boundaries = vec![top, y];
    for (index, row) in rows.iter().enumerate() {
        if index % 2 == 1 {
            content.save_state();
            content.set_fill_rgb(0.925, 0.992, 0.961);
            content.rect(MARGIN, y - row.height, width, row.height);
            content.fill_nonzero();
            content.restore_state();
        }
        draw_cells(content, REGULAR, y, row);
        y -= row.height;
        boundaries.push(y);
    }

    content.set_line_width(0.5);
    content.set_stroke_gray(0.6);
    for line_y in boundaries {
        content.move_to(MARGIN, line_y);
        content.line_to(MARGIN + width, line_y);
    }
    let mut x = MARGIN;
    content.move_to(x, top);
    content.line_to(x, y);
    for column in COLUMN_WIDTHS {
        x += column;
        content.move_to(x, top);
        content.line_to(x, y);
    }
    content.stroke();
}

fn draw_cells(content: &mut Content, font: Name<'_>, row_top: f32, row: &RowLayout) {
    let mut x = MARGIN;
    for (lines, column) in row.cells.iter().zip(COLUMN_WIDTHS) {
        let mut baseline = row_top - FIRST_BASELINE_DROP;
        for line in lines {
            text(content, font, BODY_SIZE, x + CELL_PADDING_X, baseline, line);
            baseline -= LINE_HEIGHT;
        }
        x += column;
    }
}

fn draw_footer(content: &mut Content, report: &ExportReport, page: usize, page_count: usize) {
    let line = format!(
        "Dicetak pada: {} | Halaman {page} dari {page_count}",
        report.generated_label()
    );
    text(content, REGULAR, 8.0, MARGIN, FOOTER_Y, &line);
}

fn text(content: &mut Content, font: Name<'_>, size: f32, x: f32, y: f32, value: &str) {
    let encoded = win_ansi(value);
    content.begin_text();
    content.set_font(font, size);
    content.next_line(x, y);
    content.show(Str(&encoded));
    content.end_text();
}

/// Greedy word wrap of `value` into lines no wider than `width` points.
///
/// Words longer than a whole line are split across lines. Blank input still
/// yields one empty line.
fn wrap(value: &str, width: f32, size: f32) -> Vec<String> {
    // Helvetica averages about half an em per glyph.
    let max_chars = ((width / (size * 0.5)).floor() as usize).max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;
    for word in value.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        if current_len > 0 && current_len + 1 + word.len() > max_chars {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.extend(word.iter());
        current_len += word.len();
    }
    if current_len > 0 || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Encode to WinAnsi, replacing anything outside Latin-1 with `?`.
fn win_ansi(value: &str) -> Vec<u8> {
    value
        .chars()
        .map(|c| match u8::try_from(u32::from(c)) {
            Ok(byte) if (0x20..0x7F).contains(&byte) || byte >= 0xA0 => byte,
            _ => b'?',
        })
        .collect()
}
