use std::{borrow::Cow, path::Path};

use anyhow::{anyhow, Context, Result};
use rust_xlsxwriter::{Color, Format, FormatAlign, Workbook};

use super::table_view::{ColumnFormatting, Highlight, TableView, Unit};

/// How many characters to add to the automatic column width
/// calculation to try to avoid setting widths too small to accomodate
/// the strings in the cells.
const WIDTH_SAFETY_MARGIN_CHARS: f64 = 2.0;

/// Excel limits worksheet names to 31 characters.
const MAX_SHEET_NAME_CHARS: usize = 31;

fn max_line_width(s: &str) -> usize {
    s.split('\n').map(|s| s.chars().count()).max().unwrap_or(0)
}

fn colnum(i: usize) -> Result<u16> {
    u16::try_from(i).with_context(|| anyhow!("too many columns for excel"))
}

/// Write each table as one worksheet of a workbook at `file`.
pub fn excel_file_write<'t>(
    tables: impl IntoIterator<Item = &'t (dyn TableView + 't)>,
    file: &Path,
) -> Result<()> {
    let mut workbook = Workbook::new();

    for table in tables {
        let worksheet = workbook.add_worksheet();
        let name: String = table.table_name().chars().take(MAX_SHEET_NAME_CHARS).collect();
        worksheet
            .set_name(&name)
            .with_context(|| anyhow!("trying to use table name as worksheet name: {name:?}"))?;

        let titles = table.table_view_header();

        // Our own max width tracking, in characters
        let mut column_widths: Vec<usize> = titles.iter().map(|_| 1).collect();

        let mut rownum = 0;
        {
            let mut num_lines = 1;
            let bold = Format::new().set_bold();
            for (i, (label, unit, _)) in titles.iter().enumerate() {
                let perhaps_unit: Cow<str> = match unit {
                    Unit::None | Unit::DimensionLess => "".into(),
                    Unit::Count => "\n(count)".into(),
                    Unit::Measured(unit) => format!("\n({unit})").into(),
                };
                let val = format!("{label}{perhaps_unit}");
                column_widths[i] = column_widths[i].max(max_line_width(&val));
                num_lines = num_lines.max(val.split('\n').count());
                worksheet
                    .write_with_format(rownum, colnum(i)?, &val, &bold)
                    .with_context(|| anyhow!("write title value {val:?}"))?;
            }
            let height = (num_lines * 15) as f64;
            worksheet
                .set_row_height(rownum, height)
                .with_context(|| anyhow!("setting height of row {rownum} to height {height}"))?;
        }

        for row in table.table_view_body() {
            rownum += 1;
            for (i, (val, highlight)) in row.iter().enumerate() {
                let mut format = Format::new();
                if let Some((_, _, ColumnFormatting::Number)) = titles.get(i) {
                    format = format.set_align(FormatAlign::Right);
                }
                match highlight {
                    Highlight::Neutral => (),
                    Highlight::Red => {
                        format = format.set_font_color(Color::Red);
                    }
                    Highlight::Green => {
                        format = format.set_background_color(Color::Green);
                    }
                }
                column_widths[i] = column_widths[i].max(max_line_width(val));

                // Numbers go in as numbers so that they can be
                // computed with; everything else as text.
                match val.parse::<f64>() {
                    Ok(x) if x.is_finite() => {
                        worksheet.write_number_with_format(rownum, colnum(i)?, x, &format)
                    }
                    _ => {
                        worksheet.write_string_with_format(rownum, colnum(i)?, val.as_ref(), &format)
                    }
                }
                .with_context(|| anyhow!("write value {val:?}"))?;
            }
        }

        // rust_xlsxwriter's autofit works badly for numbers, use our
        // own character counting.
        for (i, num_chars) in column_widths.iter().enumerate() {
            let width = match titles[i].2 {
                ColumnFormatting::String {
                    width_chars: Some(width),
                } => width,
                _ => *num_chars as f64 + WIDTH_SAFETY_MARGIN_CHARS,
            };
            let col = colnum(i)?;
            worksheet
                .set_column_width(col, width)
                .with_context(|| anyhow!("setting column width on column {col} to {width}"))?;
        }
    }

    workbook
        .save(file)
        .with_context(|| anyhow!("saving to file {file:?}"))?;

    Ok(())
}
