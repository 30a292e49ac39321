use anyhow::{anyhow, Context, Result};

use super::table_view::TableView;

/// Serialize `table` as CSV with one header row (units are not part of
/// the CSV output).
pub fn csv_bytes(table: &dyn TableView) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(table.table_view_header().iter().map(|(label, _, _)| label.as_ref()))
        .with_context(|| anyhow!("writing header of table {:?}", table.table_name()))?;
    for row in table.table_view_body() {
        writer
            .write_record(row.iter().map(|(val, _)| val.as_ref()))
            .with_context(|| anyhow!("writing row of table {:?}", table.table_name()))?;
    }
    writer
        .into_inner()
        .map_err(|e| anyhow!("flushing table {:?}: {}", table.table_name(), e.error()))
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::*;
    use crate::tables::table_view::{
        number_cell, Cell, ColumnFormatting, ColumnHeader, Highlight, Unit,
    };

    struct Two;

    impl TableView for Two {
        fn table_name(&self) -> Cow<str> {
            "two".into()
        }

        fn table_view_header(&self) -> Vec<ColumnHeader> {
            vec![
                (
                    "Time limit, Threads".into(),
                    Unit::None,
                    ColumnFormatting::String { width_chars: None },
                ),
                ("Mean".into(), Unit::Measured("msec"), ColumnFormatting::Number),
            ]
        }

        fn table_view_body<'s>(&'s self) -> Box<dyn Iterator<Item = Vec<Cell<'s>>> + 's> {
            Box::new(
                [
                    vec![("a".into(), Highlight::Neutral), number_cell(Some(1.5))],
                    vec![("b".into(), Highlight::Neutral), number_cell(None)],
                ]
                .into_iter(),
            )
        }
    }

    #[test]
    fn t_csv() -> Result<()> {
        let s = String::from_utf8(csv_bytes(&Two)?)?;
        assert_eq!(s, "\"Time limit, Threads\",Mean\na,1.5\nb,\n");
        Ok(())
    }
}
