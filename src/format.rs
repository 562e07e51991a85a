//! Conversion of percentage and average columns into their display forms.
//!
//! Formatting is idempotent: a [`Percentage::Formatted`] or [`Average::Formatted`] value
//! is only re-rounded, never rescaled, so applying [`format`] to its own output yields
//! the same table.

use crate::domain::{Average, AverageField, Column, Percentage, PercentageField, StatTable};

/// Rounds to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn format_percentage(value: Percentage) -> Percentage {
    match value {
        Percentage::Ratio(ratio) => Percentage::Formatted(round2(ratio * 100.0)),
        Percentage::Formatted(percent) => Percentage::Formatted(round2(percent)),
    }
}

pub fn format_average(value: Average) -> Average {
    Average::Formatted(round2(value.value()))
}

/// Returns a copy of `table` with the given fields in display form. Fields the table's
/// schema does not carry are skipped.
pub fn format(
    table: &StatTable,
    percentage_fields: &[PercentageField],
    average_fields: &[AverageField],
) -> StatTable {
    let schema = table.schema();
    let percentage_fields: Vec<_> = percentage_fields
        .iter()
        .copied()
        .filter(|field| schema.contains(&Column::Percentage(*field)))
        .collect();
    let average_fields: Vec<_> = average_fields
        .iter()
        .copied()
        .filter(|field| schema.contains(&Column::Average(*field)))
        .collect();

    let rows = table
        .rows()
        .iter()
        .map(|row| {
            let mut row = row.clone();
            for &field in &percentage_fields {
                let formatted = row.percentage(field).map(format_percentage);
                row.set_percentage(field, formatted);
            }
            for &field in &average_fields {
                let formatted = row.average(field).map(format_average);
                row.set_average(field, formatted);
            }
            row
        })
        .collect();
    table.with_rows(rows)
}

/// Formats every percentage and average field the table carries.
pub fn format_all(table: &StatTable) -> StatTable {
    let percentage_fields: Vec<_> = table.schema().percentages().collect();
    let average_fields: Vec<_> = table.schema().averages().collect();
    format(table, &percentage_fields, &average_fields)
}

#[cfg(test)]
mod tests {
    use assert_float_eq::*;

    use super::*;
    use crate::domain::{MatchStatRow, Schema};
    use crate::testing::{full_table, sample_rows};

    #[test]
    fn round2_half_away_from_zero() {
        assert_float_absolute_eq!(1.24, round2(1.2449), 1e-12);
        assert_float_absolute_eq!(1.25, round2(1.245001), 1e-12);
        assert_float_absolute_eq!(66.67, round2(66.666_666), 1e-12);
    }

    #[test]
    fn ratio_is_scaled_and_rounded() {
        assert_eq!(Percentage::Formatted(62.5), format_percentage(Percentage::Ratio(0.625)));
        assert_eq!(Percentage::Formatted(33.33), format_percentage(Percentage::Ratio(1.0 / 3.0)));
        assert_eq!("33.33%", format_percentage(Percentage::Ratio(1.0 / 3.0)).to_string());
    }

    #[test]
    fn formatted_percentage_is_not_rescaled() {
        assert_eq!(Percentage::Formatted(62.5), format_percentage(Percentage::Formatted(62.5)));
        assert_eq!(Percentage::Formatted(12.35), format_percentage(Percentage::Formatted(12.3456)));
    }

    #[test]
    fn average_is_fixed_to_two_places() {
        assert_eq!("1.76", format_average(Average::Raw(1.756)).to_string());
        assert_eq!("2.00", format_average(Average::Raw(2.0)).to_string());
        assert_eq!(Average::Formatted(1.5), format_average(Average::Formatted(1.5)));
    }

    #[test]
    fn format_all_is_idempotent() {
        let table = full_table(sample_rows());
        let once = format_all(&table);
        let twice = format_all(&once);
        assert_eq!(once, twice);
        assert!(once
            .rows()
            .iter()
            .flat_map(|row| row.percentages.iter().flatten())
            .all(Percentage::is_formatted));
    }

    #[test]
    fn format_does_not_touch_source() {
        let table = full_table(sample_rows());
        let before = table.clone();
        let _ = format_all(&table);
        assert_eq!(before, table);
    }

    #[test]
    fn only_listed_fields_are_formatted() {
        let table = full_table(sample_rows());
        let formatted = format(&table, &[PercentageField::Btts], &[]);
        let row = &formatted.rows()[0];
        assert!(row.percentage(PercentageField::Btts).unwrap().is_formatted());
        assert!(!row.percentage(PercentageField::HomeWin).unwrap().is_formatted());
        assert!(!row.average(AverageField::GoalsForHome).unwrap().is_formatted());
    }

    #[test]
    fn absent_fields_are_skipped() {
        let schema = Schema::new(
            Column::REQUIRED
                .into_iter()
                .chain([Column::Percentage(PercentageField::Draw)]),
        );
        let row = MatchStatRow::new("A", "B", "L", 4)
            .with_percentage(PercentageField::Draw, Percentage::Ratio(0.25));
        let table = StatTable::new(schema, vec![row]).unwrap();
        let formatted = format_all(&table);
        let row = &formatted.rows()[0];
        assert_eq!(
            Some(Percentage::Formatted(25.0)),
            row.percentage(PercentageField::Draw)
        );
        assert_eq!(None, row.percentage(PercentageField::Btts));
        assert_eq!(None, row.average(AverageField::GoalsForHome));
        assert_eq!(table.schema(), formatted.schema());
    }
}
