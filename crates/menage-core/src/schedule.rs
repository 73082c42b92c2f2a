//! Due-date arithmetic for recurring chores.

use chrono::{DateTime, Duration, Months, Utc};

use crate::models::Frequency;

impl Frequency {
    /// Next due date for a chore completed or swept at `from`.
    ///
    /// Month-based frequencies use calendar months and clamp to the last
    /// valid day of the target month (Jan 31 + 1 month = Feb 29 in a leap
    /// year), not fixed 30-day blocks.
    pub fn next_due(&self, from: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            Frequency::Daily => from + Duration::days(1),
            Frequency::Weekly => from + Duration::days(7),
            Frequency::Monthly => add_months(from, 1),
            Frequency::Quarterly => add_months(from, 3),
            Frequency::Semiannual => add_months(from, 6),
        }
    }
}

// checked_add_months only fails at the edge of chrono's representable range
fn add_months(from: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    from.checked_add_months(Months::new(months)).unwrap_or(from)
}

/// Next due date for a raw frequency label.
///
/// Unrecognised labels return `from` unchanged; that is the contract, not
/// an error.
pub fn next_due(label: &str, from: DateTime<Utc>) -> DateTime<Utc> {
    match label.parse::<Frequency>() {
        Ok(frequency) => frequency.next_due(from),
        Err(_) => from,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
    }

    #[rstest]
    #[case("daily", 1)]
    #[case("weekly", 7)]
    fn day_based_labels_advance_by_whole_days(#[case] label: &str, #[case] days: i64) {
        let from = at(2024, 1, 8);
        assert_eq!(next_due(label, from), from + Duration::days(days));
    }

    #[rstest]
    #[case(Frequency::Daily)]
    #[case(Frequency::Weekly)]
    #[case(Frequency::Monthly)]
    #[case(Frequency::Quarterly)]
    #[case(Frequency::Semiannual)]
    fn every_frequency_moves_strictly_forward(#[case] frequency: Frequency) {
        let from = at(2024, 3, 15);
        assert!(frequency.next_due(from) > from);
    }

    #[rstest]
    #[case("Quotidienne", Frequency::Daily)]
    #[case("Hebdomadaire", Frequency::Weekly)]
    #[case("Mensuelle", Frequency::Monthly)]
    #[case("Trimestrielle", Frequency::Quarterly)]
    #[case("Semestrielle", Frequency::Semiannual)]
    fn french_labels_parse_to_the_same_variants(
        #[case] label: &str,
        #[case] expected: Frequency,
    ) {
        assert_eq!(label.parse::<Frequency>().unwrap(), expected);
    }

    #[test]
    fn parsing_is_case_insensitive() {
        assert_eq!("WEEKLY".parse::<Frequency>().unwrap(), Frequency::Weekly);
        assert_eq!("quotidienne".parse::<Frequency>().unwrap(), Frequency::Daily);
    }

    #[test]
    fn month_addition_clamps_to_end_of_month() {
        assert_eq!(next_due("monthly", at(2024, 1, 31)), at(2024, 2, 29));
        assert_eq!(next_due("monthly", at(2023, 1, 31)), at(2023, 2, 28));
    }

    #[test]
    fn quarterly_and_semiannual_use_calendar_months() {
        assert_eq!(next_due("quarterly", at(2023, 11, 30)), at(2024, 2, 29));
        assert_eq!(next_due("semiannual", at(2023, 11, 30)), at(2024, 5, 30));
    }

    #[test]
    fn unrecognised_label_is_left_unchanged() {
        let from = at(2024, 1, 8);
        assert_eq!(next_due("fortnightly", from), from);
        assert_eq!(next_due("", from), from);
    }

    #[rstest]
    #[case(Frequency::Daily)]
    #[case(Frequency::Weekly)]
    #[case(Frequency::Monthly)]
    #[case(Frequency::Quarterly)]
    #[case(Frequency::Semiannual)]
    fn canonical_label_round_trips_through_parse(#[case] frequency: Frequency) {
        assert_eq!(frequency.to_string().parse::<Frequency>().unwrap(), frequency);
    }
}
