//! Binning and bucketing
//!
//! Two independent strategies: numeric range binning for histograms (price
//! distribution) and fixed-label age bucketing (customer demographics).

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One histogram bucket: a half-open numeric range and how many values
/// landed in it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bin {
    /// Inclusive lower bound and nominal upper bound of the bucket
    pub range: (f64, f64),
    /// Number of values assigned to the bucket
    pub count: u32,
}

/// Bin `values` into `bucket_count` equal-width ranges between the minimum
/// and maximum value, plus one terminal bucket that catches values landing
/// exactly on the maximum. Requesting `n` buckets therefore yields `n + 1`
/// ranges; consumers of the price-distribution chart rely on that shape.
///
/// Empty input or a zero bucket count yields an empty Vec (caller
/// precondition; never panics). When every value is identical the bin
/// width collapses to zero and no value can be assigned, matching the
/// shipped behavior.
pub fn bin_values(values: &[f64], bucket_count: usize) -> Vec<Bin> {
    if values.is_empty() || bucket_count == 0 {
        return Vec::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let bin_width = (max - min) / bucket_count as f64;

    let mut bins: Vec<Bin> = (0..=bucket_count)
        .map(|index| {
            let start = min + index as f64 * bin_width;
            Bin {
                range: (start, start + bin_width),
                count: 0,
            }
        })
        .collect();

    for &value in values {
        let index = ((value - min) / bin_width).floor();
        if index >= 0.0 && (index as usize) < bucket_count {
            bins[index as usize].count += 1;
        } else if index == bucket_count as f64 {
            // Values exactly equal to the maximum land in the terminal bucket
            bins[bucket_count].count += 1;
        }
    }

    bins
}

/// Fixed age groups for demographic charts, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeBucket {
    #[serde(rename = "<18")]
    Under18,
    #[serde(rename = "18-24")]
    From18To24,
    #[serde(rename = "25-34")]
    From25To34,
    #[serde(rename = "35-44")]
    From35To44,
    #[serde(rename = "45-54")]
    From45To54,
    #[serde(rename = "55+")]
    Over55,
}

impl AgeBucket {
    /// All buckets in display order. Chart consumers rely on all six labels
    /// always being present, in this order.
    pub const ALL: [AgeBucket; 6] = [
        AgeBucket::Under18,
        AgeBucket::From18To24,
        AgeBucket::From25To34,
        AgeBucket::From35To44,
        AgeBucket::From45To54,
        AgeBucket::Over55,
    ];

    /// Display label for the bucket
    pub fn label(&self) -> &'static str {
        match self {
            AgeBucket::Under18 => "<18",
            AgeBucket::From18To24 => "18-24",
            AgeBucket::From25To34 => "25-34",
            AgeBucket::From35To44 => "35-44",
            AgeBucket::From45To54 => "45-54",
            AgeBucket::Over55 => "55+",
        }
    }

    /// The bucket a given age falls into
    pub fn for_age(age: i32) -> AgeBucket {
        match age {
            i32::MIN..=17 => AgeBucket::Under18,
            18..=24 => AgeBucket::From18To24,
            25..=34 => AgeBucket::From25To34,
            35..=44 => AgeBucket::From35To44,
            45..=54 => AgeBucket::From45To54,
            _ => AgeBucket::Over55,
        }
    }

    fn index(&self) -> usize {
        match self {
            AgeBucket::Under18 => 0,
            AgeBucket::From18To24 => 1,
            AgeBucket::From25To34 => 2,
            AgeBucket::From35To44 => 3,
            AgeBucket::From45To54 => 4,
            AgeBucket::Over55 => 5,
        }
    }
}

impl std::fmt::Display for AgeBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Calendar-aware age: year difference, decremented when the month/day of
/// `as_of` precedes the birthday's month/day.
pub fn age_on(birthday: NaiveDate, as_of: NaiveDate) -> i32 {
    let mut age = as_of.year() - birthday.year();
    if (as_of.month(), as_of.day()) < (birthday.month(), birthday.day()) {
        age -= 1;
    }
    age
}

/// Counts per age bucket. Always carries all six buckets, even when every
/// count is zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeDistribution {
    counts: [u32; 6],
}

impl AgeDistribution {
    /// Count for one bucket
    pub fn count(&self, bucket: AgeBucket) -> u32 {
        self.counts[bucket.index()]
    }

    /// All `(bucket, count)` pairs in display order
    pub fn counts(&self) -> impl Iterator<Item = (AgeBucket, u32)> + '_ {
        AgeBucket::ALL
            .iter()
            .map(move |&bucket| (bucket, self.count(bucket)))
    }

    /// Total number of bucketed records
    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// The bucket with the highest count. Ties resolve to the first bucket
    /// reaching the maximum in display order; `None` when every count is
    /// zero.
    pub fn most_common(&self) -> Option<AgeBucket> {
        let mut best: Option<AgeBucket> = None;
        let mut best_count = 0;
        for (bucket, count) in self.counts() {
            if count > best_count {
                best = Some(bucket);
                best_count = count;
            }
        }
        best
    }

    fn record(&mut self, bucket: AgeBucket) {
        self.counts[bucket.index()] += 1;
    }
}

/// Bucket birthdays into the six fixed age groups as of the supplied date.
/// The clock is an explicit parameter so results are deterministic under
/// test.
pub fn bucket_ages(birthdays: &[NaiveDate], as_of: NaiveDate) -> AgeDistribution {
    let mut distribution = AgeDistribution::default();
    for &birthday in birthdays {
        distribution.record(AgeBucket::for_age(age_on(birthday, as_of)));
    }
    distribution
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn requesting_n_bins_yields_n_plus_one_buckets() {
        let bins = bin_values(&[1.0, 2.0, 3.0, 4.0, 5.0], 2);
        assert_eq!(bins.len(), 3);
        assert_eq!(bins[0].range, (1.0, 3.0));
        assert_eq!(bins[1].range, (3.0, 5.0));
        assert_eq!(bins[2].range, (5.0, 7.0));
        let counts: Vec<u32> = bins.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![2, 2, 1]);
    }

    #[test]
    fn counts_sum_to_input_length() {
        let values = [0.5, 1.5, 2.0, 3.25, 9.0, 9.0, 4.4];
        let bins = bin_values(&values, 5);
        let total: u32 = bins.iter().map(|b| b.count).sum();
        assert_eq!(total as usize, values.len());
    }

    #[test]
    fn maximum_lands_in_terminal_bucket() {
        let bins = bin_values(&[0.0, 10.0], 5);
        assert_eq!(bins.len(), 6);
        assert_eq!(bins[5].count, 1);
    }

    #[test]
    fn empty_input_yields_no_bins() {
        assert!(bin_values(&[], 5).is_empty());
        assert!(bin_values(&[1.0], 0).is_empty());
    }

    #[test]
    fn identical_values_collapse_the_width() {
        let bins = bin_values(&[2.0, 2.0, 2.0], 4);
        assert_eq!(bins.len(), 5);
        assert!(bins.iter().all(|b| b.count == 0));
        assert_eq!(bins[0].range, (2.0, 2.0));
    }

    #[test]
    fn age_is_calendar_aware() {
        let birthday = date(1990, 6, 15);
        assert_eq!(age_on(birthday, date(2024, 6, 14)), 33);
        assert_eq!(age_on(birthday, date(2024, 6, 15)), 34);
        assert_eq!(age_on(birthday, date(2024, 6, 16)), 34);
    }

    #[test]
    fn buckets_cover_the_age_range() {
        assert_eq!(AgeBucket::for_age(17), AgeBucket::Under18);
        assert_eq!(AgeBucket::for_age(18), AgeBucket::From18To24);
        assert_eq!(AgeBucket::for_age(24), AgeBucket::From18To24);
        assert_eq!(AgeBucket::for_age(25), AgeBucket::From25To34);
        assert_eq!(AgeBucket::for_age(54), AgeBucket::From45To54);
        assert_eq!(AgeBucket::for_age(55), AgeBucket::Over55);
        assert_eq!(AgeBucket::for_age(-1), AgeBucket::Under18);
    }

    #[test]
    fn all_six_labels_always_present() {
        let empty = bucket_ages(&[], date(2024, 1, 1));
        let pairs: Vec<(AgeBucket, u32)> = empty.counts().collect();
        assert_eq!(pairs.len(), 6);
        assert!(pairs.iter().all(|&(_, count)| count == 0));

        let labels: Vec<&str> = pairs.iter().map(|(b, _)| b.label()).collect();
        assert_eq!(labels, vec!["<18", "18-24", "25-34", "35-44", "45-54", "55+"]);
    }

    #[test]
    fn thirty_year_old_lands_in_25_34() {
        let distribution = bucket_ages(&[date(1993, 5, 1)], date(2024, 1, 1));
        assert_eq!(distribution.count(AgeBucket::From25To34), 1);
        assert_eq!(distribution.total(), 1);
    }

    #[test]
    fn most_common_ties_resolve_to_earlier_label() {
        let distribution = bucket_ages(
            &[date(2010, 1, 1), date(1990, 1, 1)],
            date(2024, 1, 2),
        );
        // one under-18 and one 25-34: earlier label wins the tie
        assert_eq!(distribution.most_common(), Some(AgeBucket::Under18));
        assert_eq!(bucket_ages(&[], date(2024, 1, 1)).most_common(), None);
    }
}
