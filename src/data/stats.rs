use std::collections::BTreeMap;

use super::model::{Pokemon, Stat};

/// Mean of every stat over `records`.
///
/// Absent values are left out of both sum and count, so a missing stat never
/// drags the mean towards zero. A stat with no present values (including the
/// empty input) averages to `0.0`.
pub fn average_stats<'a, I>(records: I) -> BTreeMap<Stat, f64>
where
    I: IntoIterator<Item = &'a Pokemon>,
{
    let mut sums = [(0u64, 0usize); 6];
    for pokemon in records {
        for (acc, stat) in sums.iter_mut().zip(Stat::ALL) {
            if let Some(v) = pokemon.stat(stat) {
                acc.0 += u64::from(v);
                acc.1 += 1;
            }
        }
    }

    Stat::ALL
        .into_iter()
        .zip(sums)
        .map(|(stat, (sum, count))| {
            let mean = if count > 0 {
                sum as f64 / count as f64
            } else {
                0.0
            };
            (stat, mean)
        })
        .collect()
}

/// Sum of all present stats ("base stat total").
pub fn stat_total(pokemon: &Pokemon) -> u32 {
    Stat::ALL.into_iter().filter_map(|s| pokemon.stat(s)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::pokemon;

    #[test]
    fn empty_input_averages_to_zero() {
        let avg = average_stats(std::iter::empty());
        assert_eq!(avg.len(), 6);
        assert!(avg.values().all(|&v| v == 0.0));
    }

    #[test]
    fn single_record_average_is_itself() {
        let p = pokemon(1, "Bulbasaur", &["Grass"], [Some(45), Some(49), Some(49), Some(65), Some(65), Some(45)]);
        let avg = average_stats([&p]);
        for stat in Stat::ALL {
            assert_eq!(avg[&stat], f64::from(p.stat(stat).unwrap()));
        }
    }

    #[test]
    fn absent_values_leave_the_denominator() {
        let partial = pokemon(1, "Partial", &["Grass"], [Some(45), Some(49), Some(49), None, None, Some(45)]);
        let full = pokemon(2, "Full", &["Grass"], [Some(55), Some(51), Some(51), Some(80), Some(70), Some(55)]);
        let avg = average_stats([&partial, &full]);
        assert_eq!(avg[&Stat::Hp], 50.0);
        assert_eq!(avg[&Stat::SpecialAttack], 80.0);
        assert_eq!(avg[&Stat::SpecialDefense], 70.0);

        let only_partial = average_stats([&partial]);
        assert_eq!(only_partial[&Stat::SpecialAttack], 0.0);
        assert_eq!(only_partial[&Stat::Speed], 45.0);
    }

    #[test]
    fn total_skips_absent() {
        let p = pokemon(1, "Partial", &["Grass"], [Some(45), Some(49), Some(49), None, None, Some(45)]);
        assert_eq!(stat_total(&p), 188);
    }
}
