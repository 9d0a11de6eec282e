use crate::model::{Labels, Sample, Snapshot};
use crate::parser::ast::{Constraints, Selector};

/// Subset match: every constrained label must be present with an equal value.
/// Labels the constraints don't mention are ignored.
pub fn labels_match(constraints: &Constraints, labels: &Labels) -> bool {
    constraints
        .iter()
        .all(|(name, value)| labels.get(name).map_or(false, |actual| actual == value))
}

/// Samples of `selector`'s metric that satisfy its constraints, in snapshot order.
pub fn select<'a>(
    snapshot: &'a Snapshot,
    selector: &'a Selector,
) -> impl Iterator<Item = &'a Sample> + 'a {
    snapshot
        .samples(selector.name())
        .iter()
        .filter(move |sample| labels_match(selector.constraints(), sample.labels()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;

    fn labels(pairs: &[(&str, &str)]) -> Labels {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn constraints(pairs: &[(&str, &str)]) -> Constraints {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_labels_match() {
        let sample_labels = labels(&[("env", "prod"), ("region", "us")]);

        #[rustfmt::skip]
        let tests = [
            (vec![], true),
            (vec![("env", "prod")], true),
            (vec![("env", "prod"), ("region", "us")], true),
            (vec![("env", "dev")], false),
            (vec![("env", "prod"), ("region", "eu")], false),
            (vec![("zone", "a")], false),
            (vec![("env", "")], false),
        ];

        for (pairs, expected) in &tests {
            assert_eq!(
                labels_match(&constraints(pairs), &sample_labels),
                *expected,
                "while matching {:?}",
                pairs
            );
        }
    }

    #[test]
    fn test_select_keeps_snapshot_order() {
        let snapshot = Snapshot::from_records(
            "http://localhost",
            0,
            vec![
                Record("cpu".into(), labels(&[("env", "prod"), ("core", "0")]), 0.5),
                Record("cpu".into(), labels(&[("env", "dev"), ("core", "0")]), 0.9),
                Record("cpu".into(), labels(&[("env", "prod"), ("core", "1")]), 0.7),
            ],
        );

        let selector = Selector::new("cpu", constraints(&[("env", "prod")]));
        let values = select(&snapshot, &selector)
            .map(Sample::value)
            .collect::<Vec<_>>();
        assert_eq!(values, vec![0.5, 0.7]);

        let selector = Selector::new("missing_metric", Constraints::new());
        assert_eq!(select(&snapshot, &selector).count(), 0);
    }
}
