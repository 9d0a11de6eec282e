use std::collections::{BTreeMap, HashMap};

pub type LabelName = String;

pub type LabelValue = String;

pub type Labels = HashMap<LabelName, LabelValue>;

pub trait LabelsTrait {
    /// Labels ordered by name, for stable rendering.
    fn sorted(&self) -> BTreeMap<&LabelName, &LabelValue>;

    fn format(&self) -> String;
}

impl LabelsTrait for Labels {
    fn sorted(&self) -> BTreeMap<&LabelName, &LabelValue> {
        self.iter().collect()
    }

    fn format(&self) -> String {
        let pairs = self
            .sorted()
            .into_iter()
            .map(|(name, value)| format!("{}=\"{}\"", name, value))
            .collect::<Vec<_>>();
        format!("{{{}}}", pairs.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_sorts_by_name() {
        let mut labels = Labels::new();
        labels.insert("region".into(), "us".into());
        labels.insert("env".into(), "prod".into());

        assert_eq!(labels.format(), "{env=\"prod\",region=\"us\"}");
        assert_eq!(Labels::new().format(), "{}");
    }
}
