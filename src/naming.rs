use std::collections::HashSet;

/// Split `name_<digits>` into `("name", digits)`.
///
/// A suffix that does not fit in a `u64` does not count as one.
pub fn split_suffix(name: &str) -> Option<(&str, u64)> {
    let (prefix, digits) = name.rsplit_once('_')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok().map(|n| (prefix, n))
}

/// First free `prefix_<n>` with `n >= start`, or `None` once `n` would
/// pass `u64::MAX`.
fn probe(prefix: &str, start: u64, existing: &HashSet<String>) -> Option<String> {
    let mut n = start;
    loop {
        let candidate = format!("{prefix}_{n}");
        if !existing.contains(&candidate) {
            return Some(candidate);
        }
        n = n.checked_add(1)?;
    }
}

/// A name for a copy of `base` that is not in `existing`.
///
/// For example:
/// ```
/// # use std::collections::HashSet;
/// # use reda_vsig::naming::unique_name;
/// let existing: HashSet<String> = ["adder_0".to_string(), "adder_1".to_string()].into();
/// assert_eq!(unique_name("adder_0", &existing), "adder_2");
/// assert_eq!(unique_name("mux", &existing), "mux_1");
/// ```
///
/// When counting up from the suffix runs past `u64::MAX`, the whole of
/// `base` becomes the prefix and counting restarts at `_1`.
pub fn unique_name(base: &str, existing: &HashSet<String>) -> String {
    split_suffix(base)
        .and_then(|(prefix, n)| probe(prefix, n.checked_add(1)?, existing))
        .or_else(|| probe(base, 1, existing))
        .unwrap_or_else(|| unique_name(&format!("{base}_"), existing))
}

/// The first free `module_0`, `module_1`, … for a fresh instantiation.
pub fn first_instance_name(module: &str, existing: &HashSet<String>) -> String {
    probe(module, 0, existing).unwrap_or_else(|| unique_name(module, existing))
}

/// The set of instance names in use.
///
/// Picking a name and recording it happen in one `&mut self` call, so two
/// instantiations can never be handed the same name. Share it between
/// threads behind a `Mutex`.
#[derive(Clone, Debug, Default)]
pub struct InstanceNamer {
    names: HashSet<String>,
}

impl InstanceNamer {
    /// Create a namer that will never hand out any of `names`.
    pub fn with_prev_defined_names(names: HashSet<String>) -> Self {
        InstanceNamer { names }
    }

    pub fn add_names<I: IntoIterator<Item = String>>(&mut self, names: I) {
        self.names.extend(names)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Name a new instance of `module`: `module_0`, `module_1`, …
    pub fn instantiate(&mut self, module: &str) -> String {
        let name = first_instance_name(module, &self.names);
        self.names.insert(name.clone());
        name
    }

    /// Name a copy of `instance`, counting up from its own suffix.
    pub fn duplicate(&mut self, instance: &str) -> String {
        let name = unique_name(instance, &self.names);
        self.names.insert(name.clone());
        name
    }

    /// Make `name` available again. Returns whether it was in use.
    pub fn release(&mut self, name: &str) -> bool {
        self.names.remove(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::sync::{Arc, Mutex};

    fn set(names: &[&str]) -> HashSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_split_suffix() {
        assert_eq!(split_suffix("adder_12"), Some(("adder", 12)));
        assert_eq!(split_suffix("a_b_3"), Some(("a_b", 3)));
        assert_eq!(split_suffix("a__3"), Some(("a_", 3)));
        assert_eq!(split_suffix("_7"), Some(("", 7)));
        assert_eq!(split_suffix("adder"), None);
        assert_eq!(split_suffix("adder_"), None);
        assert_eq!(split_suffix("adder_1a"), None);
        assert_eq!(split_suffix("adder3"), None);
        assert_eq!(split_suffix("x_99999999999999999999999"), None);
    }

    #[test]
    fn test_unique_name() {
        assert_eq!(unique_name("adder_0", &set(&["adder_0", "adder_1"])), "adder_2");
        assert_eq!(unique_name("mux", &set(&[])), "mux_1");
        assert_eq!(unique_name("mux", &set(&["mux", "mux_1", "mux_2"])), "mux_3");
        // counts up from the source's own suffix, gaps below are not reused
        assert_eq!(unique_name("alu_5", &set(&["alu_0", "alu_5"])), "alu_6");
        assert_eq!(unique_name("alu_5", &set(&["alu_6", "alu_7"])), "alu_8");
    }

    #[test]
    fn test_unique_name_huge_suffix() {
        let max = format!("ram_{}", u64::MAX);
        assert_eq!(unique_name(&max, &set(&[])), format!("{max}_1"));
        assert_eq!(
            unique_name("ram_99999999999999999999999", &set(&[])),
            "ram_99999999999999999999999_1"
        );
    }

    #[test]
    fn test_unique_name_suffix_runs_out() {
        let below_max = format!("x_{}", u64::MAX - 1);
        let max = format!("x_{}", u64::MAX);
        assert_eq!(unique_name(&below_max, &set(&[])), max);
        // the next number up is taken and there is none after it
        assert_eq!(unique_name(&below_max, &set(&[max.as_str()])), format!("{below_max}_1"));
        let first_copy = format!("{below_max}_1");
        assert_eq!(
            unique_name(&below_max, &set(&[max.as_str(), first_copy.as_str()])),
            format!("{below_max}_2")
        );

        let mut namer = InstanceNamer::with_prev_defined_names(set(&[below_max.as_str(), max.as_str()]));
        assert_eq!(namer.duplicate(&below_max), format!("{below_max}_1"));
        assert_eq!(namer.duplicate(&max), format!("{max}_1"));
    }

    #[test]
    fn test_first_instance_name() {
        assert_eq!(first_instance_name("uart", &set(&[])), "uart_0");
        assert_eq!(first_instance_name("uart", &set(&["uart_0", "uart_2"])), "uart_1");
    }

    #[test]
    fn test_namer_instantiate_and_duplicate() {
        let mut namer = InstanceNamer::default();
        assert_eq!(namer.instantiate("fifo"), "fifo_0");
        assert_eq!(namer.instantiate("fifo"), "fifo_1");
        assert_eq!(namer.duplicate("fifo_0"), "fifo_2");
        assert_eq!(namer.duplicate("fifo_0"), "fifo_3");
        assert_eq!(namer.len(), 4);

        assert!(namer.release("fifo_1"));
        assert!(!namer.release("fifo_1"));
        assert_eq!(namer.instantiate("fifo"), "fifo_1");
    }

    #[test]
    fn test_namer_respects_predefined_names() {
        let mut namer = InstanceNamer::with_prev_defined_names(set(&["cpu_0"]));
        namer.add_names(vec!["cpu_1".to_string()]);
        assert!(namer.contains("cpu_1"));
        assert_eq!(namer.instantiate("cpu"), "cpu_2");
    }

    #[test]
    fn test_namer_behind_mutex() {
        let namer = Arc::new(Mutex::new(InstanceNamer::default()));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let namer = Arc::clone(&namer);
                std::thread::spawn(move || {
                    (0..25)
                        .map(|_| namer.lock().unwrap().instantiate("core"))
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        let names: HashSet<String> = handles.into_iter().flat_map(|h| h.join().unwrap()).collect();
        assert_eq!(names.len(), 200);
        assert_eq!(namer.lock().unwrap().len(), 200);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_duplicates_never_collide(
            base in "[a-z]{1,6}(_[0-9]{1,3})?",
            taken in proptest::collection::hash_set("[a-z]{1,6}_[0-9]{1,2}", 0..20),
            copies in 1usize..30,
        ) {
            let mut namer = InstanceNamer::with_prev_defined_names(taken.clone());
            namer.add_names(vec![base.clone()]);
            let mut fresh = HashSet::new();
            for _ in 0..copies {
                let name = namer.duplicate(&base);
                prop_assert!(name != base);
                prop_assert!(!taken.contains(&name));
                prop_assert!(fresh.insert(name));
            }
        }

        #[test]
        fn prop_unique_name_is_fresh(
            base in "[a-z_]{1,6}[0-9]{0,2}",
            taken in proptest::collection::hash_set("[a-z_]{1,6}[0-9]{0,2}", 0..30),
        ) {
            prop_assert!(!taken.contains(&unique_name(&base, &taken)));
            prop_assert!(!taken.contains(&first_instance_name(&base, &taken)));
        }
    }
}
