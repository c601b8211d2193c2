/// Running cost and duration of a materialization.
///
/// Cost is the plain sum over every visited work order. Duration treats each sibling
/// group as running in parallel and the levels as running in series: only the longest
/// member of a group is added.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Totals {
    pub cost: f64,
    pub duration: f64,
}

impl Totals {
    pub fn add_cost(&mut self, cost: f64) {
        self.cost += cost;
    }

    /// Adds the longest duration of a sibling group. An empty group adds nothing.
    pub fn fold_sibling_group<I>(&mut self, durations: I)
    where
        I: IntoIterator<Item = f64>,
    {
        if let Some(longest) = durations.into_iter().reduce(f64::max) {
            self.duration += longest;
        }
    }
}
