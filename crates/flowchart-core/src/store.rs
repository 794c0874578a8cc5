//! The chart store: owner of the session's canonical chart.

use crate::chart::Chart;

/// Holds the single chart value for an editor session.
///
/// [`ChartStore::apply`] is the only way to change the chart.
#[derive(Debug, Clone, Default)]
pub struct ChartStore {
    chart: Chart,
    /// Number of transitions that changed the chart.
    revision: u64,
}

impl ChartStore {
    /// Create a store holding `chart`.
    pub fn new(chart: Chart) -> Self {
        Self { chart, revision: 0 }
    }

    /// Current chart.
    pub fn get(&self) -> &Chart {
        &self.chart
    }

    /// Owned copy of the current chart.
    pub fn snapshot(&self) -> Chart {
        self.chart.clone()
    }

    /// Revision counter, bumped whenever a transition changes the chart.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace the chart with the result of `transition`.
    ///
    /// Change is detected by comparing the whole chart, which is linear in
    /// chart size. Transitions refuse non-finite coordinates, so a stored
    /// chart always compares equal to itself and a no-op leaves the revision
    /// untouched.
    pub fn apply<F>(&mut self, transition: F) -> &Chart
    where
        F: FnOnce(&Chart) -> Chart,
    {
        let next = transition(&self.chart);
        if next != self.chart {
            self.chart = next;
            self.revision += 1;
        }
        &self.chart
    }

    /// Take the chart out of the store.
    pub fn into_inner(self) -> Chart {
        self.chart
    }
}
