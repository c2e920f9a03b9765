//! Reporter adapters

use crate::{
    record::ReportRecord,
    traits::{Connectivity, Reporter},
};

/// Forwards records only while the network link is up
///
/// Records produced while the station is disassociated are dropped, not
/// queued: the next iteration will produce a fresher one.
pub struct ConnectedReporter<R, C> {
    inner: R,
    link: C,
    dropped: u32,
}

impl<R: Reporter, C: Connectivity> ConnectedReporter<R, C> {
    /// Wrap a reporter with a link check
    pub fn new(inner: R, link: C) -> Self {
        Self {
            inner,
            link,
            dropped: 0,
        }
    }

    /// Records dropped because the link was down
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    /// Borrow the wrapped reporter
    pub fn inner(&self) -> &R {
        &self.inner
    }
}

impl<R: Reporter, C: Connectivity> Reporter for ConnectedReporter<R, C> {
    fn report(&mut self, record: &ReportRecord) {
        if self.link.is_connected() {
            self.inner.report(record);
        } else {
            self.dropped = self.dropped.saturating_add(1);
            log_warn!("link down, dropping record ({} dropped)", self.dropped);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    #[derive(Default)]
    struct Count(u32);

    impl Reporter for Count {
        fn report(&mut self, _record: &ReportRecord) {
            self.0 += 1;
        }
    }

    struct Link(Cell<bool>);

    impl Connectivity for Link {
        fn is_connected(&self) -> bool {
            self.0.get()
        }
    }

    #[test]
    fn drops_while_disconnected() {
        let link = Link(Cell::new(true));
        let mut reporter = ConnectedReporter::new(Count::default(), &link);
        let record = ReportRecord {
            ammonia_ppm: 1.0,
            temperature_c: 20.0,
            humidity_pct: 50.0,
        };

        reporter.report(&record);
        link.0.set(false);
        reporter.report(&record);
        reporter.report(&record);
        link.0.set(true);
        reporter.report(&record);

        assert_eq!(reporter.inner().0, 2);
        assert_eq!(reporter.dropped(), 2);
    }
}
