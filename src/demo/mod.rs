//! Fixed demonstration flows
//!
//! Each flow initializes its schema, loads a fixed set of sample rows, runs
//! the listings and prints everything. Store errors are printed and counted,
//! never propagated: a demo always runs to the end.

pub mod blog;
pub mod library;

pub use blog::run_blog_demo;
pub use library::run_library_demo;

use crate::model::RowId;
use crate::{Error, Result, ui};

/// Tally of write outcomes over one demo run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DemoReport {
    pub inserted: usize,
    pub duplicates: usize,
    pub missing: usize,
    pub failures: usize,
}

impl DemoReport {
    pub fn errors(&self) -> usize {
        self.duplicates + self.missing + self.failures
    }

    fn record_error(&mut self, err: &Error) {
        match err {
            Error::Duplicate { .. } => self.duplicates += 1,
            Error::NotFound { .. } => self.missing += 1,
            _ => self.failures += 1,
        }
    }

    /// Print the outcome of a write and keep its id when it succeeded
    fn write(&mut self, what: &str, result: Result<RowId>) -> Option<RowId> {
        match result {
            Ok(id) => {
                self.inserted += 1;
                ui::success(&format!("{what} added (id {id})"));
                Some(id)
            }
            Err(err) => {
                self.record_error(&err);
                ui::error(&format!("{what}: {err}"));
                None
            }
        }
    }

    /// Like [`DemoReport::write`], but a duplicate falls back to `lookup`
    /// so later rows can still reference the existing one.
    fn write_or_reuse<F>(&mut self, what: &str, result: Result<RowId>, lookup: F) -> Option<Sample>
    where
        F: FnOnce() -> Result<Option<RowId>>,
    {
        match result {
            Ok(id) => {
                self.inserted += 1;
                ui::success(&format!("{what} added (id {id})"));
                Some(Sample { id, fresh: true })
            }
            Err(err) if err.is_duplicate() => {
                self.record_error(&err);
                ui::warn(&format!("{what} already exists, reusing it"));
                match lookup() {
                    Ok(Some(id)) => Some(Sample { id, fresh: false }),
                    Ok(None) => None,
                    Err(lookup_err) => {
                        self.record_error(&lookup_err);
                        ui::error(&format!("{what}: {lookup_err}"));
                        None
                    }
                }
            }
            Err(err) => {
                self.record_error(&err);
                ui::error(&format!("{what}: {err}"));
                None
            }
        }
    }

    /// Print a failed read; the listing is treated as empty
    fn read<T>(&mut self, what: &str, result: Result<Vec<T>>) -> Vec<T> {
        result.unwrap_or_else(|err| {
            self.record_error(&err);
            ui::error(&format!("{what}: {err}"));
            Vec::new()
        })
    }
}

/// A sample row id and whether this run created it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Sample {
    id: RowId,
    fresh: bool,
}

/// Ids of samples that were all created in this run, or `None`
fn all_fresh<const N: usize>(samples: [Option<Sample>; N]) -> Option<[RowId; N]> {
    let mut ids = [0; N];
    for (slot, sample) in ids.iter_mut().zip(samples) {
        match sample {
            Some(Sample { id, fresh: true }) => *slot = id,
            _ => return None,
        }
    }
    Some(ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_fresh() {
        let a = Some(Sample { id: 1, fresh: true });
        let b = Some(Sample { id: 2, fresh: true });
        let stale = Some(Sample { id: 3, fresh: false });

        assert_eq!(all_fresh([a, b]), Some([1, 2]));
        assert_eq!(all_fresh([a, stale]), None);
        assert_eq!(all_fresh([a, None]), None);
    }

    #[test]
    fn test_report_counts_by_kind() {
        let mut report = DemoReport::default();
        report.write("ok", Ok(7));
        report.write("dup", Err(Error::Duplicate { entity: "user", detail: "x".into() }));
        report.write("missing", Err(Error::not_found("user", 9)));
        report.write("io", Err(Error::Config("bad".into())));

        assert_eq!(
            report,
            DemoReport {
                inserted: 1,
                duplicates: 1,
                missing: 1,
                failures: 1
            }
        );
        assert_eq!(report.errors(), 3);
    }

    #[test]
    fn test_write_or_reuse_looks_up_duplicates() {
        let mut report = DemoReport::default();
        let dup = Err(Error::Duplicate { entity: "genre", detail: "Novel".into() });
        let sample = report.write_or_reuse("genre", dup, || Ok(Some(5)));
        assert_eq!(sample, Some(Sample { id: 5, fresh: false }));
        assert_eq!(report.duplicates, 1);
    }
}
