use std::collections::HashMap;

use super::{DecoratorKind, LineDecorator};
use crate::error::DecorationError;
use crate::pipeline::FileSummary;
use crate::record::LineRecord;
use crate::report::{Changeset, ChangesetMark};

/// Source of blame information for a file
pub trait BlameProvider {
    fn changeset_for_line(&self, line: usize) -> Option<&Changeset>;
}

/// Blame of one file, keyed by line
#[derive(Debug, Clone, Default)]
pub struct ScmInfo {
    changesets: HashMap<usize, Changeset>,
}

impl ScmInfo {
    pub fn len(&self) -> usize {
        self.changesets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changesets.is_empty()
    }
}

impl FromIterator<ChangesetMark> for ScmInfo {
    fn from_iter<T: IntoIterator<Item = ChangesetMark>>(iter: T) -> Self {
        Self {
            changesets: iter
                .into_iter()
                .map(|mark| (mark.line, mark.changeset))
                .collect(),
        }
    }
}

impl BlameProvider for ScmInfo {
    fn changeset_for_line(&self, line: usize) -> Option<&Changeset> {
        self.changesets.get(&line)
    }
}

/// Copies blame onto each line and tracks the most recent changes of the file
pub struct ScmDecorator<P: BlameProvider> {
    blame: P,
    latest_change: Option<Changeset>,
    latest_change_with_revision: Option<Changeset>,
}

impl<P: BlameProvider> ScmDecorator<P> {
    pub fn new(blame: P) -> Self {
        Self {
            blame,
            latest_change: None,
            latest_change_with_revision: None,
        }
    }

    pub fn latest_change(&self) -> Option<&Changeset> {
        self.latest_change.as_ref()
    }

    pub fn latest_change_with_revision(&self) -> Option<&Changeset> {
        self.latest_change_with_revision.as_ref()
    }
}

/// Replace `latest` with `changeset` if it is strictly more recent
fn keep_latest(latest: &mut Option<Changeset>, changeset: &Changeset) {
    if latest.as_ref().map_or(true, |current| changeset.date > current.date) {
        *latest = Some(changeset.clone());
    }
}

impl<P: BlameProvider> LineDecorator for ScmDecorator<P> {
    fn kind(&self) -> DecoratorKind {
        DecoratorKind::Scm
    }

    fn decorate(&mut self, line: usize, record: &mut LineRecord) -> Result<(), DecorationError> {
        let Some(changeset) = self.blame.changeset_for_line(line) else {
            return Ok(());
        };

        if let Some(author) = &changeset.author {
            record.scm_author = Some(author.clone());
        }
        if let Some(revision) = &changeset.revision {
            record.scm_revision = Some(revision.clone());
        }
        record.scm_date = Some(changeset.date);

        keep_latest(&mut self.latest_change, changeset);
        if changeset.revision.is_some() {
            keep_latest(&mut self.latest_change_with_revision, changeset);
        }
        Ok(())
    }

    fn finish(&mut self, summary: &mut FileSummary) {
        summary.latest_change = self.latest_change.take();
        summary.latest_change_with_revision = self.latest_change_with_revision.take();
    }
}
