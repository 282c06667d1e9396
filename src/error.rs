use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StatsError>;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("{0}")]
    InvalidDelta(String),
    #[error("cannot get stat from folder (not a repository): {}", .0.display())]
    NotARepository(PathBuf),
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: Box<regex::Error>,
    },
    #[error("too much data to display in this terminal width ({weeks} weeks need {needed} columns, have {width})")]
    TerminalTooNarrow { weeks: u32, needed: u32, width: u16 },
    #[error("every scan unit failed ({0} units)")]
    AllUnitsFailed(usize),
    #[error("Git repository error: {0}")]
    GitRepo(String),
    #[error("Object find with conversion error: {0}")]
    ObjectFindConv(#[from] Box<gix::object::find::existing::with_conversion::Error>),
    #[error("Object find error: {0}")]
    ObjectFind(#[from] Box<gix::object::find::existing::Error>),
    #[error("Signature time error: {0}")]
    SignatureTime(#[from] gix::date::parse::Error),
    #[error("Object decode error: {0}")]
    ObjectDecode(#[from] Box<gix::objs::decode::Error>),
    #[error("Commit error: {0}")]
    Commit(#[from] Box<gix::object::commit::Error>),
    #[error("Head peel error: {0}")]
    HeadPeel(#[from] Box<gix::head::peel::to_commit::Error>),
    #[error("Reference find error: {0}")]
    RefFind(#[from] Box<gix::reference::find::existing::Error>),
    #[error("Diff tree to tree error: {0}")]
    DiffTreeToTree(#[from] Box<gix::repository::diff_tree_to_tree::Error>),
    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<gix::object::find::existing::with_conversion::Error> for StatsError {
    fn from(err: gix::object::find::existing::with_conversion::Error) -> Self {
        StatsError::ObjectFindConv(Box::new(err))
    }
}

impl From<gix::object::find::existing::Error> for StatsError {
    fn from(err: gix::object::find::existing::Error) -> Self {
        StatsError::ObjectFind(Box::new(err))
    }
}

impl From<gix::objs::decode::Error> for StatsError {
    fn from(err: gix::objs::decode::Error) -> Self {
        StatsError::ObjectDecode(Box::new(err))
    }
}

impl From<gix::object::commit::Error> for StatsError {
    fn from(err: gix::object::commit::Error) -> Self {
        StatsError::Commit(Box::new(err))
    }
}

impl From<gix::head::peel::to_commit::Error> for StatsError {
    fn from(err: gix::head::peel::to_commit::Error) -> Self {
        StatsError::HeadPeel(Box::new(err))
    }
}

impl From<gix::reference::find::existing::Error> for StatsError {
    fn from(err: gix::reference::find::existing::Error) -> Self {
        StatsError::RefFind(Box::new(err))
    }
}

impl From<gix::repository::diff_tree_to_tree::Error> for StatsError {
    fn from(err: gix::repository::diff_tree_to_tree::Error) -> Self {
        StatsError::DiffTreeToTree(Box::new(err))
    }
}

impl StatsError {
    /// Errors that stop the whole invocation instead of a single scan unit.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            StatsError::InvalidPattern { .. } | StatsError::TerminalTooNarrow { .. }
        )
    }
}
