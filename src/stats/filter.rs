use crate::error::{Result, StatsError};
use regex::Regex;

/// Comma separated identities; a token containing `@` is an email, anything
/// else is an exact display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorFilter {
    emails: Vec<String>,
    names: Vec<String>,
}

impl AuthorFilter {
    /// `None` matches every author.
    pub fn parse(email_or_username: Option<&str>) -> Option<Self> {
        let raw = email_or_username?;
        let (emails, names): (Vec<String>, Vec<String>) = raw
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .partition(|token| token.contains('@'));
        Some(Self { emails, names })
    }

    pub fn matches(&self, name: &str, email: &str) -> bool {
        self.emails.iter().any(|e| e == email) || self.names.iter().any(|n| n == name)
    }
}

/// Exclude patterns win over include patterns; without include patterns
/// every remaining path is kept.
#[derive(Debug, Clone)]
pub struct PathFilter {
    exclude: Vec<Regex>,
    include: Vec<Regex>,
}

impl PathFilter {
    pub fn new(exclude: &[String], include: &[String]) -> Result<Self> {
        Ok(Self {
            exclude: compile(exclude)?,
            include: compile(include)?,
        })
    }

    pub fn keeps(&self, path: &str) -> bool {
        if self.exclude.iter().any(|re| re.is_match(path)) {
            return false;
        }
        self.include.is_empty() || self.include.iter().any(|re| re.is_match(path))
    }
}

fn compile(patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|pattern| {
            Regex::new(pattern).map_err(|source| StatsError::InvalidPattern {
                pattern: pattern.clone(),
                source: Box::new(source),
            })
        })
        .collect()
}
