use crate::Result;
use core::fmt::{Display, Formatter};
use ohno::bail;

/// Which repositories to report on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoQuery {
    /// One repository. Without an owner, it belongs to the authenticated user.
    Single { owner: Option<String>, name: String },

    /// All repositories of a user.
    User(String),

    /// All repositories of an organization.
    Organization(String),

    /// All repositories the authenticated user can access.
    Authenticated,
}

impl RepoQuery {
    /// Combine the user, organization, and repository options into a query, rejecting conflicts.
    pub fn new(user: Option<&str>, organization: Option<&str>, repo: Option<&str>) -> Result<Self> {
        if user.is_some() && organization.is_some() {
            bail!("specify either a user or an organization, not both");
        }

        let account = user.or(organization);

        let Some(repo) = repo else {
            return Ok(match (user, organization) {
                (Some(user), _) => Self::User(user.to_string()),
                (None, Some(organization)) => Self::Organization(organization.to_string()),
                (None, None) => Self::Authenticated,
            });
        };

        let (owner, name) = parse_repo(repo)?;
        if let (Some(owner), Some(account)) = (owner, account)
            && !owner.eq_ignore_ascii_case(account)
        {
            bail!("the owner of repository '{repo}' does not match '{account}'");
        }

        Ok(Self::Single {
            owner: owner.or(account).map(ToString::to_string),
            name: name.to_string(),
        })
    }

    /// Whether the query names exactly one repository.
    #[must_use]
    pub const fn is_single(&self) -> bool {
        matches!(self, Self::Single { .. })
    }
}

fn parse_repo(repo: &str) -> Result<(Option<&str>, &str)> {
    let mut parts = repo.split('/');
    let parsed = match (parts.next(), parts.next(), parts.next()) {
        (Some(name), None, None) => (None, name),
        (Some(owner), Some(name), None) if !owner.is_empty() => (Some(owner), name),
        _ => bail!("invalid repository '{repo}', expected NAME or OWNER/NAME"),
    };

    if parsed.1.is_empty() {
        bail!("invalid repository '{repo}', expected NAME or OWNER/NAME");
    }

    Ok(parsed)
}

impl Display for RepoQuery {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Single { owner: Some(owner), name } => write!(f, "repository '{owner}/{name}'"),
            Self::Single { owner: None, name } => write!(f, "repository '{name}'"),
            Self::User(user) => write!(f, "repositories of user '{user}'"),
            Self::Organization(organization) => write!(f, "repositories of organization '{organization}'"),
            Self::Authenticated => f.write_str("repositories of the authenticated user"),
        }
    }
}
