/// Static identity block served by the profile endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub email: String,
    pub name: String,
    pub stack: String,
}

/// A fully assembled profile, constructed fresh per request and never stored.
#[derive(Debug, Clone)]
pub struct Profile {
    pub user: UserIdentity,
    pub timestamp: String,
    pub fact: String,
}
