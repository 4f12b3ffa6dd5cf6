//! Typed wrappers over [`ApiClient`], one per API resource.
//!
//! Each wrapper borrows the client and only knows its paths and payload types;
//! auth, retry and error mapping stay in [`crate::api`].

mod briefings;
mod clients;
mod groups;
mod health;
mod integrations;
mod notes;
mod users;

pub use self::briefings::{Briefings, filter_by_client};
pub use self::clients::Clients;
pub use self::groups::Groups;
pub use self::integrations::Integrations;
pub use self::notes::Notes;
pub use self::users::Users;
use crate::api::ApiClient;

impl ApiClient {
    pub fn notes(&self) -> Notes<'_> {
        Notes::new(self)
    }

    pub fn clients(&self) -> Clients<'_> {
        Clients::new(self)
    }

    pub fn groups(&self) -> Groups<'_> {
        Groups::new(self)
    }

    pub fn briefings(&self) -> Briefings<'_> {
        Briefings::new(self)
    }

    pub fn integrations(&self) -> Integrations<'_> {
        Integrations::new(self)
    }

    pub fn users(&self) -> Users<'_> {
        Users::new(self)
    }
}

/// Joins a collection path and an id, percent-encoding the id.
fn item_path(collection: &str, id: &str) -> String {
    format!("{collection}/{}", urlencoding::encode(id))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_path_encodes_id() {
        assert_eq!(item_path("/notes", "abc123"), "/notes/abc123");
        assert_eq!(item_path("/clients", "a/b c"), "/clients/a%2Fb%20c");
    }
}
