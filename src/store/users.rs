use std::collections::HashMap;

use uuid::Uuid;

use crate::models::UserModel;

/// Read-only view of the identity subsystem's user records, established
/// at process start. The ledger resolves identities and assignment
/// targets here; it never writes user state.
pub struct UserDirectory {
    users: HashMap<Uuid, UserModel>,
}

impl UserDirectory {
    pub fn new(users: impl IntoIterator<Item = UserModel>) -> Self {
        Self {
            users: users.into_iter().map(|u| (u.id, u)).collect(),
        }
    }

    pub fn lookup(&self, id: Uuid) -> Option<&UserModel> {
        self.users.get(&id)
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.users.contains_key(&id)
    }
}
