use auth_services::types::{Account, Role};

/// Who is logged in: nobody, one patient or one caregiver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    /// No account is logged in
    #[default]
    LoggedOut,
    /// A patient is logged in
    Patient(Account),
    /// A caregiver is logged in
    Caregiver(Account),
}

impl Session {
    /// Replaces the session with the given account, keyed by its role
    pub fn login(&mut self, account: Account) {
        *self = match account.role {
            Role::Patient => Session::Patient(account),
            Role::Caregiver => Session::Caregiver(account),
        };
    }

    /// Ends the session, returning whether anyone was logged in
    pub fn logout(&mut self) -> bool {
        let was_logged_in = self.is_logged_in();
        *self = Session::LoggedOut;
        was_logged_in
    }

    /// Whether any account is logged in
    pub fn is_logged_in(&self) -> bool {
        !matches!(self, Session::LoggedOut)
    }

    /// The logged-in patient, if any
    pub fn patient(&self) -> Option<&Account> {
        match self {
            Session::Patient(account) => Some(account),
            _ => None,
        }
    }

    /// The logged-in caregiver, if any
    pub fn caregiver(&self) -> Option<&Account> {
        match self {
            Session::Caregiver(account) => Some(account),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(username: &str, role: Role) -> Account {
        Account {
            username: username.to_string(),
            salt: vec![0; 16],
            password_hash: String::new(),
            role,
        }
    }

    #[test]
    fn test_at_most_one_identity() {
        let mut session = Session::default();
        assert!(!session.is_logged_in());

        session.login(account("pat", Role::Patient));
        assert_eq!(session.patient().map(|a| a.username.as_str()), Some("pat"));
        assert!(session.caregiver().is_none());

        session.login(account("carol", Role::Caregiver));
        assert!(session.patient().is_none());
        assert_eq!(session.caregiver().map(|a| a.username.as_str()), Some("carol"));

        assert!(session.logout());
        assert!(!session.logout());
        assert_eq!(session, Session::LoggedOut);
    }
}
