//! Post-login destination policy
//!
//! Selecting where a freshly authenticated user lands is a pure function of
//! the token claims and the configured master username. Precedence, first
//! match wins: master account, then admin role, then the default user
//! dashboard. The temporary-password override lives one level up in the
//! bootstrapper because it applies before claims are even decoded.

use crate::session::claims::DecodedClaims;

/// Named view the user is routed to after login
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// Profile selection screen, reserved for the master account
    ProfileSelector,
    AdminDashboard,
    UserDashboard,
    /// Forced password change before normal access is granted
    ChangePassword,
}

impl Destination {
    /// Route path as served by the portal frontend
    pub fn route(&self) -> &'static str {
        match self {
            Destination::ProfileSelector => "/selecao-perfil",
            Destination::AdminDashboard => "/dashboard/administrador",
            Destination::UserDashboard => "/dashboard/usuario",
            Destination::ChangePassword => "/alterar-senha",
        }
    }
}

/// Select the post-login destination from decoded claims.
///
/// Pure: identical `(decoded, master_username)` inputs always yield the same
/// destination. The master comparison is case-insensitive on both sides.
pub fn choose_destination(decoded: &DecodedClaims, master_username: &str) -> Destination {
    let username = decoded.normalized_username();
    let role = decoded.normalized_role();

    if username == master_username.to_lowercase() {
        Destination::ProfileSelector
    } else if role == "admin" {
        Destination::AdminDashboard
    } else {
        Destination::UserDashboard
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::claims::Claims;
    use proptest::prelude::*;

    fn flat(username: Option<&str>, role: Option<&str>) -> DecodedClaims {
        DecodedClaims::Flat {
            claims: Claims {
                username: username.map(str::to_string),
                user: None,
                role: role.map(str::to_string),
            },
            subject: None,
        }
    }

    const MASTER: &str = "adm.wellington";

    #[test]
    fn test_master_account_goes_to_profile_selector() {
        let decoded = flat(Some("adm.wellington"), Some("user"));
        assert_eq!(choose_destination(&decoded, MASTER), Destination::ProfileSelector);
    }

    #[test]
    fn test_master_match_is_case_insensitive() {
        let decoded = flat(Some("ADM.Wellington"), Some("admin"));
        assert_eq!(choose_destination(&decoded, MASTER), Destination::ProfileSelector);

        // also when the configured value carries uppercase
        let decoded = flat(Some("adm.wellington"), None);
        assert_eq!(
            choose_destination(&decoded, "ADM.WELLINGTON"),
            Destination::ProfileSelector
        );
    }

    #[test]
    fn test_admin_role_goes_to_admin_dashboard() {
        let decoded = flat(Some("jdoe"), Some("admin"));
        assert_eq!(choose_destination(&decoded, MASTER), Destination::AdminDashboard);

        let decoded = flat(Some("jdoe"), Some("ADMIN"));
        assert_eq!(choose_destination(&decoded, MASTER), Destination::AdminDashboard);
    }

    #[test]
    fn test_everyone_else_goes_to_user_dashboard() {
        let decoded = flat(Some("jdoe"), Some("user"));
        assert_eq!(choose_destination(&decoded, MASTER), Destination::UserDashboard);

        let decoded = flat(Some("jdoe"), None);
        assert_eq!(choose_destination(&decoded, MASTER), Destination::UserDashboard);

        let decoded = flat(None, None);
        assert_eq!(choose_destination(&decoded, MASTER), Destination::UserDashboard);
    }

    #[test]
    fn test_nested_subject_claims_route_the_same() {
        let decoded = DecodedClaims::NestedSubject(Claims {
            username: Some("jdoe".to_string()),
            user: None,
            role: Some("admin".to_string()),
        });
        assert_eq!(choose_destination(&decoded, MASTER), Destination::AdminDashboard);
    }

    #[test]
    fn test_scalar_subject_can_match_master() {
        let decoded = DecodedClaims::Flat {
            claims: Claims::default(),
            subject: Some("Adm.Wellington".to_string()),
        };
        assert_eq!(choose_destination(&decoded, MASTER), Destination::ProfileSelector);
    }

    #[test]
    fn test_routes() {
        assert_eq!(Destination::ProfileSelector.route(), "/selecao-perfil");
        assert_eq!(Destination::AdminDashboard.route(), "/dashboard/administrador");
        assert_eq!(Destination::UserDashboard.route(), "/dashboard/usuario");
        assert_eq!(Destination::ChangePassword.route(), "/alterar-senha");
    }

    proptest! {
        /// Identical inputs always produce identical destinations
        #[test]
        fn prop_destination_is_pure(
            username in proptest::option::of(".{0,24}"),
            role in proptest::option::of(".{0,24}"),
            master in ".{1,24}",
        ) {
            let decoded = flat(username.as_deref(), role.as_deref());
            prop_assert_eq!(
                choose_destination(&decoded, &master),
                choose_destination(&decoded, &master)
            );
        }

        /// The master override never depends on the letter case of either side
        #[test]
        fn prop_master_override_ignores_case(master in "[a-zA-Z.]{1,16}") {
            let decoded = flat(Some(&master.to_uppercase()), Some("user"));
            prop_assert_eq!(
                choose_destination(&decoded, &master.to_lowercase()),
                Destination::ProfileSelector
            );
        }
    }
}
