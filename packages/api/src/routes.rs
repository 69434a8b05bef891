//! Page table and the route guard.

use crate::session::SessionSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    Discover,
    Clubs,
    Leaderboard,
    Login,
    Signup,
    Requests,
    Admin,
    Profile,
}

/// Navigation bar entries, in order.
pub const NAV_LINKS: [Page; 7] = [
    Page::Home,
    Page::Discover,
    Page::Clubs,
    Page::Requests,
    Page::Leaderboard,
    Page::Admin,
    Page::Profile,
];

impl Page {
    pub const ALL: [Page; 9] = [
        Page::Home,
        Page::Discover,
        Page::Clubs,
        Page::Leaderboard,
        Page::Login,
        Page::Signup,
        Page::Requests,
        Page::Admin,
        Page::Profile,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::Discover => "/discover",
            Page::Clubs => "/clubs",
            Page::Leaderboard => "/leaderboard",
            Page::Login => "/login",
            Page::Signup => "/signup",
            Page::Requests => "/requests",
            Page::Admin => "/admin",
            Page::Profile => "/profile",
        }
    }

    /// Match a location path, ignoring query, fragment and a trailing slash.
    pub fn from_path(path: &str) -> Option<Page> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        Page::ALL.into_iter().find(|page| page.path() == path)
    }

    pub fn requires_auth(&self) -> bool {
        matches!(self, Page::Requests | Page::Admin | Page::Profile)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Discover => "Discover",
            Page::Clubs => "Clubs",
            Page::Leaderboard => "Leaderboard",
            Page::Login => "Sign In",
            Page::Signup => "Sign Up",
            Page::Requests => "Requests",
            Page::Admin => "Admin",
            Page::Profile => "My Profile",
        }
    }
}

/// Outcome of the route guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Session not resolved yet; render nothing.
    Pending,
    Render,
    Redirect(Page),
}

/// Decide whether `page` may render for this session.
pub fn guard(page: Page, session: &SessionSnapshot) -> Access {
    if !page.requires_auth() {
        return Access::Render;
    }
    if session.is_loading {
        return Access::Pending;
    }
    if session.is_signed_in() {
        Access::Render
    } else {
        Access::Redirect(Page::Login)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AuthUser;

    fn ann() -> AuthUser {
        AuthUser {
            uid: "u1".into(),
            email: Some("ann@college.edu".into()),
            display_name: None,
            photo_url: None,
        }
    }

    #[test]
    fn test_unauthenticated_profile_redirects_to_login() {
        let access = guard(Page::from_path("/profile").unwrap(), &SessionSnapshot::signed_out());
        assert_eq!(access, Access::Redirect(Page::Login));
        assert_eq!(Page::Login.path(), "/login");
    }

    #[test]
    fn test_guarded_pages() {
        for page in Page::ALL {
            let signed_out = guard(page, &SessionSnapshot::signed_out());
            let signed_in = guard(page, &SessionSnapshot::signed_in(ann()));
            assert_eq!(signed_in, Access::Render);
            if page.requires_auth() {
                assert_eq!(signed_out, Access::Redirect(Page::Login));
            } else {
                assert_eq!(signed_out, Access::Render);
            }
        }
    }

    #[test]
    fn test_pending_while_loading() {
        assert_eq!(guard(Page::Admin, &SessionSnapshot::default()), Access::Pending);
        assert_eq!(guard(Page::Clubs, &SessionSnapshot::default()), Access::Render);
    }

    #[test]
    fn test_from_path() {
        assert_eq!(Page::from_path("/"), Some(Page::Home));
        assert_eq!(Page::from_path(""), Some(Page::Home));
        assert_eq!(Page::from_path("/requests/"), Some(Page::Requests));
        assert_eq!(Page::from_path("/login?next=%2Fadmin"), Some(Page::Login));
        assert_eq!(Page::from_path("/nowhere"), None);
        for page in Page::ALL {
            assert_eq!(Page::from_path(page.path()), Some(page));
        }
    }
}
