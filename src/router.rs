// 🗺️ View Router - which top-level screen is mounted
//
// Holds the session explicitly. Without a user the login screen is mounted
// whatever view was last requested. There is no history stack: going back
// inside a wizard is the wizard's own business.

use crate::auth::Authenticator;
use crate::entities::AuthenticatedUser;
use crate::validation::ValidationError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewId {
    Dashboard,
    Send,
    Pay,
    Cards,
    Analytics,
    Account,
    Login,
}

impl ViewId {
    pub fn title(&self) -> &'static str {
        match self {
            ViewId::Dashboard => "Accueil",
            ViewId::Send => "Envoyer de l'argent",
            ViewId::Pay => "Payer",
            ViewId::Cards => "Mes cartes",
            ViewId::Analytics => "Analyse financière",
            ViewId::Account => "Détails du compte",
            ViewId::Login => "Connexion",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Router {
    view: ViewId,
    user: Option<AuthenticatedUser>,
}

impl Router {
    pub fn new() -> Self {
        Router { view: ViewId::Login, user: None }
    }

    /// The screen that is actually on display
    pub fn mounted(&self) -> ViewId {
        if self.user.is_some() {
            self.view
        } else {
            ViewId::Login
        }
    }

    pub fn user(&self) -> Option<&AuthenticatedUser> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn navigate(&mut self, view: ViewId) {
        if self.view != view {
            tracing::debug!(from = ?self.view, to = ?view, "navigate");
        }
        self.view = view;
    }

    /// Start a session and land on the dashboard
    pub fn login(&mut self, user: AuthenticatedUser) {
        tracing::info!(user_id = %user.id, email = %user.email, "login accepted");
        self.user = Some(user);
        self.view = ViewId::Dashboard;
    }

    /// Validate the form through `auth`; on failure nothing changes
    pub fn try_login<A: Authenticator + ?Sized>(
        &mut self,
        auth: &A,
        email: &str,
        password: &str,
    ) -> Result<(), ValidationError> {
        match auth.authenticate(email, password) {
            Ok(user) => {
                self.login(user);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(reason = %err, "login refused");
                Err(err)
            }
        }
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            tracing::info!(user_id = %user.id, "logout");
        }
        self.view = ViewId::Login;
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
