//! Main authentication service implementation

use std::sync::Arc;

use nyaya_shared::utils::validation::{is_valid_email, mask_email, normalize_email};

use crate::domain::entities::audit::AuditLog;
use crate::domain::entities::token::Claims;
use crate::domain::entities::user::{FirmId, NewUser, Role, User, UserId, UserSummary};
use crate::domain::value_objects::LoginOutcome;
use crate::errors::{AuthError, DomainError, DomainResult, ValidationError};
use crate::repositories::UserRepository;
use crate::services::authorization::{Action, AuthorizationGate, DenyReason};
use crate::services::password::PasswordService;
use crate::services::token::TokenService;

/// Input to [`AuthService::register`]
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub role: Role,
    pub firm_id: Option<FirmId>,
}

/// Authentication service
pub struct AuthService<U: UserRepository> {
    users: Arc<U>,
    passwords: Arc<PasswordService>,
    tokens: Arc<TokenService>,
    gate: Arc<AuthorizationGate>,
}

impl<U: UserRepository> AuthService<U> {
    pub fn new(
        users: Arc<U>,
        passwords: Arc<PasswordService>,
        tokens: Arc<TokenService>,
        gate: Arc<AuthorizationGate>,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
            gate,
        }
    }

    /// Create a firm member account.
    ///
    /// The system role cannot be self-registered and every other role
    /// must name a firm.
    pub async fn register(&self, request: RegisterRequest) -> DomainResult<UserSummary> {
        let email = normalize_email(&request.email);
        if email.is_empty() {
            return Err(ValidationError::required("email").into());
        }
        if !is_valid_email(&email) {
            return Err(ValidationError::invalid("email").into());
        }
        PasswordService::check_policy(&request.password)?;
        if request.role.is_system_level() {
            return Err(ValidationError::invalid("role").into());
        }
        let firm_id = request
            .firm_id
            .ok_or_else(|| ValidationError::required("firm_id"))?;

        let password_hash = self.passwords.hash(&request.password).await?;
        let user = self
            .users
            .create(NewUser {
                email,
                password_hash,
                role: request.role,
                firm_id: Some(firm_id),
            })
            .await?;

        tracing::info!(
            user_id = user.id,
            firm_id,
            role = user.role.as_str(),
            email = %mask_email(&user.email),
            "User registered"
        );
        Ok(user.summary())
    }

    /// Verify credentials and issue a session token.
    ///
    /// Unknown email and wrong password are indistinguishable to the
    /// caller and cost one bcrypt verification each. Stored hashes are
    /// never modified here.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<LoginOutcome> {
        let email = normalize_email(email);
        let masked = mask_email(&email);

        let user = match self.users.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                self.passwords.verify_dummy(password).await;
                tracing::info!(email = %masked, "Login failed");
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        match self.passwords.verify(password, &user.password_hash).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::info!(email = %masked, "Login failed");
                return Err(AuthError::InvalidCredentials.into());
            }
            Err(err) => {
                tracing::error!(user_id = user.id, "Stored password hash is unreadable");
                return Err(err);
            }
        }

        let session = self.tokens.issue(user.id, user.role, user.firm_id)?;
        tracing::info!(user_id = user.id, email = %masked, "Login succeeded");

        Ok(LoginOutcome {
            session,
            user: user.summary(),
        })
    }

    /// Replace another user's password. Admins only, within their firm.
    pub async fn reset_password(
        &self,
        actor: &Claims,
        target_user_id: UserId,
        new_password: &str,
    ) -> DomainResult<()> {
        let actor_id = actor.user_id()?;
        PasswordService::check_policy(new_password)?;
        let target = self.managed_user(actor, target_user_id).await?;

        let password_hash = self.passwords.hash(new_password).await?;
        let audit = AuditLog::credential_reset(actor_id, target.id);
        self.users
            .reset_password_hash(target.id, &password_hash, &audit)
            .await?;

        tracing::info!(actor_id, target_user_id = target.id, "Credential reset");
        Ok(())
    }

    /// Change another user's role. Admins only, within their firm.
    pub async fn change_role(
        &self,
        actor: &Claims,
        target_user_id: UserId,
        role: Role,
    ) -> DomainResult<UserSummary> {
        let actor_id = actor.user_id()?;
        if role.is_system_level() {
            return Err(ValidationError::invalid("role").into());
        }
        let mut target = self.managed_user(actor, target_user_id).await?;
        if target.role == role {
            return Ok(target.summary());
        }

        let audit = AuditLog::role_change(actor_id, target.id, target.role, role);
        self.users.update_role(target.id, role, &audit).await?;

        tracing::info!(
            actor_id,
            target_user_id = target.id,
            from = target.role.as_str(),
            to = role.as_str(),
            "Role changed"
        );
        target.role = role;
        Ok(target.summary())
    }

    /// Resolve a user the actor may administer. Missing users and users
    /// outside the actor's firm fail the same way.
    async fn managed_user(&self, actor: &Claims, target_user_id: UserId) -> DomainResult<User> {
        let target = self.users.find_by_id(target_user_id).await?;
        match target {
            Some(user) => {
                let firm_id = match user.firm_id {
                    Some(firm_id) => firm_id,
                    None if self.gate.bypasses_firm_check(actor) => return Ok(user),
                    None => return Err(DomainError::forbidden(DenyReason::CrossFirm.as_str())),
                };
                self.gate.require(actor, firm_id, Action::ManageUsers)?;
                Ok(user)
            }
            None => {
                // still apply the role check so non-admins learn nothing
                if let Some(firm_id) = actor.firm_id {
                    self.gate.require(actor, firm_id, Action::ManageUsers)?;
                }
                Err(DomainError::forbidden(DenyReason::CrossFirm.as_str()))
            }
        }
    }
}
