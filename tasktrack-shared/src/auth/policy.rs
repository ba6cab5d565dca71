/// Role-based authorization policy
///
/// Every mutating operation in TaskTrack consults this module exactly once
/// before acting. The policy is a pure function over the actor's role and
/// id, the action, and (where relevant) the resource owner. It touches no
/// storage and has no side effects, so the full rule set is testable as a
/// truth table.
///
/// # Rules
///
/// | Action | Allowed |
/// |---|---|
/// | CreateUser, ListUsers, ResetOtherPassword | admin, manager |
/// | DeleteUser | admin |
/// | ManageCategories | admin |
/// | ListCategories, ChangeOwnPassword | any authenticated role |
/// | CreateTask | any authenticated role |
/// | ListTasks, SummaryReport | any (members see only their assigned tasks; scoping is applied by the query, not here) |
/// | UpdateTaskStatus, ReassignTask | any authenticated role |
/// | EditTask | admin, or the task's current assignee |
/// | DeleteTask | admin, manager |
///
/// Two deliberately permissive spots: members may create tasks (clients
/// may hide the form, the server does not enforce it), and reassignment
/// carries no role check at all.
///
/// # Example
///
/// ```
/// use tasktrack_shared::auth::policy::{allow, Action};
/// use tasktrack_shared::models::user::Role;
/// use uuid::Uuid;
///
/// let actor = Uuid::new_v4();
/// assert!(allow(Role::Manager, actor, Action::DeleteTask, None));
/// assert!(!allow(Role::Member, actor, Action::DeleteTask, None));
/// ```

use uuid::Uuid;

use crate::models::user::Role;

/// Actions gated by the policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreateUser,
    ListUsers,
    DeleteUser,
    ResetOtherPassword,
    ChangeOwnPassword,
    ManageCategories,
    ListCategories,
    CreateTask,
    ListTasks,
    UpdateTaskStatus,
    ReassignTask,
    EditTask,
    DeleteTask,
    SummaryReport,
}

impl Action {
    /// Short action name used in error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::CreateUser => "create user",
            Action::ListUsers => "list users",
            Action::DeleteUser => "delete user",
            Action::ResetOtherPassword => "reset password",
            Action::ChangeOwnPassword => "change password",
            Action::ManageCategories => "manage categories",
            Action::ListCategories => "list categories",
            Action::CreateTask => "create task",
            Action::ListTasks => "list tasks",
            Action::UpdateTaskStatus => "update task status",
            Action::ReassignTask => "reassign task",
            Action::EditTask => "edit task",
            Action::DeleteTask => "delete task",
            Action::SummaryReport => "view summary report",
        }
    }
}

/// Error type for policy denials
#[derive(Debug, Clone, thiserror::Error)]
pub enum PolicyError {
    /// Actor's role does not permit the action
    #[error("Not allowed to {}", .action.as_str())]
    Forbidden { action: Action },
}

/// Decides whether an actor may perform an action
///
/// `resource_owner` is the owning user of the target resource where the
/// action cares about ownership; today only [`Action::EditTask`] does, and
/// its owner is the task's current assignee.
pub fn allow(role: Role, actor_id: Uuid, action: Action, resource_owner: Option<Uuid>) -> bool {
    match action {
        Action::CreateUser | Action::ListUsers | Action::ResetOtherPassword => {
            matches!(role, Role::Admin | Role::Manager)
        }

        Action::DeleteUser | Action::ManageCategories => matches!(role, Role::Admin),

        Action::DeleteTask => matches!(role, Role::Admin | Role::Manager),

        // Admin may edit anything; otherwise only the current assignee
        Action::EditTask => {
            matches!(role, Role::Admin) || resource_owner == Some(actor_id)
        }

        // Open to every authenticated role. Reassignment in particular is
        // unrestricted.
        Action::ChangeOwnPassword
        | Action::ListCategories
        | Action::CreateTask
        | Action::ListTasks
        | Action::UpdateTaskStatus
        | Action::ReassignTask
        | Action::SummaryReport => true,
    }
}

/// Checks the policy and converts a denial into an error
///
/// Convenience wrapper for handlers: `require(...)?` reads better than an
/// `if !allow(...)` block at every call site.
pub fn require(
    role: Role,
    actor_id: Uuid,
    action: Action,
    resource_owner: Option<Uuid>,
) -> Result<(), PolicyError> {
    if allow(role, actor_id, action, resource_owner) {
        Ok(())
    } else {
        Err(PolicyError::Forbidden { action })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROLES: [Role; 3] = [Role::Admin, Role::Manager, Role::Member];

    #[test]
    fn test_user_management_actions() {
        let actor = Uuid::new_v4();

        for role in ROLES {
            let elevated = matches!(role, Role::Admin | Role::Manager);
            assert_eq!(allow(role, actor, Action::CreateUser, None), elevated);
            assert_eq!(allow(role, actor, Action::ListUsers, None), elevated);
            assert_eq!(allow(role, actor, Action::ResetOtherPassword, None), elevated);
            assert_eq!(
                allow(role, actor, Action::DeleteUser, None),
                role == Role::Admin
            );
        }
    }

    #[test]
    fn test_category_actions() {
        let actor = Uuid::new_v4();

        for role in ROLES {
            assert_eq!(
                allow(role, actor, Action::ManageCategories, None),
                role == Role::Admin
            );
            assert!(allow(role, actor, Action::ListCategories, None));
        }
    }

    #[test]
    fn test_task_actions_open_to_all_roles() {
        let actor = Uuid::new_v4();

        for role in ROLES {
            assert!(allow(role, actor, Action::CreateTask, None));
            assert!(allow(role, actor, Action::ListTasks, None));
            assert!(allow(role, actor, Action::UpdateTaskStatus, None));
            assert!(allow(role, actor, Action::ReassignTask, None));
            assert!(allow(role, actor, Action::SummaryReport, None));
            assert!(allow(role, actor, Action::ChangeOwnPassword, None));
        }
    }

    #[test]
    fn test_delete_task_requires_admin_or_manager() {
        let actor = Uuid::new_v4();

        assert!(allow(Role::Admin, actor, Action::DeleteTask, None));
        assert!(allow(Role::Manager, actor, Action::DeleteTask, None));
        assert!(!allow(Role::Member, actor, Action::DeleteTask, None));
    }

    #[test]
    fn test_edit_task_admin_or_assignee() {
        let actor = Uuid::new_v4();
        let other = Uuid::new_v4();

        // Admin may edit regardless of assignee
        assert!(allow(Role::Admin, actor, Action::EditTask, Some(other)));
        assert!(allow(Role::Admin, actor, Action::EditTask, None));

        // Assignee may edit their own task
        assert!(allow(Role::Member, actor, Action::EditTask, Some(actor)));
        assert!(allow(Role::Manager, actor, Action::EditTask, Some(actor)));

        // Everyone else is rejected, including managers
        assert!(!allow(Role::Member, actor, Action::EditTask, Some(other)));
        assert!(!allow(Role::Manager, actor, Action::EditTask, Some(other)));
        assert!(!allow(Role::Member, actor, Action::EditTask, None));
    }

    #[test]
    fn test_require_maps_denial_to_error() {
        let actor = Uuid::new_v4();

        assert!(require(Role::Admin, actor, Action::DeleteUser, None).is_ok());

        let err = require(Role::Member, actor, Action::DeleteUser, None).unwrap_err();
        assert!(err.to_string().contains("delete user"));
    }
}
