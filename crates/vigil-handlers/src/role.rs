//! Role create/delete/update notifications.

use vigil_audit::{diff, EntityRef, Observe, Report};
use vigil_types::{Category, EntityKind, RoleState};

use crate::dispatch::{deliver_report, Dispatch, HandlerOutcome, RelayContext};

pub async fn created<D: Dispatch>(
    ctx: &RelayContext,
    dispatcher: &D,
    role: &RoleState,
) -> HandlerOutcome {
    tracing::info!(role = %role.name, id = role.id, "role created");

    let report = Report::created(EntityKind::Role, EntityRef::new(role.name.clone(), role.id))
        .field("Role Name", role.name.clone())
        .field("Role ID", role.id.to_string())
        .field("Permissions", role.permissions.join(", "))
        .field("Position", role.position.to_string());

    deliver_report(ctx, dispatcher, Category::Roles, report).await
}

pub async fn deleted<D: Dispatch>(
    ctx: &RelayContext,
    dispatcher: &D,
    role: &RoleState,
) -> HandlerOutcome {
    tracing::info!(role = %role.name, id = role.id, "role deleted");

    let report = Report::deleted(EntityKind::Role, EntityRef::new(role.name.clone(), role.id))
        .field("Role Name", role.name.clone())
        .field("Role ID", role.id.to_string());

    deliver_report(ctx, dispatcher, Category::Roles, report).await
}

pub async fn updated<D: Dispatch>(
    ctx: &RelayContext,
    dispatcher: &D,
    before: &RoleState,
    after: &RoleState,
) -> HandlerOutcome {
    let records = diff(&before.snapshot(), &after.snapshot(), RoleState::schema());
    if records.is_empty() {
        tracing::info!(role = %before.name, id = before.id, "role updated with no observable changes");
        return HandlerOutcome::Suppressed;
    }

    tracing::info!(role = %after.name, id = after.id, changes = records.len(), "role updated");

    let report = Report::update(
        EntityKind::Role,
        EntityRef::new(after.name.clone(), after.id),
        records,
    );

    deliver_report(ctx, dispatcher, Category::Roles, report).await
}
